use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Clone, Error)]
pub enum InventoryError {
    #[error("insufficient quantity: {available} available, {requested} requested")]
    InsufficientQuantity { available: i64, requested: i64 },

    /// No bulk record matches the target equivalence group.
    #[error("no matching inventory record")]
    RecordNotFound,

    /// A configured status/location (or other reference row) is absent from
    /// the reference snapshot. Orchestrators abort before any write on this.
    #[error("required reference data missing: {0}")]
    RequiredReferenceMissing(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Persistence(#[from] StoreError),
}
