pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::inventory::key::EquivalenceKey;
use crate::models::{InventoryRecord, NewInventoryRecord, NewTransactionRecord, TransactionRecord};

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Wraps the underlying store failure; the message is passed through.
#[derive(Debug, Clone, Error)]
#[error("persistence failure: {0}")]
pub struct StoreError(pub String);

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError(err.to_string())
    }
}

/// In-place move of a record to a new location/status/crew/area assignment.
/// Used for serialized stock, which is never split or merged.
#[derive(Debug, Clone, Copy)]
pub struct AssignmentChange {
    pub location_id: i64,
    pub status_id: i64,
    pub assigned_crew_id: Option<i64>,
    pub area_id: Option<i64>,
}

/// Persistence boundary for the `inventory` table, the string-keyed config
/// table and the transaction log. The Postgres implementation backs the
/// running application; the in-memory implementation backs the tests.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// All bulk records (neither serial set) in a stock-location scope,
    /// ordered by ascending id.
    async fn bulk_records(&self, sloc_id: i64) -> Result<Vec<InventoryRecord>, StoreError>;

    /// The bulk record matching an equivalence key within a scope, if any.
    async fn find_bulk_by_key(
        &self,
        sloc_id: i64,
        key: &EquivalenceKey,
    ) -> Result<Option<InventoryRecord>, StoreError>;

    async fn record(&self, id: i64) -> Result<Option<InventoryRecord>, StoreError>;

    /// Every record in a scope, serialized included, ordered by ascending id.
    async fn records(&self, sloc_id: i64) -> Result<Vec<InventoryRecord>, StoreError>;

    async fn insert_record(
        &self,
        new: NewInventoryRecord,
    ) -> Result<InventoryRecord, StoreError>;

    /// Sets the quantity and refreshes `updated_at`.
    async fn update_quantity(&self, id: i64, quantity: i64) -> Result<(), StoreError>;

    async fn update_assignment(
        &self,
        id: i64,
        change: AssignmentChange,
    ) -> Result<(), StoreError>;

    async fn delete_record(&self, id: i64) -> Result<(), StoreError>;

    /// Application configuration lookup by string key.
    async fn config_value(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn append_transaction(&self, entry: NewTransactionRecord) -> Result<(), StoreError>;

    /// Transaction history, newest first.
    async fn transactions(&self) -> Result<Vec<TransactionRecord>, StoreError>;
}
