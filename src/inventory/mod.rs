//! The reconciliation core: equivalence grouping, the quantity upsert engine,
//! the duplicate-consolidation pass and the operation orchestrators built on
//! top of them.

pub mod consolidate;
pub mod edge;
pub mod error;
pub mod key;
pub mod ops;
pub mod reference;
pub mod upsert;

pub use consolidate::{consolidate_bulk_inventory, ConsolidationReport};
pub use error::InventoryError;
pub use key::EquivalenceKey;
pub use ops::{ItemResult, OperationReport};
pub use reference::ReferenceData;
pub use upsert::{upsert_bulk_quantity, BulkTarget, UpsertMode, UpsertOperation, UpsertOutcome};
