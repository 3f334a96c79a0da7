pub mod inventory;
pub mod reference;
pub mod transaction;

// Re-export only the types we actually use
pub use inventory::{
    InventoryRecord, NewInventoryRecord, INVENTORY_TYPE_BULK, INVENTORY_TYPE_SERIALIZED,
};
pub use reference::{Area, Crew, ItemType, Location, Status};
pub use transaction::{NewTransactionRecord, TransactionRecord};
