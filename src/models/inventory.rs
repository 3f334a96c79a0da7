use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// `item_types.inventory_type_id` value for serialized stock (tracked per unit).
pub const INVENTORY_TYPE_SERIALIZED: i64 = 1;
/// `item_types.inventory_type_id` value for bulk stock (tracked by quantity).
pub const INVENTORY_TYPE_BULK: i64 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct InventoryRecord {
    pub id: i64,
    pub item_type_id: i64,
    pub quantity: i64,
    pub location_id: i64,
    pub status_id: i64,
    pub sloc_id: i64,
    pub assigned_crew_id: Option<i64>,
    pub area_id: Option<i64>,
    pub mfgrsn: Option<String>,
    pub tilsonsn: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryRecord {
    /// A record carrying either serial number is tracked per unit and is
    /// never grouped or merged with other records.
    pub fn is_serialized(&self) -> bool {
        self.mfgrsn.is_some() || self.tilsonsn.is_some()
    }

    pub fn is_bulk(&self) -> bool {
        !self.is_serialized()
    }
}

/// Insert shape for `inventory`; the store assigns the id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInventoryRecord {
    pub item_type_id: i64,
    pub quantity: i64,
    pub location_id: i64,
    pub status_id: i64,
    pub sloc_id: i64,
    pub assigned_crew_id: Option<i64>,
    pub area_id: Option<i64>,
    pub mfgrsn: Option<String>,
    pub tilsonsn: Option<String>,
}
