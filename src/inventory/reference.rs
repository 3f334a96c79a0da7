use serde::{Deserialize, Serialize};

use crate::models::{Area, Crew, ItemType, Location, Status, INVENTORY_TYPE_SERIALIZED};

use super::error::InventoryError;

// Well-known reference names the orchestrators resolve against the snapshot.
pub const STATUS_AVAILABLE: &str = "Available";
pub const STATUS_ISSUED: &str = "Issued";
pub const STATUS_REJECTED: &str = "Rejected";
pub const STATUS_INSTALLED: &str = "Installed";
pub const LOCATION_WITH_CREW: &str = "With Crew";
pub const LOCATION_FIELD_INSTALLED: &str = "Field Installed";

// String keys in the app_config table.
pub const CONFIG_RECEIVING_STATUS: &str = "receivingStatus";
pub const CONFIG_RECEIVING_LOCATION: &str = "receivingLocation";

/// Read-only snapshot of the reference tables, passed explicitly into every
/// orchestrator call instead of living in a shared module-level cache.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceData {
    pub item_types: Vec<ItemType>,
    pub statuses: Vec<Status>,
    pub locations: Vec<Location>,
    pub crews: Vec<Crew>,
    pub areas: Vec<Area>,
}

impl ReferenceData {
    pub fn item_type(&self, id: i64) -> Option<&ItemType> {
        self.item_types.iter().find(|t| t.id == id)
    }

    pub fn is_serialized_type(&self, item_type_id: i64) -> bool {
        self.item_type(item_type_id)
            .map(|t| t.inventory_type_id == INVENTORY_TYPE_SERIALIZED)
            .unwrap_or(false)
    }

    pub fn status_named(&self, name: &str) -> Result<&Status, InventoryError> {
        self.statuses
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| InventoryError::RequiredReferenceMissing(format!("status '{name}'")))
    }

    pub fn location_named(&self, name: &str) -> Result<&Location, InventoryError> {
        self.locations
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| InventoryError::RequiredReferenceMissing(format!("location '{name}'")))
    }

    pub fn crew(&self, id: i64) -> Result<&Crew, InventoryError> {
        self.crews
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| InventoryError::RequiredReferenceMissing(format!("crew {id}")))
    }

    // Name snapshots for the denormalized transaction log. Missing rows
    // render as None so history writes never fail on a stale reference.

    pub fn item_type_name(&self, id: i64) -> String {
        self.item_type(id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| format!("item type {id}"))
    }

    pub fn status_name(&self, id: i64) -> Option<String> {
        self.statuses.iter().find(|s| s.id == id).map(|s| s.name.clone())
    }

    pub fn location_name(&self, id: i64) -> Option<String> {
        self.locations.iter().find(|l| l.id == id).map(|l| l.name.clone())
    }

    pub fn crew_name(&self, id: Option<i64>) -> Option<String> {
        let id = id?;
        self.crews.iter().find(|c| c.id == id).map(|c| c.name.clone())
    }

    pub fn area_name(&self, id: Option<i64>) -> Option<String> {
        let id = id?;
        self.areas.iter().find(|a| a.id == id).map(|a| a.name.clone())
    }
}
