#![allow(dead_code)]

use fieldstock::inventory::reference::{
    ReferenceData, CONFIG_RECEIVING_LOCATION, CONFIG_RECEIVING_STATUS,
};
use fieldstock::models::{
    Area, Crew, ItemType, Location, NewInventoryRecord, Status, INVENTORY_TYPE_BULK,
    INVENTORY_TYPE_SERIALIZED,
};
use fieldstock::store::MemoryStore;

pub const SLOC: i64 = 1;

pub const BULK_TYPE: i64 = 7;
pub const SERIALIZED_TYPE: i64 = 8;

pub const STATUS_AVAILABLE: i64 = 1;
pub const STATUS_ISSUED: i64 = 2;
pub const STATUS_REJECTED: i64 = 3;
pub const STATUS_INSTALLED: i64 = 4;

pub const LOC_WAREHOUSE: i64 = 10;
pub const LOC_WITH_CREW: i64 = 11;
pub const LOC_FIELD: i64 = 12;

pub const CREW_NORTH: i64 = 2;
pub const AREA_THREE: i64 = 3;

pub fn reference_data() -> ReferenceData {
    ReferenceData {
        item_types: vec![
            ItemType {
                id: BULK_TYPE,
                name: "Fiber Drop Cable".to_string(),
                inventory_type_id: INVENTORY_TYPE_BULK,
            },
            ItemType {
                id: SERIALIZED_TYPE,
                name: "ONT Router".to_string(),
                inventory_type_id: INVENTORY_TYPE_SERIALIZED,
            },
        ],
        statuses: vec![
            Status { id: STATUS_AVAILABLE, name: "Available".to_string() },
            Status { id: STATUS_ISSUED, name: "Issued".to_string() },
            Status { id: STATUS_REJECTED, name: "Rejected".to_string() },
            Status { id: STATUS_INSTALLED, name: "Installed".to_string() },
        ],
        locations: vec![
            Location { id: LOC_WAREHOUSE, name: "Warehouse".to_string() },
            Location { id: LOC_WITH_CREW, name: "With Crew".to_string() },
            Location { id: LOC_FIELD, name: "Field Installed".to_string() },
        ],
        crews: vec![Crew { id: CREW_NORTH, name: "North Crew".to_string() }],
        areas: vec![Area { id: AREA_THREE, name: "Zone Three".to_string() }],
    }
}

/// Memory store with the receiving destination configured.
pub fn configured_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.set_config(CONFIG_RECEIVING_LOCATION, "Warehouse");
    store.set_config(CONFIG_RECEIVING_STATUS, "Available");
    store
}

pub fn bulk(quantity: i64, location_id: i64, status_id: i64) -> NewInventoryRecord {
    NewInventoryRecord {
        item_type_id: BULK_TYPE,
        quantity,
        location_id,
        status_id,
        sloc_id: SLOC,
        assigned_crew_id: None,
        area_id: None,
        mfgrsn: None,
        tilsonsn: None,
    }
}

pub fn bulk_with_crew(
    quantity: i64,
    location_id: i64,
    status_id: i64,
    crew_id: i64,
    area_id: Option<i64>,
) -> NewInventoryRecord {
    NewInventoryRecord {
        assigned_crew_id: Some(crew_id),
        area_id,
        ..bulk(quantity, location_id, status_id)
    }
}

pub fn serialized(location_id: i64, status_id: i64, serial: &str) -> NewInventoryRecord {
    NewInventoryRecord {
        item_type_id: SERIALIZED_TYPE,
        quantity: 1,
        location_id,
        status_id,
        sloc_id: SLOC,
        assigned_crew_id: None,
        area_id: None,
        mfgrsn: Some(serial.to_string()),
        tilsonsn: None,
    }
}
