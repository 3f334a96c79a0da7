use crate::models::InventoryRecord;

/// The attributes that make two bulk records "the same stock". Missing crew
/// and area stay `None` inside the typed key, so two unassigned records group
/// together and can never collide with a real id.
///
/// This is the single grouping implementation shared by the upsert engine and
/// the consolidation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EquivalenceKey {
    pub location_id: i64,
    pub assigned_crew_id: Option<i64>,
    pub area_id: Option<i64>,
    pub item_type_id: i64,
    pub status_id: i64,
}

impl EquivalenceKey {
    pub fn of(record: &InventoryRecord) -> Self {
        Self {
            location_id: record.location_id,
            assigned_crew_id: record.assigned_crew_id,
            area_id: record.area_id,
            item_type_id: record.item_type_id,
            status_id: record.status_id,
        }
    }
}
