//! Duplicate-record consolidation: collapses every bulk equivalence group in
//! a stock-location scope down to a single record carrying the group's summed
//! quantity. Safe to re-run at any time; a clean scope is a no-op.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::InventoryRecord;
use crate::store::InventoryStore;

use super::error::InventoryError;
use super::key::EquivalenceKey;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidationReport {
    /// Groups fully merged into their survivor.
    pub consolidated: usize,
    /// Duplicate records removed.
    pub deleted: usize,
}

/// Merges every duplicated bulk group in `sloc_id`. The lowest-id member of a
/// group survives with the summed quantity; the rest are deleted. A failure
/// on one group is logged and skipped, the pass continues with the remaining
/// groups and reports what succeeded.
pub async fn consolidate_bulk_inventory(
    store: &dyn InventoryStore,
    sloc_id: i64,
) -> Result<ConsolidationReport, InventoryError> {
    let records = store.bulk_records(sloc_id).await?;

    let mut groups: HashMap<EquivalenceKey, Vec<InventoryRecord>> = HashMap::new();
    for record in records {
        groups.entry(EquivalenceKey::of(&record)).or_default().push(record);
    }

    let mut report = ConsolidationReport::default();

    for (key, mut members) in groups {
        if members.len() < 2 {
            continue;
        }
        members.sort_by_key(|r| r.id);
        let survivor = &members[0];
        let total: i64 = members.iter().map(|r| r.quantity).sum();

        if let Err(err) = store.update_quantity(survivor.id, total).await {
            log::warn!(
                "consolidation skipped group {key:?} in sloc {sloc_id}: \
                 failed to update survivor {}: {err}",
                survivor.id
            );
            continue;
        }

        let mut merged_fully = true;
        for duplicate in &members[1..] {
            match store.delete_record(duplicate.id).await {
                Ok(()) => report.deleted += 1,
                Err(err) => {
                    log::warn!(
                        "consolidation left duplicate {} in group {key:?}, sloc {sloc_id}: {err}",
                        duplicate.id
                    );
                    merged_fully = false;
                }
            }
        }
        if merged_fully {
            report.consolidated += 1;
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewInventoryRecord;
    use crate::store::MemoryStore;

    fn bulk(quantity: i64, location_id: i64) -> NewInventoryRecord {
        NewInventoryRecord {
            item_type_id: 7,
            quantity,
            location_id,
            status_id: 2,
            sloc_id: 1,
            assigned_crew_id: None,
            area_id: None,
            mfgrsn: None,
            tilsonsn: None,
        }
    }

    #[tokio::test]
    async fn merges_duplicates_into_the_lowest_id_record() {
        let store = MemoryStore::new();
        let first = store.seed_record(bulk(5, 10));
        store.seed_record(bulk(3, 10));

        let report = consolidate_bulk_inventory(&store, 1).await.unwrap();
        assert_eq!(report, ConsolidationReport { consolidated: 1, deleted: 1 });

        let records = store.records_snapshot();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, first);
        assert_eq!(records[0].quantity, 8);
    }

    #[tokio::test]
    async fn second_run_is_a_no_op() {
        let store = MemoryStore::new();
        store.seed_record(bulk(5, 10));
        store.seed_record(bulk(3, 10));

        consolidate_bulk_inventory(&store, 1).await.unwrap();
        let report = consolidate_bulk_inventory(&store, 1).await.unwrap();

        assert_eq!(report, ConsolidationReport::default());
    }

    #[tokio::test]
    async fn distinct_groups_are_untouched() {
        let store = MemoryStore::new();
        store.seed_record(bulk(5, 10));
        store.seed_record(bulk(3, 11));

        let report = consolidate_bulk_inventory(&store, 1).await.unwrap();

        assert_eq!(report, ConsolidationReport::default());
        assert_eq!(store.records_snapshot().len(), 2);
    }

    #[tokio::test]
    async fn update_failure_skips_the_group_and_keeps_going() {
        let store = MemoryStore::new();
        store.seed_record(bulk(5, 10));
        store.seed_record(bulk(3, 10));
        store.set_fail_quantity_updates(true);

        let report = consolidate_bulk_inventory(&store, 1).await.unwrap();

        assert_eq!(report, ConsolidationReport::default());
        assert_eq!(store.total_quantity(1), 8);
        assert_eq!(store.records_snapshot().len(), 2);
    }
}
