mod common;

use common::*;
use fieldstock::inventory::{consolidate_bulk_inventory, ConsolidationReport};
use fieldstock::store::MemoryStore;

#[tokio::test]
async fn duplicate_group_collapses_into_lowest_id_with_summed_quantity() {
    let store = MemoryStore::new();
    let first = store.seed_record(bulk(5, LOC_WAREHOUSE, STATUS_AVAILABLE));
    store.seed_record(bulk(3, LOC_WAREHOUSE, STATUS_AVAILABLE));

    let report = consolidate_bulk_inventory(&store, SLOC).await.unwrap();

    assert_eq!(report, ConsolidationReport { consolidated: 1, deleted: 1 });
    let records = store.records_snapshot();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, first);
    assert_eq!(records[0].quantity, 8);
}

#[tokio::test]
async fn pass_is_idempotent() {
    let store = MemoryStore::new();
    store.seed_record(bulk(5, LOC_WAREHOUSE, STATUS_AVAILABLE));
    store.seed_record(bulk(3, LOC_WAREHOUSE, STATUS_AVAILABLE));
    store.seed_record(bulk(2, LOC_WAREHOUSE, STATUS_AVAILABLE));

    consolidate_bulk_inventory(&store, SLOC).await.unwrap();
    let after_first = store.records_snapshot();
    let report = consolidate_bulk_inventory(&store, SLOC).await.unwrap();

    assert_eq!(report, ConsolidationReport { consolidated: 0, deleted: 0 });
    assert_eq!(store.records_snapshot(), after_first);
}

#[tokio::test]
async fn interleaved_groups_each_keep_their_lowest_id_survivor() {
    let store = MemoryStore::new();
    // Two groups interleaved by insertion order.
    let a1 = store.seed_record(bulk(5, LOC_WAREHOUSE, STATUS_AVAILABLE));
    let b1 = store.seed_record(bulk(7, LOC_WITH_CREW, STATUS_ISSUED));
    store.seed_record(bulk(3, LOC_WAREHOUSE, STATUS_AVAILABLE));
    store.seed_record(bulk(2, LOC_WITH_CREW, STATUS_ISSUED));
    store.seed_record(bulk(1, LOC_WAREHOUSE, STATUS_AVAILABLE));

    let report = consolidate_bulk_inventory(&store, SLOC).await.unwrap();

    assert_eq!(report, ConsolidationReport { consolidated: 2, deleted: 3 });
    let records = store.records_snapshot();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, a1);
    assert_eq!(records[0].quantity, 9);
    assert_eq!(records[1].id, b1);
    assert_eq!(records[1].quantity, 9);
}

#[tokio::test]
async fn quantity_is_conserved_across_the_pass() {
    let store = MemoryStore::new();
    for quantity in [4, 9, 1, 6, 2] {
        store.seed_record(bulk(quantity, LOC_WAREHOUSE, STATUS_AVAILABLE));
    }
    let before = store.total_quantity(SLOC);

    consolidate_bulk_inventory(&store, SLOC).await.unwrap();

    assert_eq!(store.total_quantity(SLOC), before);
}

#[tokio::test]
async fn serialized_records_are_never_touched() {
    let store = MemoryStore::new();
    // Same location/status as the bulk duplicates, and matching each other.
    let s1 = store.seed_record(serialized(LOC_WAREHOUSE, STATUS_AVAILABLE, "MFG-001"));
    let s2 = store.seed_record(serialized(LOC_WAREHOUSE, STATUS_AVAILABLE, "MFG-002"));
    store.seed_record(bulk(5, LOC_WAREHOUSE, STATUS_AVAILABLE));
    store.seed_record(bulk(3, LOC_WAREHOUSE, STATUS_AVAILABLE));

    let report = consolidate_bulk_inventory(&store, SLOC).await.unwrap();

    assert_eq!(report, ConsolidationReport { consolidated: 1, deleted: 1 });
    let records = store.records_snapshot();
    assert_eq!(records.len(), 3);
    assert!(records.iter().any(|r| r.id == s1 && r.quantity == 1));
    assert!(records.iter().any(|r| r.id == s2 && r.quantity == 1));
}

#[tokio::test]
async fn scopes_do_not_bleed_into_each_other() {
    let store = MemoryStore::new();
    store.seed_record(bulk(5, LOC_WAREHOUSE, STATUS_AVAILABLE));
    let mut other_sloc = bulk(3, LOC_WAREHOUSE, STATUS_AVAILABLE);
    other_sloc.sloc_id = 2;
    store.seed_record(other_sloc);

    let report = consolidate_bulk_inventory(&store, SLOC).await.unwrap();

    assert_eq!(report, ConsolidationReport { consolidated: 0, deleted: 0 });
    assert_eq!(store.records_snapshot().len(), 2);
}

#[tokio::test]
async fn group_failure_is_skipped_and_state_left_rerunnable() {
    let store = MemoryStore::new();
    store.seed_record(bulk(5, LOC_WAREHOUSE, STATUS_AVAILABLE));
    store.seed_record(bulk(3, LOC_WAREHOUSE, STATUS_AVAILABLE));
    store.set_fail_quantity_updates(true);

    let report = consolidate_bulk_inventory(&store, SLOC).await.unwrap();
    assert_eq!(report, ConsolidationReport { consolidated: 0, deleted: 0 });
    assert_eq!(store.total_quantity(SLOC), 8);

    // Once the store recovers, re-running finishes the job.
    store.set_fail_quantity_updates(false);
    let report = consolidate_bulk_inventory(&store, SLOC).await.unwrap();
    assert_eq!(report, ConsolidationReport { consolidated: 1, deleted: 1 });
    assert_eq!(store.total_quantity(SLOC), 8);
}
