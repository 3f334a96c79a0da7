//! Quantity upsert engine: commits a signed quantity change against the one
//! bulk record matching a target equivalence group, creating or deleting the
//! record as the quantity crosses zero.

use serde::{Deserialize, Serialize};

use crate::models::NewInventoryRecord;
use crate::store::InventoryStore;

use super::error::InventoryError;
use super::key::EquivalenceKey;

/// Fully specifies an equivalence group plus its owning stock-location scope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BulkTarget {
    pub sloc_id: i64,
    pub location_id: i64,
    pub assigned_crew_id: Option<i64>,
    pub area_id: Option<i64>,
    pub item_type_id: i64,
    pub status_id: i64,
}

impl BulkTarget {
    pub fn key(&self) -> EquivalenceKey {
        EquivalenceKey {
            location_id: self.location_id,
            assigned_crew_id: self.assigned_crew_id,
            area_id: self.area_id,
            item_type_id: self.item_type_id,
            status_id: self.status_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpsertMode {
    Add,
    Subtract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertOperation {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpsertOutcome {
    pub inventory_id: i64,
    pub operation: UpsertOperation,
    pub new_quantity: i64,
}

/// Applies `delta` units to the bulk record matching `target`.
///
/// Add mode updates the matching record or inserts a new one. Subtract mode
/// requires a match; a result of zero deletes the record (zero-quantity bulk
/// rows never persist) and a result below zero fails with no write. Exactly
/// one insert, update or delete reaches the store on success.
pub async fn upsert_bulk_quantity(
    store: &dyn InventoryStore,
    target: &BulkTarget,
    delta: i64,
    mode: UpsertMode,
) -> Result<UpsertOutcome, InventoryError> {
    if delta <= 0 {
        return Err(InventoryError::Validation(format!(
            "quantity delta must be a positive integer, got {delta}"
        )));
    }

    let existing = store.find_bulk_by_key(target.sloc_id, &target.key()).await?;

    match mode {
        UpsertMode::Add => match existing {
            Some(record) => {
                let new_quantity = record.quantity + delta;
                store.update_quantity(record.id, new_quantity).await?;
                Ok(UpsertOutcome {
                    inventory_id: record.id,
                    operation: UpsertOperation::Updated,
                    new_quantity,
                })
            }
            None => {
                let record = store
                    .insert_record(NewInventoryRecord {
                        item_type_id: target.item_type_id,
                        quantity: delta,
                        location_id: target.location_id,
                        status_id: target.status_id,
                        sloc_id: target.sloc_id,
                        assigned_crew_id: target.assigned_crew_id,
                        area_id: target.area_id,
                        mfgrsn: None,
                        tilsonsn: None,
                    })
                    .await?;
                Ok(UpsertOutcome {
                    inventory_id: record.id,
                    operation: UpsertOperation::Created,
                    new_quantity: record.quantity,
                })
            }
        },
        UpsertMode::Subtract => {
            let record = existing.ok_or(InventoryError::RecordNotFound)?;
            let new_quantity = record.quantity - delta;
            if new_quantity < 0 {
                return Err(InventoryError::InsufficientQuantity {
                    available: record.quantity,
                    requested: delta,
                });
            }
            if new_quantity == 0 {
                store.delete_record(record.id).await?;
                return Ok(UpsertOutcome {
                    inventory_id: record.id,
                    operation: UpsertOperation::Deleted,
                    new_quantity: 0,
                });
            }
            store.update_quantity(record.id, new_quantity).await?;
            Ok(UpsertOutcome {
                inventory_id: record.id,
                operation: UpsertOperation::Updated,
                new_quantity,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn target() -> BulkTarget {
        BulkTarget {
            sloc_id: 1,
            location_id: 10,
            assigned_crew_id: None,
            area_id: None,
            item_type_id: 7,
            status_id: 2,
        }
    }

    #[tokio::test]
    async fn add_against_empty_scope_creates_a_record() {
        let store = MemoryStore::new();
        let outcome = upsert_bulk_quantity(&store, &target(), 4, UpsertMode::Add)
            .await
            .unwrap();

        assert_eq!(outcome.operation, UpsertOperation::Created);
        assert_eq!(outcome.new_quantity, 4);
        assert_eq!(store.total_quantity(1), 4);
    }

    #[tokio::test]
    async fn add_merges_into_the_matching_record() {
        let store = MemoryStore::new();
        upsert_bulk_quantity(&store, &target(), 4, UpsertMode::Add)
            .await
            .unwrap();
        let outcome = upsert_bulk_quantity(&store, &target(), 6, UpsertMode::Add)
            .await
            .unwrap();

        assert_eq!(outcome.operation, UpsertOperation::Updated);
        assert_eq!(outcome.new_quantity, 10);
        assert_eq!(store.records_snapshot().len(), 1);
    }

    #[tokio::test]
    async fn subtract_from_nonexistent_group_is_record_not_found() {
        let store = MemoryStore::new();
        let err = upsert_bulk_quantity(&store, &target(), 5, UpsertMode::Subtract)
            .await
            .unwrap_err();

        assert!(matches!(err, InventoryError::RecordNotFound));
        assert!(store.records_snapshot().is_empty());
    }

    #[tokio::test]
    async fn subtract_below_zero_fails_without_a_write() {
        let store = MemoryStore::new();
        upsert_bulk_quantity(&store, &target(), 3, UpsertMode::Add)
            .await
            .unwrap();
        let err = upsert_bulk_quantity(&store, &target(), 5, UpsertMode::Subtract)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            InventoryError::InsufficientQuantity {
                available: 3,
                requested: 5
            }
        ));
        assert_eq!(store.total_quantity(1), 3);
    }

    #[tokio::test]
    async fn subtract_to_zero_deletes_the_record() {
        let store = MemoryStore::new();
        upsert_bulk_quantity(&store, &target(), 3, UpsertMode::Add)
            .await
            .unwrap();
        let outcome = upsert_bulk_quantity(&store, &target(), 3, UpsertMode::Subtract)
            .await
            .unwrap();

        assert_eq!(outcome.operation, UpsertOperation::Deleted);
        assert_eq!(outcome.new_quantity, 0);
        assert!(store.records_snapshot().is_empty());
    }

    #[tokio::test]
    async fn non_positive_delta_is_rejected() {
        let store = MemoryStore::new();
        let err = upsert_bulk_quantity(&store, &target(), 0, UpsertMode::Add)
            .await
            .unwrap_err();

        assert!(matches!(err, InventoryError::Validation(_)));
    }
}
