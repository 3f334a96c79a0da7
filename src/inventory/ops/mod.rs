//! Operation orchestrators. Every operation follows the same shape: validate
//! preconditions, compute quantity deltas, commit them through the upsert
//! engine, append transaction history, then consolidate the scope before the
//! caller re-reads inventory state.

pub mod inspect;
pub mod install;
pub mod issue;
pub mod receive;
pub mod reject;
pub mod returns;

use serde::{Deserialize, Serialize};

use crate::models::{InventoryRecord, NewTransactionRecord};
use crate::store::InventoryStore;

use super::consolidate::consolidate_bulk_inventory;
use super::error::InventoryError;
use super::upsert::{upsert_bulk_quantity, BulkTarget, UpsertMode, UpsertOutcome};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResult {
    pub success: bool,
    pub inventory_id: Option<i64>,
    pub error: Option<String>,
}

impl ItemResult {
    pub fn ok(inventory_id: i64) -> Self {
        Self {
            success: true,
            inventory_id: Some(inventory_id),
            error: None,
        }
    }

    pub fn failed(err: &InventoryError) -> Self {
        Self {
            success: false,
            inventory_id: None,
            error: Some(err.to_string()),
        }
    }
}

/// Per-item results of one batch operation. One failed item never aborts the
/// rest of the batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperationReport {
    pub results: Vec<ItemResult>,
}

impl OperationReport {
    pub fn push(&mut self, result: ItemResult) {
        self.results.push(result);
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    pub fn summary(&self) -> String {
        format!("{} succeeded, {} failed", self.succeeded(), self.failed())
    }
}

pub(crate) fn bulk_target_of(record: &InventoryRecord) -> BulkTarget {
    BulkTarget {
        sloc_id: record.sloc_id,
        location_id: record.location_id,
        assigned_crew_id: record.assigned_crew_id,
        area_id: record.area_id,
        item_type_id: record.item_type_id,
        status_id: record.status_id,
    }
}

pub(crate) async fn load_record(
    store: &dyn InventoryStore,
    id: i64,
) -> Result<InventoryRecord, InventoryError> {
    store.record(id).await?.ok_or(InventoryError::RecordNotFound)
}

/// Serialized stock moves exactly one unit at a time; any other requested
/// quantity is a caller error, not a partial move.
pub(crate) fn require_single_unit(quantity: i64) -> Result<(), InventoryError> {
    if quantity != 1 {
        return Err(InventoryError::Validation(format!(
            "serialized items move one unit at a time, got {quantity}"
        )));
    }
    Ok(())
}

pub(crate) fn require_positive_quantity(quantity: i64) -> Result<(), InventoryError> {
    if quantity <= 0 {
        return Err(InventoryError::Validation(format!(
            "quantity must be a positive integer, got {quantity}"
        )));
    }
    Ok(())
}

/// Moves `quantity` units out of the source record's group into the
/// destination group. Partial moves leave the remainder at the source; a full
/// move removes the source record through the subtract-to-zero rule.
pub(crate) async fn transfer_bulk(
    store: &dyn InventoryStore,
    source: &InventoryRecord,
    destination: BulkTarget,
    quantity: i64,
) -> Result<UpsertOutcome, InventoryError> {
    let source_target = bulk_target_of(source);
    upsert_bulk_quantity(store, &source_target, quantity, UpsertMode::Subtract).await?;
    upsert_bulk_quantity(store, &destination, quantity, UpsertMode::Add).await
}

/// Transaction history is fire-and-forget: a failed append is logged, never
/// surfaced as an operation failure.
pub(crate) async fn log_transaction(store: &dyn InventoryStore, entry: NewTransactionRecord) {
    let context = format!(
        "{} {} x{}",
        entry.transaction_type, entry.item_type_name, entry.quantity
    );
    if let Err(err) = store.append_transaction(entry).await {
        log::error!("transaction log append failed ({context}): {err}");
    }
}

/// Runs the consolidation pass after an operation. A failed pass is logged
/// and not propagated; the pass is idempotent and re-runs on the next
/// operation in the scope.
pub(crate) async fn consolidate_scope(store: &dyn InventoryStore, sloc_id: i64) {
    match consolidate_bulk_inventory(store, sloc_id).await {
        Ok(report) if report.deleted > 0 => {
            log::info!(
                "consolidated {} group(s), removed {} duplicate record(s) in sloc {sloc_id}",
                report.consolidated,
                report.deleted
            );
        }
        Ok(_) => {}
        Err(err) => {
            log::error!("post-operation consolidation failed for sloc {sloc_id}: {err}");
        }
    }
}

pub(crate) fn log_item_failure(
    operation: &str,
    item_type: &str,
    quantity: i64,
    err: &InventoryError,
) {
    log::warn!("{operation} failed for {item_type} x{quantity}: {err}");
}
