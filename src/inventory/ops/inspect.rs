//! Inspect: disposes available units into passed (Available) and rejected
//! (Rejected) groups. Whatever is not inspected stays behind at the original
//! status; the three outcomes always sum to the record's quantity.

use serde::{Deserialize, Serialize};

use crate::models::{InventoryRecord, NewTransactionRecord};
use crate::store::{AssignmentChange, InventoryStore};

use super::super::edge::{self, EdgeClient, EdgeOperation};
use super::super::error::InventoryError;
use super::super::reference::{ReferenceData, STATUS_AVAILABLE, STATUS_REJECTED};
use super::super::upsert::{upsert_bulk_quantity, BulkTarget, UpsertMode};
use super::{
    bulk_target_of, consolidate_scope, load_record, log_item_failure, log_transaction, ItemResult,
    OperationReport,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectItem {
    pub inventory_id: i64,
    pub passed: i64,
    pub rejected: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectParams {
    pub sloc_id: i64,
    pub items: Vec<InspectItem>,
    pub notes: Option<String>,
    pub user_name: String,
}

pub async fn execute(
    store: &dyn InventoryStore,
    refs: &ReferenceData,
    edge: Option<&dyn EdgeClient>,
    params: &InspectParams,
) -> Result<OperationReport, InventoryError> {
    let available = refs.status_named(STATUS_AVAILABLE)?.clone();
    let rejected = refs.status_named(STATUS_REJECTED)?.clone();

    if let Some(report) = edge::try_remote(edge, EdgeOperation::Inspect, params).await {
        return Ok(report);
    }

    let mut report = OperationReport::default();

    for item in &params.items {
        match inspect_item(store, params, item, available.id, rejected.id).await {
            Ok(record) => {
                let mut entry = NewTransactionRecord::new(
                    "Inspect",
                    &format!("Inspected: {} passed, {} rejected", item.passed, item.rejected),
                    &refs.item_type_name(record.item_type_id),
                    item.passed + item.rejected,
                    &params.user_name,
                );
                entry.old_quantity = Some(record.quantity);
                entry.from_location = refs.location_name(record.location_id);
                entry.old_status = refs.status_name(record.status_id);
                entry.notes = params.notes.clone();
                log_transaction(store, entry).await;
                report.push(ItemResult::ok(record.id));
            }
            Err(err) => {
                log_item_failure(
                    "inspect",
                    &format!("record {}", item.inventory_id),
                    item.passed + item.rejected,
                    &err,
                );
                report.push(ItemResult::failed(&err));
            }
        }
    }

    consolidate_scope(store, params.sloc_id).await;
    log::info!("inspect complete for sloc {}: {}", params.sloc_id, report.summary());
    Ok(report)
}

async fn inspect_item(
    store: &dyn InventoryStore,
    params: &InspectParams,
    item: &InspectItem,
    available_status_id: i64,
    rejected_status_id: i64,
) -> Result<InventoryRecord, InventoryError> {
    if item.passed < 0 || item.rejected < 0 {
        return Err(InventoryError::Validation(
            "passed and rejected counts must be non-negative".to_string(),
        ));
    }
    let inspected = item.passed + item.rejected;
    if inspected == 0 {
        return Err(InventoryError::Validation(
            "nothing to inspect: passed and rejected are both zero".to_string(),
        ));
    }

    let record = load_record(store, item.inventory_id).await?;
    if record.sloc_id != params.sloc_id {
        return Err(InventoryError::Validation(format!(
            "record {} belongs to sloc {}, not sloc {}",
            record.id, record.sloc_id, params.sloc_id
        )));
    }

    if record.is_serialized() {
        // A serialized unit is inspected whole: it either passes or fails.
        let status_id = match (item.passed, item.rejected) {
            (1, 0) => available_status_id,
            (0, 1) => rejected_status_id,
            _ => {
                return Err(InventoryError::Validation(
                    "a serialized unit must be fully passed or fully rejected".to_string(),
                ))
            }
        };
        store
            .update_assignment(
                record.id,
                AssignmentChange {
                    location_id: record.location_id,
                    status_id,
                    assigned_crew_id: record.assigned_crew_id,
                    area_id: record.area_id,
                },
            )
            .await?;
        return Ok(record);
    }

    // Totals are checked before any write reaches the store.
    if inspected > record.quantity {
        return Err(InventoryError::Validation(format!(
            "inspected {} units but only {} are available",
            inspected, record.quantity
        )));
    }

    let source = bulk_target_of(&record);
    upsert_bulk_quantity(store, &source, inspected, UpsertMode::Subtract).await?;

    if item.passed > 0 {
        let target = BulkTarget {
            status_id: available_status_id,
            ..source
        };
        upsert_bulk_quantity(store, &target, item.passed, UpsertMode::Add).await?;
    }
    if item.rejected > 0 {
        let target = BulkTarget {
            status_id: rejected_status_id,
            ..source
        };
        upsert_bulk_quantity(store, &target, item.rejected, UpsertMode::Add).await?;
    }

    Ok(record)
}
