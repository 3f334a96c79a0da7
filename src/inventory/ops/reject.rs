//! Reject: flags stock as Rejected where it sits. Bulk rejects follow the
//! partial-split rule (rejected units peel off into a Rejected group at the
//! same location/crew/area); serialized units change status in place.

use serde::{Deserialize, Serialize};

use crate::models::{InventoryRecord, NewTransactionRecord};
use crate::store::{AssignmentChange, InventoryStore};

use super::super::edge::{self, EdgeClient, EdgeOperation};
use super::super::error::InventoryError;
use super::super::reference::{ReferenceData, STATUS_REJECTED};
use super::super::upsert::BulkTarget;
use super::{
    consolidate_scope, load_record, log_item_failure, log_transaction, require_positive_quantity,
    require_single_unit, transfer_bulk, ItemResult, OperationReport,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectItem {
    pub inventory_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectParams {
    pub sloc_id: i64,
    pub items: Vec<RejectItem>,
    pub notes: Option<String>,
    pub user_name: String,
}

pub async fn execute(
    store: &dyn InventoryStore,
    refs: &ReferenceData,
    edge: Option<&dyn EdgeClient>,
    params: &RejectParams,
) -> Result<OperationReport, InventoryError> {
    let rejected = refs.status_named(STATUS_REJECTED)?.clone();

    if let Some(report) = edge::try_remote(edge, EdgeOperation::Reject, params).await {
        return Ok(report);
    }

    let mut report = OperationReport::default();

    for item in &params.items {
        match reject_item(store, params, item, rejected.id).await {
            Ok((record, inventory_id)) => {
                let mut entry = NewTransactionRecord::new(
                    "Reject",
                    "Rejected",
                    &refs.item_type_name(record.item_type_id),
                    item.quantity,
                    &params.user_name,
                );
                entry.old_quantity = Some(record.quantity);
                entry.from_location = refs.location_name(record.location_id);
                entry.old_status = refs.status_name(record.status_id);
                entry.new_status = Some(rejected.name.clone());
                entry.old_crew = refs.crew_name(record.assigned_crew_id);
                entry.new_crew = refs.crew_name(record.assigned_crew_id);
                entry.notes = params.notes.clone();
                log_transaction(store, entry).await;
                report.push(ItemResult::ok(inventory_id));
            }
            Err(err) => {
                log_item_failure("reject", &format!("record {}", item.inventory_id), item.quantity, &err);
                report.push(ItemResult::failed(&err));
            }
        }
    }

    consolidate_scope(store, params.sloc_id).await;
    log::info!("reject complete for sloc {}: {}", params.sloc_id, report.summary());
    Ok(report)
}

async fn reject_item(
    store: &dyn InventoryStore,
    params: &RejectParams,
    item: &RejectItem,
    rejected_status_id: i64,
) -> Result<(InventoryRecord, i64), InventoryError> {
    let record = load_record(store, item.inventory_id).await?;
    if record.sloc_id != params.sloc_id {
        return Err(InventoryError::Validation(format!(
            "record {} belongs to sloc {}, not sloc {}",
            record.id, record.sloc_id, params.sloc_id
        )));
    }

    if record.is_serialized() {
        require_single_unit(item.quantity)?;
        store
            .update_assignment(
                record.id,
                AssignmentChange {
                    location_id: record.location_id,
                    status_id: rejected_status_id,
                    assigned_crew_id: record.assigned_crew_id,
                    area_id: record.area_id,
                },
            )
            .await?;
        return Ok((record.clone(), record.id));
    }

    require_positive_quantity(item.quantity)?;
    let destination = BulkTarget {
        sloc_id: record.sloc_id,
        location_id: record.location_id,
        assigned_crew_id: record.assigned_crew_id,
        area_id: record.area_id,
        item_type_id: record.item_type_id,
        status_id: rejected_status_id,
    };
    let outcome = transfer_bulk(store, &record, destination, item.quantity).await?;
    Ok((record, outcome.inventory_id))
}
