//! Issue: hands stock to a crew. Bulk issues split the source group —
//! the issued units move to an Issued/With Crew group keyed by crew and area,
//! anything left stays behind at the source. Serialized units move in place.

use serde::{Deserialize, Serialize};

use crate::models::{InventoryRecord, NewTransactionRecord};
use crate::store::{AssignmentChange, InventoryStore};

use super::super::edge::{self, EdgeClient, EdgeOperation};
use super::super::error::InventoryError;
use super::super::reference::{ReferenceData, LOCATION_WITH_CREW, STATUS_ISSUED};
use super::super::upsert::BulkTarget;
use super::{
    consolidate_scope, load_record, log_item_failure, log_transaction, require_positive_quantity,
    require_single_unit, transfer_bulk, ItemResult, OperationReport,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueItem {
    pub inventory_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueParams {
    pub sloc_id: i64,
    pub items: Vec<IssueItem>,
    pub crew_id: i64,
    pub area_id: Option<i64>,
    pub notes: Option<String>,
    pub user_name: String,
}

pub async fn execute(
    store: &dyn InventoryStore,
    refs: &ReferenceData,
    edge: Option<&dyn EdgeClient>,
    params: &IssueParams,
) -> Result<OperationReport, InventoryError> {
    let destination = refs.location_named(LOCATION_WITH_CREW)?.clone();
    let issued = refs.status_named(STATUS_ISSUED)?.clone();
    let crew = refs.crew(params.crew_id)?.clone();

    if let Some(report) = edge::try_remote(edge, EdgeOperation::Issue, params).await {
        return Ok(report);
    }

    let mut report = OperationReport::default();

    for item in &params.items {
        match issue_item(store, params, item, destination.id, issued.id).await {
            Ok((record, inventory_id)) => {
                let mut entry = NewTransactionRecord::new(
                    "Issue",
                    "Issued to crew",
                    &refs.item_type_name(record.item_type_id),
                    item.quantity,
                    &params.user_name,
                );
                entry.old_quantity = Some(record.quantity);
                entry.from_location = refs.location_name(record.location_id);
                entry.to_location = Some(destination.name.clone());
                entry.old_status = refs.status_name(record.status_id);
                entry.new_status = Some(issued.name.clone());
                entry.old_crew = refs.crew_name(record.assigned_crew_id);
                entry.new_crew = Some(crew.name.clone());
                entry.old_area = refs.area_name(record.area_id);
                entry.new_area = refs.area_name(params.area_id);
                entry.notes = params.notes.clone();
                log_transaction(store, entry).await;
                report.push(ItemResult::ok(inventory_id));
            }
            Err(err) => {
                log_item_failure("issue", &format!("record {}", item.inventory_id), item.quantity, &err);
                report.push(ItemResult::failed(&err));
            }
        }
    }

    consolidate_scope(store, params.sloc_id).await;
    log::info!("issue complete for sloc {}: {}", params.sloc_id, report.summary());
    Ok(report)
}

/// Returns the pre-operation record (for the history snapshot) and the id of
/// the record now carrying the issued units.
async fn issue_item(
    store: &dyn InventoryStore,
    params: &IssueParams,
    item: &IssueItem,
    destination_location_id: i64,
    issued_status_id: i64,
) -> Result<(InventoryRecord, i64), InventoryError> {
    let record = load_record(store, item.inventory_id).await?;
    if record.sloc_id != params.sloc_id {
        return Err(InventoryError::Validation(format!(
            "record {} belongs to sloc {}, not sloc {}",
            record.id, record.sloc_id, params.sloc_id
        )));
    }

    if record.is_serialized() {
        // 1-for-1: the same record changes hands, no quantity arithmetic.
        require_single_unit(item.quantity)?;
        store
            .update_assignment(
                record.id,
                AssignmentChange {
                    location_id: destination_location_id,
                    status_id: issued_status_id,
                    assigned_crew_id: Some(params.crew_id),
                    area_id: params.area_id,
                },
            )
            .await?;
        return Ok((record.clone(), record.id));
    }

    require_positive_quantity(item.quantity)?;
    let destination = BulkTarget {
        sloc_id: record.sloc_id,
        location_id: destination_location_id,
        assigned_crew_id: Some(params.crew_id),
        area_id: params.area_id,
        item_type_id: record.item_type_id,
        status_id: issued_status_id,
    };
    let outcome = transfer_bulk(store, &record, destination, item.quantity).await?;
    Ok((record, outcome.inventory_id))
}
