//! Return: stock comes back to the configured receiving location as
//! Available, with crew and area cleared. Partial returns split exactly like
//! partial issues.

use serde::{Deserialize, Serialize};

use crate::models::{InventoryRecord, NewTransactionRecord};
use crate::store::{AssignmentChange, InventoryStore};

use super::super::edge::{self, EdgeClient, EdgeOperation};
use super::super::error::InventoryError;
use super::super::reference::{ReferenceData, CONFIG_RECEIVING_LOCATION, STATUS_AVAILABLE};
use super::super::upsert::BulkTarget;
use super::{
    consolidate_scope, load_record, log_item_failure, log_transaction, require_positive_quantity,
    require_single_unit, transfer_bulk, ItemResult, OperationReport,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnItem {
    pub inventory_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnParams {
    pub sloc_id: i64,
    pub items: Vec<ReturnItem>,
    pub notes: Option<String>,
    pub user_name: String,
}

pub async fn execute(
    store: &dyn InventoryStore,
    refs: &ReferenceData,
    edge: Option<&dyn EdgeClient>,
    params: &ReturnParams,
) -> Result<OperationReport, InventoryError> {
    let location_name = store
        .config_value(CONFIG_RECEIVING_LOCATION)
        .await?
        .ok_or_else(|| {
            InventoryError::RequiredReferenceMissing(format!(
                "config '{CONFIG_RECEIVING_LOCATION}'"
            ))
        })?;
    let destination = refs.location_named(&location_name)?.clone();
    let available = refs.status_named(STATUS_AVAILABLE)?.clone();

    if let Some(report) = edge::try_remote(edge, EdgeOperation::Return, params).await {
        return Ok(report);
    }

    let mut report = OperationReport::default();

    for item in &params.items {
        match return_item(store, params, item, destination.id, available.id).await {
            Ok((record, inventory_id)) => {
                let mut entry = NewTransactionRecord::new(
                    "Return",
                    "Returned to warehouse",
                    &refs.item_type_name(record.item_type_id),
                    item.quantity,
                    &params.user_name,
                );
                entry.old_quantity = Some(record.quantity);
                entry.from_location = refs.location_name(record.location_id);
                entry.to_location = Some(destination.name.clone());
                entry.old_status = refs.status_name(record.status_id);
                entry.new_status = Some(available.name.clone());
                entry.old_crew = refs.crew_name(record.assigned_crew_id);
                entry.old_area = refs.area_name(record.area_id);
                entry.notes = params.notes.clone();
                log_transaction(store, entry).await;
                report.push(ItemResult::ok(inventory_id));
            }
            Err(err) => {
                log_item_failure("return", &format!("record {}", item.inventory_id), item.quantity, &err);
                report.push(ItemResult::failed(&err));
            }
        }
    }

    consolidate_scope(store, params.sloc_id).await;
    log::info!("return complete for sloc {}: {}", params.sloc_id, report.summary());
    Ok(report)
}

async fn return_item(
    store: &dyn InventoryStore,
    params: &ReturnParams,
    item: &ReturnItem,
    destination_location_id: i64,
    available_status_id: i64,
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
                    location_id: destination_location_id,
                    status_id: available_status_id,
                    assigned_crew_id: None,
                    area_id: None,
                },
            )
            .await?;
        return Ok((record.clone(), record.id));
    }

    require_positive_quantity(item.quantity)?;
    let destination = BulkTarget {
        sloc_id: record.sloc_id,
        location_id: destination_location_id,
        assigned_crew_id: None,
        area_id: None,
        item_type_id: record.item_type_id,
        status_id: available_status_id,
    };
    let outcome = transfer_bulk(store, &record, destination, item.quantity).await?;
    Ok((record, outcome.inventory_id))
}
