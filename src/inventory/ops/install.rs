//! Field install: moves stock (or footage, for reel-tracked bulk types) to
//! the Field Installed location as Installed. Bulk installs split like
//! issues; serialized units move whole. Sequence numbers are bookkeeping on
//! the history entry, not part of quantity conservation.

use serde::{Deserialize, Serialize};

use crate::models::{InventoryRecord, NewTransactionRecord};
use crate::store::{AssignmentChange, InventoryStore};

use super::super::edge::{self, EdgeClient, EdgeOperation};
use super::super::error::InventoryError;
use super::super::reference::{ReferenceData, LOCATION_FIELD_INSTALLED, STATUS_INSTALLED};
use super::super::upsert::BulkTarget;
use super::{
    consolidate_scope, load_record, log_item_failure, log_transaction, require_positive_quantity,
    transfer_bulk, ItemResult, OperationReport,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallItem {
    pub inventory_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallParams {
    pub sloc_id: i64,
    pub items: Vec<InstallItem>,
    /// First sequence number of the run; each installed unit takes the next.
    pub sequence_start: Option<i64>,
    pub notes: Option<String>,
    pub user_name: String,
}

pub async fn execute(
    store: &dyn InventoryStore,
    refs: &ReferenceData,
    edge: Option<&dyn EdgeClient>,
    params: &InstallParams,
) -> Result<OperationReport, InventoryError> {
    let destination = refs.location_named(LOCATION_FIELD_INSTALLED)?.clone();
    let installed = refs.status_named(STATUS_INSTALLED)?.clone();

    if let Some(report) = edge::try_remote(edge, EdgeOperation::FieldInstall, params).await {
        return Ok(report);
    }

    let mut report = OperationReport::default();
    let mut next_sequence = params.sequence_start;

    for item in &params.items {
        match install_item(store, params, item, destination.id, installed.id).await {
            Ok((record, inventory_id)) => {
                let installed_quantity = if record.is_serialized() { 1 } else { item.quantity };
                let mut entry = NewTransactionRecord::new(
                    "Field Install",
                    "Installed in field",
                    &refs.item_type_name(record.item_type_id),
                    installed_quantity,
                    &params.user_name,
                );
                entry.old_quantity = Some(record.quantity);
                entry.from_location = refs.location_name(record.location_id);
                entry.to_location = Some(destination.name.clone());
                entry.old_status = refs.status_name(record.status_id);
                entry.new_status = Some(installed.name.clone());
                entry.old_crew = refs.crew_name(record.assigned_crew_id);
                entry.new_crew = refs.crew_name(record.assigned_crew_id);
                entry.old_area = refs.area_name(record.area_id);
                entry.new_area = refs.area_name(record.area_id);
                entry.notes = annotate_sequence(&params.notes, &mut next_sequence, installed_quantity);
                log_transaction(store, entry).await;
                report.push(ItemResult::ok(inventory_id));
            }
            Err(err) => {
                log_item_failure(
                    "field install",
                    &format!("record {}", item.inventory_id),
                    item.quantity,
                    &err,
                );
                report.push(ItemResult::failed(&err));
            }
        }
    }

    consolidate_scope(store, params.sloc_id).await;
    log::info!(
        "field install complete for sloc {}: {}",
        params.sloc_id,
        report.summary()
    );
    Ok(report)
}

/// Appends the consumed sequence range to the item's history notes and
/// advances the running counter.
fn annotate_sequence(
    notes: &Option<String>,
    next_sequence: &mut Option<i64>,
    quantity: i64,
) -> Option<String> {
    let Some(start) = *next_sequence else {
        return notes.clone();
    };
    let end = start + quantity - 1;
    *next_sequence = Some(end + 1);
    let range = if start == end {
        format!("seq {start}")
    } else {
        format!("seq {start}-{end}")
    };
    Some(match notes {
        Some(notes) => format!("{notes} ({range})"),
        None => range,
    })
}

async fn install_item(
    store: &dyn InventoryStore,
    params: &InstallParams,
    item: &InstallItem,
    destination_location_id: i64,
    installed_status_id: i64,
) -> Result<(InventoryRecord, i64), InventoryError> {
    let record = load_record(store, item.inventory_id).await?;
    if record.sloc_id != params.sloc_id {
        return Err(InventoryError::Validation(format!(
            "record {} belongs to sloc {}, not sloc {}",
            record.id, record.sloc_id, params.sloc_id
        )));
    }

    if record.is_serialized() {
        store
            .update_assignment(
                record.id,
                AssignmentChange {
                    location_id: destination_location_id,
                    status_id: installed_status_id,
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
        location_id: destination_location_id,
        assigned_crew_id: record.assigned_crew_id,
        area_id: record.area_id,
        item_type_id: record.item_type_id,
        status_id: installed_status_id,
    };
    let outcome = transfer_bulk(store, &record, destination, item.quantity).await?;
    Ok((record, outcome.inventory_id))
}
