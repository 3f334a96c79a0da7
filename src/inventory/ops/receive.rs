//! Receive: stock arriving at the configured receiving location. Serialized
//! items land as one record per unit; bulk items merge into the destination
//! group.

use serde::{Deserialize, Serialize};

use crate::models::{NewInventoryRecord, NewTransactionRecord};
use crate::store::InventoryStore;

use super::super::edge::{self, EdgeClient, EdgeOperation};
use super::super::error::InventoryError;
use super::super::reference::{
    ReferenceData, CONFIG_RECEIVING_LOCATION, CONFIG_RECEIVING_STATUS,
};
use super::super::upsert::{upsert_bulk_quantity, BulkTarget, UpsertMode};
use super::{
    consolidate_scope, log_item_failure, log_transaction, require_positive_quantity, ItemResult,
    OperationReport,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiveItem {
    pub item_type_id: i64,
    pub quantity: i64,
    pub mfgrsn: Option<String>,
    pub tilsonsn: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiveParams {
    pub sloc_id: i64,
    pub items: Vec<ReceiveItem>,
    pub notes: Option<String>,
    pub user_name: String,
}

pub async fn execute(
    store: &dyn InventoryStore,
    refs: &ReferenceData,
    edge: Option<&dyn EdgeClient>,
    params: &ReceiveParams,
) -> Result<OperationReport, InventoryError> {
    // Destination comes from configuration; without it there is no safe
    // partial result, so the whole operation aborts before any write.
    let location_name = store
        .config_value(CONFIG_RECEIVING_LOCATION)
        .await?
        .ok_or_else(|| {
            InventoryError::RequiredReferenceMissing(format!(
                "config '{CONFIG_RECEIVING_LOCATION}'"
            ))
        })?;
    let status_name = store
        .config_value(CONFIG_RECEIVING_STATUS)
        .await?
        .ok_or_else(|| {
            InventoryError::RequiredReferenceMissing(format!("config '{CONFIG_RECEIVING_STATUS}'"))
        })?;
    let location = refs.location_named(&location_name)?.clone();
    let status = refs.status_named(&status_name)?.clone();

    if let Some(report) = edge::try_remote(edge, EdgeOperation::Receive, params).await {
        return Ok(report);
    }

    let mut report = OperationReport::default();

    for item in &params.items {
        let result = receive_item(store, refs, params, item, location.id, status.id).await;
        match result {
            Ok(inventory_id) => {
                let mut entry = NewTransactionRecord::new(
                    "Receive",
                    "Received",
                    &refs.item_type_name(item.item_type_id),
                    item.quantity,
                    &params.user_name,
                );
                entry.to_location = Some(location.name.clone());
                entry.new_status = Some(status.name.clone());
                entry.notes = params.notes.clone();
                log_transaction(store, entry).await;
                report.push(ItemResult::ok(inventory_id));
            }
            Err(err) => {
                log_item_failure(
                    "receive",
                    &refs.item_type_name(item.item_type_id),
                    item.quantity,
                    &err,
                );
                report.push(ItemResult::failed(&err));
            }
        }
    }

    consolidate_scope(store, params.sloc_id).await;
    log::info!("receive complete for sloc {}: {}", params.sloc_id, report.summary());
    Ok(report)
}

async fn receive_item(
    store: &dyn InventoryStore,
    refs: &ReferenceData,
    params: &ReceiveParams,
    item: &ReceiveItem,
    location_id: i64,
    status_id: i64,
) -> Result<i64, InventoryError> {
    if refs.item_type(item.item_type_id).is_none() {
        return Err(InventoryError::RequiredReferenceMissing(format!(
            "item type {}",
            item.item_type_id
        )));
    }

    if refs.is_serialized_type(item.item_type_id) {
        if item.mfgrsn.is_none() && item.tilsonsn.is_none() {
            return Err(InventoryError::Validation(
                "serialized items require a manufacturer or internal serial number".to_string(),
            ));
        }
        if item.quantity != 1 {
            return Err(InventoryError::Validation(
                "serialized items are received one unit per serial".to_string(),
            ));
        }
        let record = store
            .insert_record(NewInventoryRecord {
                item_type_id: item.item_type_id,
                quantity: 1,
                location_id,
                status_id,
                sloc_id: params.sloc_id,
                assigned_crew_id: None,
                area_id: None,
                mfgrsn: item.mfgrsn.clone(),
                tilsonsn: item.tilsonsn.clone(),
            })
            .await?;
        return Ok(record.id);
    }

    require_positive_quantity(item.quantity)?;
    let target = BulkTarget {
        sloc_id: params.sloc_id,
        location_id,
        assigned_crew_id: None,
        area_id: None,
        item_type_id: item.item_type_id,
        status_id,
    };
    let outcome = upsert_bulk_quantity(store, &target, item.quantity, UpsertMode::Add).await?;
    Ok(outcome.inventory_id)
}
