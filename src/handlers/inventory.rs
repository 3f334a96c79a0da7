use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use crate::inventory::ops::inspect::InspectParams;
use crate::inventory::ops::install::InstallParams;
use crate::inventory::ops::issue::IssueParams;
use crate::inventory::ops::receive::ReceiveParams;
use crate::inventory::ops::reject::RejectParams;
use crate::inventory::ops::returns::ReturnParams;
use crate::inventory::{
    consolidate_bulk_inventory, ops, ConsolidationReport, OperationReport, ReferenceData,
};
use crate::models::{InventoryRecord, TransactionRecord};
use crate::store::{InventoryStore, PostgresStore};

use super::{error_status, store_error, AppState};

#[derive(Deserialize)]
pub struct SlocQuery {
    pub sloc_id: i64,
}

pub async fn receive(
    State(state): State<AppState>,
    Json(params): Json<ReceiveParams>,
) -> Result<Json<OperationReport>, StatusCode> {
    let store = PostgresStore::new(state.db.clone());
    let refs = store.load_reference_data().await.map_err(store_error)?;
    let report = ops::receive::execute(&store, &refs, state.edge.as_deref(), &params)
        .await
        .map_err(error_status)?;
    Ok(Json(report))
}

pub async fn issue(
    State(state): State<AppState>,
    Json(params): Json<IssueParams>,
) -> Result<Json<OperationReport>, StatusCode> {
    let store = PostgresStore::new(state.db.clone());
    let refs = store.load_reference_data().await.map_err(store_error)?;
    let report = ops::issue::execute(&store, &refs, state.edge.as_deref(), &params)
        .await
        .map_err(error_status)?;
    Ok(Json(report))
}

pub async fn return_stock(
    State(state): State<AppState>,
    Json(params): Json<ReturnParams>,
) -> Result<Json<OperationReport>, StatusCode> {
    let store = PostgresStore::new(state.db.clone());
    let refs = store.load_reference_data().await.map_err(store_error)?;
    let report = ops::returns::execute(&store, &refs, state.edge.as_deref(), &params)
        .await
        .map_err(error_status)?;
    Ok(Json(report))
}

pub async fn reject(
    State(state): State<AppState>,
    Json(params): Json<RejectParams>,
) -> Result<Json<OperationReport>, StatusCode> {
    let store = PostgresStore::new(state.db.clone());
    let refs = store.load_reference_data().await.map_err(store_error)?;
    let report = ops::reject::execute(&store, &refs, state.edge.as_deref(), &params)
        .await
        .map_err(error_status)?;
    Ok(Json(report))
}

pub async fn inspect(
    State(state): State<AppState>,
    Json(params): Json<InspectParams>,
) -> Result<Json<OperationReport>, StatusCode> {
    let store = PostgresStore::new(state.db.clone());
    let refs = store.load_reference_data().await.map_err(store_error)?;
    let report = ops::inspect::execute(&store, &refs, state.edge.as_deref(), &params)
        .await
        .map_err(error_status)?;
    Ok(Json(report))
}

pub async fn install(
    State(state): State<AppState>,
    Json(params): Json<InstallParams>,
) -> Result<Json<OperationReport>, StatusCode> {
    let store = PostgresStore::new(state.db.clone());
    let refs = store.load_reference_data().await.map_err(store_error)?;
    let report = ops::install::execute(&store, &refs, state.edge.as_deref(), &params)
        .await
        .map_err(error_status)?;
    Ok(Json(report))
}

pub async fn consolidate(
    State(state): State<AppState>,
    Json(query): Json<SlocQuery>,
) -> Result<Json<ConsolidationReport>, StatusCode> {
    let store = PostgresStore::new(state.db.clone());
    let report = consolidate_bulk_inventory(&store, query.sloc_id)
        .await
        .map_err(error_status)?;
    Ok(Json(report))
}

pub async fn records_list(
    State(state): State<AppState>,
    Query(query): Query<SlocQuery>,
) -> Result<Json<Vec<InventoryRecord>>, StatusCode> {
    let store = PostgresStore::new(state.db.clone());
    let records = store.records(query.sloc_id).await.map_err(store_error)?;
    Ok(Json(records))
}

pub async fn reference_data(
    State(state): State<AppState>,
) -> Result<Json<ReferenceData>, StatusCode> {
    let store = PostgresStore::new(state.db.clone());
    let refs = store.load_reference_data().await.map_err(store_error)?;
    Ok(Json(refs))
}

pub async fn transactions_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<TransactionRecord>>, StatusCode> {
    let store = PostgresStore::new(state.db.clone());
    let rows = store.transactions().await.map_err(store_error)?;
    Ok(Json(rows))
}
