pub mod inventory;

use std::sync::Arc;

use axum::http::StatusCode;

use crate::database::Database;
use crate::inventory::edge::EdgeClient;
use crate::inventory::InventoryError;
use crate::store::StoreError;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    /// Remote edge-function client, when the deployment has one configured.
    pub edge: Option<Arc<dyn EdgeClient>>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db, edge: None }
    }
}

pub async fn health() -> &'static str {
    "ok"
}

pub(crate) fn error_status(err: InventoryError) -> StatusCode {
    log::error!("inventory operation failed: {err}");
    match err {
        InventoryError::Validation(_) | InventoryError::InsufficientQuantity { .. } => {
            StatusCode::BAD_REQUEST
        }
        InventoryError::RecordNotFound => StatusCode::NOT_FOUND,
        InventoryError::RequiredReferenceMissing(_) => StatusCode::UNPROCESSABLE_ENTITY,
        InventoryError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn store_error(err: StoreError) -> StatusCode {
    log::error!("store access failed: {err}");
    StatusCode::INTERNAL_SERVER_ERROR
}
