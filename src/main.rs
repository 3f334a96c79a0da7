use axum::{
    routing::{get, post},
    Router,
};
use dotenvy::dotenv;
use std::env;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use fieldstock::database::create_database_pool;
use fieldstock::handlers::{self, AppState};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    env_logger::init();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let db = create_database_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    log::info!("Database connection successful");

    let app = create_router(AppState::new(db));

    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);

    log::info!("fieldstock server starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Inventory operations
        .route("/api/inventory/receive", post(handlers::inventory::receive))
        .route("/api/inventory/issue", post(handlers::inventory::issue))
        .route("/api/inventory/return", post(handlers::inventory::return_stock))
        .route("/api/inventory/reject", post(handlers::inventory::reject))
        .route("/api/inventory/inspect", post(handlers::inventory::inspect))
        .route("/api/inventory/install", post(handlers::inventory::install))
        .route("/api/inventory/consolidate", post(handlers::inventory::consolidate))
        // Read side
        .route("/api/inventory/records", get(handlers::inventory::records_list))
        .route("/api/reference", get(handlers::inventory::reference_data))
        .route("/api/transactions", get(handlers::inventory::transactions_list))
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
