pub mod database;
pub mod handlers;
pub mod inventory;
pub mod models;
pub mod store;
