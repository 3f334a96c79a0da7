use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Append-only audit row. Names are denormalized snapshots so history stays
/// readable after the referenced entity is renamed or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TransactionRecord {
    pub id: i64,
    pub transaction_type: String,
    pub action: String,
    pub item_type_name: String,
    pub quantity: i64,
    pub old_quantity: Option<i64>,
    pub from_location: Option<String>,
    pub to_location: Option<String>,
    pub old_status: Option<String>,
    pub new_status: Option<String>,
    pub old_crew: Option<String>,
    pub new_crew: Option<String>,
    pub old_area: Option<String>,
    pub new_area: Option<String>,
    pub notes: Option<String>,
    pub user_name: String,
    pub date_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransactionRecord {
    pub transaction_type: String,
    pub action: String,
    pub item_type_name: String,
    pub quantity: i64,
    pub old_quantity: Option<i64>,
    pub from_location: Option<String>,
    pub to_location: Option<String>,
    pub old_status: Option<String>,
    pub new_status: Option<String>,
    pub old_crew: Option<String>,
    pub new_crew: Option<String>,
    pub old_area: Option<String>,
    pub new_area: Option<String>,
    pub notes: Option<String>,
    pub user_name: String,
}

impl NewTransactionRecord {
    pub fn new(
        transaction_type: &str,
        action: &str,
        item_type_name: &str,
        quantity: i64,
        user_name: &str,
    ) -> Self {
        Self {
            transaction_type: transaction_type.to_string(),
            action: action.to_string(),
            item_type_name: item_type_name.to_string(),
            quantity,
            old_quantity: None,
            from_location: None,
            to_location: None,
            old_status: None,
            new_status: None,
            old_crew: None,
            new_crew: None,
            old_area: None,
            new_area: None,
            notes: None,
            user_name: user_name.to_string(),
        }
    }
}
