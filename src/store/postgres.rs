use async_trait::async_trait;

use crate::database::Database;
use crate::inventory::key::EquivalenceKey;
use crate::inventory::reference::ReferenceData;
use crate::models::{InventoryRecord, NewInventoryRecord, NewTransactionRecord, TransactionRecord};

use super::{AssignmentChange, InventoryStore, StoreError};

#[derive(Clone)]
pub struct PostgresStore {
    pool: Database,
}

impl PostgresStore {
    pub fn new(pool: Database) -> Self {
        Self { pool }
    }

    /// Loads the read-only reference tables into a snapshot that orchestrator
    /// calls receive by value instead of reaching into a shared cache.
    pub async fn load_reference_data(&self) -> Result<ReferenceData, StoreError> {
        let item_types =
            sqlx::query_as("SELECT id, name, inventory_type_id FROM item_types ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        let statuses = sqlx::query_as("SELECT id, name FROM statuses ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        let locations = sqlx::query_as("SELECT id, name FROM locations ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        let crews = sqlx::query_as("SELECT id, name FROM crews ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        let areas = sqlx::query_as("SELECT id, name FROM areas ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(ReferenceData {
            item_types,
            statuses,
            locations,
            crews,
            areas,
        })
    }
}

#[async_trait]
impl InventoryStore for PostgresStore {
    async fn bulk_records(&self, sloc_id: i64) -> Result<Vec<InventoryRecord>, StoreError> {
        let records = sqlx::query_as::<_, InventoryRecord>(
            "SELECT * FROM inventory
             WHERE sloc_id = $1 AND mfgrsn IS NULL AND tilsonsn IS NULL
             ORDER BY id",
        )
        .bind(sloc_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn find_bulk_by_key(
        &self,
        sloc_id: i64,
        key: &EquivalenceKey,
    ) -> Result<Option<InventoryRecord>, StoreError> {
        // IS NOT DISTINCT FROM so a NULL crew/area matches a NULL bind.
        let record = sqlx::query_as::<_, InventoryRecord>(
            "SELECT * FROM inventory
             WHERE sloc_id = $1
               AND location_id = $2
               AND item_type_id = $3
               AND status_id = $4
               AND assigned_crew_id IS NOT DISTINCT FROM $5
               AND area_id IS NOT DISTINCT FROM $6
               AND mfgrsn IS NULL AND tilsonsn IS NULL
             ORDER BY id
             LIMIT 1",
        )
        .bind(sloc_id)
        .bind(key.location_id)
        .bind(key.item_type_id)
        .bind(key.status_id)
        .bind(key.assigned_crew_id)
        .bind(key.area_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn record(&self, id: i64) -> Result<Option<InventoryRecord>, StoreError> {
        let record = sqlx::query_as::<_, InventoryRecord>("SELECT * FROM inventory WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn records(&self, sloc_id: i64) -> Result<Vec<InventoryRecord>, StoreError> {
        let records = sqlx::query_as::<_, InventoryRecord>(
            "SELECT * FROM inventory WHERE sloc_id = $1 ORDER BY id",
        )
        .bind(sloc_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn insert_record(
        &self,
        new: NewInventoryRecord,
    ) -> Result<InventoryRecord, StoreError> {
        let record = sqlx::query_as::<_, InventoryRecord>(
            "INSERT INTO inventory (
                item_type_id, quantity, location_id, status_id, sloc_id,
                assigned_crew_id, area_id, mfgrsn, tilsonsn, created_at, updated_at
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW())
             RETURNING *",
        )
        .bind(new.item_type_id)
        .bind(new.quantity)
        .bind(new.location_id)
        .bind(new.status_id)
        .bind(new.sloc_id)
        .bind(new.assigned_crew_id)
        .bind(new.area_id)
        .bind(&new.mfgrsn)
        .bind(&new.tilsonsn)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn update_quantity(&self, id: i64, quantity: i64) -> Result<(), StoreError> {
        sqlx::query("UPDATE inventory SET quantity = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(quantity)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_assignment(
        &self,
        id: i64,
        change: AssignmentChange,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE inventory
             SET location_id = $2, status_id = $3, assigned_crew_id = $4, area_id = $5,
                 updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(change.location_id)
        .bind(change.status_id)
        .bind(change.assigned_crew_id)
        .bind(change.area_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_record(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM inventory WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn config_value(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM app_config WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    async fn append_transaction(&self, entry: NewTransactionRecord) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO transactions (
                transaction_type, action, item_type_name, quantity, old_quantity,
                from_location, to_location, old_status, new_status,
                old_crew, new_crew, old_area, new_area, notes, user_name, date_time
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, NOW())",
        )
        .bind(&entry.transaction_type)
        .bind(&entry.action)
        .bind(&entry.item_type_name)
        .bind(entry.quantity)
        .bind(entry.old_quantity)
        .bind(&entry.from_location)
        .bind(&entry.to_location)
        .bind(&entry.old_status)
        .bind(&entry.new_status)
        .bind(&entry.old_crew)
        .bind(&entry.new_crew)
        .bind(&entry.old_area)
        .bind(&entry.new_area)
        .bind(&entry.notes)
        .bind(&entry.user_name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn transactions(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        let rows = sqlx::query_as::<_, TransactionRecord>(
            "SELECT * FROM transactions ORDER BY date_time DESC, id DESC LIMIT 500",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
