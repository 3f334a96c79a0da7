//! In-memory store used by the test suites. Mirrors the Postgres store's
//! observable behavior: ascending synthetic ids, `updated_at` refresh on
//! quantity writes, null-safe key matching.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::inventory::key::EquivalenceKey;
use crate::models::{InventoryRecord, NewInventoryRecord, NewTransactionRecord, TransactionRecord};

use super::{AssignmentChange, InventoryStore, StoreError};

#[derive(Default)]
struct Inner {
    next_record_id: i64,
    next_transaction_id: i64,
    records: Vec<InventoryRecord>,
    config: HashMap<String, String>,
    transactions: Vec<TransactionRecord>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    fail_quantity_updates: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_config(&self, key: &str, value: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.config.insert(key.to_string(), value.to_string());
    }

    pub fn seed_record(&self, new: NewInventoryRecord) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        let record = materialize(&mut inner, new);
        let id = record.id;
        inner.records.push(record);
        id
    }

    /// When set, every quantity update fails with a store error. Lets tests
    /// exercise the continue-on-error paths.
    pub fn set_fail_quantity_updates(&self, fail: bool) {
        self.fail_quantity_updates.store(fail, Ordering::SeqCst);
    }

    pub fn records_snapshot(&self) -> Vec<InventoryRecord> {
        let mut records = self.inner.lock().unwrap().records.clone();
        records.sort_by_key(|r| r.id);
        records
    }

    pub fn transaction_log(&self) -> Vec<TransactionRecord> {
        self.inner.lock().unwrap().transactions.clone()
    }

    pub fn total_quantity(&self, sloc_id: i64) -> i64 {
        self.inner
            .lock()
            .unwrap()
            .records
            .iter()
            .filter(|r| r.sloc_id == sloc_id)
            .map(|r| r.quantity)
            .sum()
    }
}

fn materialize(inner: &mut Inner, new: NewInventoryRecord) -> InventoryRecord {
    inner.next_record_id += 1;
    let now = Utc::now();
    InventoryRecord {
        id: inner.next_record_id,
        item_type_id: new.item_type_id,
        quantity: new.quantity,
        location_id: new.location_id,
        status_id: new.status_id,
        sloc_id: new.sloc_id,
        assigned_crew_id: new.assigned_crew_id,
        area_id: new.area_id,
        mfgrsn: new.mfgrsn,
        tilsonsn: new.tilsonsn,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn bulk_records(&self, sloc_id: i64) -> Result<Vec<InventoryRecord>, StoreError> {
        let mut records: Vec<InventoryRecord> = self
            .inner
            .lock()
            .unwrap()
            .records
            .iter()
            .filter(|r| r.sloc_id == sloc_id && r.is_bulk())
            .cloned()
            .collect();
        records.sort_by_key(|r| r.id);
        Ok(records)
    }

    async fn find_bulk_by_key(
        &self,
        sloc_id: i64,
        key: &EquivalenceKey,
    ) -> Result<Option<InventoryRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut matches: Vec<&InventoryRecord> = inner
            .records
            .iter()
            .filter(|r| r.sloc_id == sloc_id && r.is_bulk() && EquivalenceKey::of(r) == *key)
            .collect();
        matches.sort_by_key(|r| r.id);
        Ok(matches.first().map(|r| (*r).clone()))
    }

    async fn record(&self, id: i64) -> Result<Option<InventoryRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.records.iter().find(|r| r.id == id).cloned())
    }

    async fn records(&self, sloc_id: i64) -> Result<Vec<InventoryRecord>, StoreError> {
        let mut records: Vec<InventoryRecord> = self
            .inner
            .lock()
            .unwrap()
            .records
            .iter()
            .filter(|r| r.sloc_id == sloc_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.id);
        Ok(records)
    }

    async fn insert_record(
        &self,
        new: NewInventoryRecord,
    ) -> Result<InventoryRecord, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let record = materialize(&mut inner, new);
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn update_quantity(&self, id: i64, quantity: i64) -> Result<(), StoreError> {
        if self.fail_quantity_updates.load(Ordering::SeqCst) {
            return Err(StoreError("quantity update rejected by test flag".into()));
        }
        let mut inner = self.inner.lock().unwrap();
        let record = inner
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError(format!("no inventory record with id {id}")))?;
        record.quantity = quantity;
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn update_assignment(
        &self,
        id: i64,
        change: AssignmentChange,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let record = inner
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError(format!("no inventory record with id {id}")))?;
        record.location_id = change.location_id;
        record.status_id = change.status_id;
        record.assigned_crew_id = change.assigned_crew_id;
        record.area_id = change.area_id;
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_record(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.records.len();
        inner.records.retain(|r| r.id != id);
        if inner.records.len() == before {
            return Err(StoreError(format!("no inventory record with id {id}")));
        }
        Ok(())
    }

    async fn config_value(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.lock().unwrap().config.get(key).cloned())
    }

    async fn append_transaction(&self, entry: NewTransactionRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_transaction_id += 1;
        let row = TransactionRecord {
            id: inner.next_transaction_id,
            transaction_type: entry.transaction_type,
            action: entry.action,
            item_type_name: entry.item_type_name,
            quantity: entry.quantity,
            old_quantity: entry.old_quantity,
            from_location: entry.from_location,
            to_location: entry.to_location,
            old_status: entry.old_status,
            new_status: entry.new_status,
            old_crew: entry.old_crew,
            new_crew: entry.new_crew,
            old_area: entry.old_area,
            new_area: entry.new_area,
            notes: entry.notes,
            user_name: entry.user_name,
            date_time: Utc::now(),
        };
        inner.transactions.push(row);
        Ok(())
    }

    async fn transactions(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        let mut rows = self.inner.lock().unwrap().transactions.clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }
}
