//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_store;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::time::Duration;
use stockmanager::config::{Config, SecureString};
use stockmanager::record::{Category, NewRecord, Record, RecordForm, RecordPatch};
use stockmanager::remote::{RecordStore, StoreError};
use tempfile::TempDir;

/// Config pointing at a local mock server.
pub fn mock_config(base_url: &str, token: Option<&str>) -> Config {
    let mut config = Config::default();
    config.store.api_host = Some(base_url.to_string());
    config.store.token = token.map(|t| SecureString::new(t.to_string()));
    config.defaults.timeout_seconds = 5;
    config.defaults.connect_timeout_seconds = 2;
    config
}

/// Write `content` to a fresh `config.toml`.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn new_record(name: &str, sku: &str, quantity: u32) -> NewRecord {
    NewRecord {
        name: name.to_string(),
        sku: sku.to_string(),
        category: Category::Visseries,
        quantity,
        min_quantity: 5,
        price: 2.5,
        supplier: Some("Acme".to_string()),
        description: None,
    }
}

pub fn valid_form(name: &str, sku: &str, quantity: i64) -> RecordForm {
    RecordForm {
        name: name.to_string(),
        sku: sku.to_string(),
        category: Some(Category::Consommables),
        quantity,
        min_quantity: 5,
        price: 10.0,
        ..RecordForm::default()
    }
}

/// A stored document as the remote store would return it.
pub fn stored_document(id: &str, name: &str, quantity: u32) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "_type": "stockItem",
        "_rev": "r1",
        "_createdAt": "2024-03-01T10:00:00Z",
        "_updatedAt": "2024-03-02T10:00:00Z",
        "name": name,
        "sku": format!("SKU-{id}"),
        "category": "Electricité",
        "quantity": quantity,
        "minQuantity": 5,
        "price": 12.5,
        "supplier": "Acme"
    })
}

// -- FakeStore ----------------------------------------------------------------

/// Per-operation call counters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Calls {
    pub list_all: usize,
    pub get_by_id: usize,
    pub search: usize,
    pub create: usize,
    pub update: usize,
    pub delete: usize,
}

impl Calls {
    pub fn total(&self) -> usize {
        self.list_all + self.get_by_id + self.search + self.create + self.update + self.delete
    }
}

#[derive(Default)]
struct FakeInner {
    records: Vec<Record>,
    next_id: usize,
    calls: Calls,
    read_delays: VecDeque<Duration>,
    failures: VecDeque<(u16, String)>,
}

/// In-memory [`RecordStore`] with the remote store's semantics.
///
/// Identities are `rec-N`; every write advances a fake clock by one second.
pub struct FakeStore {
    inner: Mutex<FakeInner>,
    writable: bool,
}

impl FakeStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(FakeInner::default()),
            writable: true,
        }
    }

    /// A store with no write token.
    pub fn read_only() -> Self {
        Self {
            writable: false,
            ..Self::new()
        }
    }

    /// Seeds records directly, bypassing the call counters.
    pub fn seeded(payloads: &[NewRecord]) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.lock();
            for payload in payloads {
                let record = inner.insert(payload);
                inner.records.push(record);
            }
        }
        store
    }

    pub fn calls(&self) -> Calls {
        self.inner.lock().calls.clone()
    }

    /// Delays applied to the next list or search calls, in order.
    pub fn delay_reads(&self, delays: &[u64]) {
        self.inner
            .lock()
            .read_delays
            .extend(delays.iter().map(|ms| Duration::from_millis(*ms)));
    }

    /// Makes the next call fail with a remote error.
    pub fn fail_next(&self, status: u16, message: &str) {
        self.inner
            .lock()
            .failures
            .push_back((status, message.to_string()));
    }

    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    fn take_failure(&self) -> Result<(), StoreError> {
        match self.inner.lock().failures.pop_front() {
            Some((status, message)) => Err(StoreError::Remote { status, message }),
            None => Ok(()),
        }
    }

    async fn read_delay(&self) {
        let delay = self.inner.lock().read_delays.pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn newest_first(records: &[Record]) -> Vec<Record> {
        let mut sorted = records.to_vec();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sorted
    }

    fn check_writable(&self, operation: &'static str) -> Result<(), StoreError> {
        if self.writable {
            Ok(())
        } else {
            Err(StoreError::Authorization { operation })
        }
    }
}

impl FakeInner {
    fn tick(&mut self) -> DateTime<Utc> {
        self.next_id += 1;
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
            + ChronoDuration::seconds(self.next_id as i64)
    }

    fn insert(&mut self, payload: &NewRecord) -> Record {
        let now = self.tick();
        Record {
            id: format!("rec-{}", self.next_id),
            created_at: now,
            updated_at: now,
            name: payload.name.clone(),
            sku: payload.sku.clone(),
            category: payload.category,
            quantity: payload.quantity,
            min_quantity: payload.min_quantity,
            price: payload.price,
            supplier: payload.supplier.clone(),
            description: payload.description.clone(),
        }
    }
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn list_all(&self) -> Result<Vec<Record>, StoreError> {
        self.inner.lock().calls.list_all += 1;
        self.read_delay().await;
        self.take_failure()?;
        Ok(Self::newest_first(&self.inner.lock().records))
    }

    async fn get_by_id(&self, id: &str) -> Result<Record, StoreError> {
        self.inner.lock().calls.get_by_id += 1;
        self.take_failure()?;
        self.inner
            .lock()
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<Record>, StoreError> {
        self.take_failure()?;
        let inner = self.inner.lock();
        let matching: Vec<Record> = inner
            .records
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect();
        Ok(Self::newest_first(&matching))
    }

    async fn search(&self, text: &str) -> Result<Vec<Record>, StoreError> {
        self.inner.lock().calls.search += 1;
        self.read_delay().await;
        self.take_failure()?;
        let needle = text.trim().to_lowercase();
        let inner = self.inner.lock();
        let matching: Vec<Record> = inner
            .records
            .iter()
            .filter(|r| {
                r.name.to_lowercase().contains(&needle)
                    || r.sku.to_lowercase().contains(&needle)
                    || r.category.label().to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        Ok(Self::newest_first(&matching))
    }

    async fn create(&self, payload: &NewRecord) -> Result<Record, StoreError> {
        self.inner.lock().calls.create += 1;
        self.check_writable("create")?;
        self.take_failure()?;
        let mut inner = self.inner.lock();
        let record = inner.insert(payload);
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, patch: &RecordPatch) -> Result<Record, StoreError> {
        self.inner.lock().calls.update += 1;
        self.check_writable("update")?;
        self.take_failure()?;
        let mut inner = self.inner.lock();
        let now = inner.tick();
        let record = inner
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        patch.apply_to(record);
        record.updated_at = now;
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.inner.lock().calls.delete += 1;
        self.check_writable("delete")?;
        self.take_failure()?;
        let mut inner = self.inner.lock();
        let before = inner.records.len();
        inner.records.retain(|r| r.id != id);
        if inner.records.len() == before {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        Ok(())
    }
}
