use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sectorgrid_core::InventorySource;
use sectorgrid_domain::{InventorySnapshot, Record, Result as DomainResult, SectorGridError};

/// In-memory mock for `InventorySource`.
///
/// Serves a fixed column list and record set. Can be switched into a failing
/// state to exercise the error path, and counts how often it was read.
#[derive(Clone)]
pub struct MockInventorySource {
    columns: Vec<String>,
    records: Arc<Mutex<Vec<Record>>>,
    failure: Arc<Mutex<Option<SectorGridError>>>,
    loads: Arc<AtomicUsize>,
}

impl MockInventorySource {
    /// Create a mock exposing every logical field.
    pub fn new(records: Vec<Record>) -> Self {
        Self::with_columns(&["sector", "code", "quantity", "description"], records)
    }

    /// Create a mock with an explicit column list.
    pub fn with_columns(columns: &[&str], records: Vec<Record>) -> Self {
        Self {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            records: Arc::new(Mutex::new(records)),
            failure: Arc::new(Mutex::new(None)),
            loads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Make every subsequent load fail with `error`.
    pub fn fail_with(&self, error: SectorGridError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InventorySource for MockInventorySource {
    async fn load_snapshot(&self) -> DomainResult<Arc<InventorySnapshot>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.failure.lock().unwrap().clone() {
            return Err(error);
        }
        let records = self.records.lock().unwrap().clone();
        Ok(Arc::new(InventorySnapshot::new(self.columns.clone(), records)))
    }

    async fn check_health(&self) -> DomainResult<()> {
        match self.failure.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// The four-row example used across the pipeline tests.
pub fn scenario_records() -> Vec<Record> {
    vec![
        Record::new("A1", "SKU1", 5),
        Record::new("A1", "SKU1", 3),
        Record::new("A1", "SKU2", 2),
        Record::new("B2", "SKU1", 1),
    ]
}
