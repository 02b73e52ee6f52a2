//! Shared fixtures for the app integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use sectorgrid_core::InventorySource;
use sectorgrid_domain::{
    Config, InventorySnapshot, Record, Result as DomainResult, SectorGridError,
};
use sectorgrid_lib::{router, AppContext};
use tempfile::TempDir;
use tower::ServiceExt;

/// In-memory inventory source with a switchable failure.
#[derive(Clone, Default)]
pub struct StubSource {
    columns: Vec<String>,
    records: Arc<Mutex<Vec<Record>>>,
    failure: Arc<Mutex<Option<SectorGridError>>>,
    loads: Arc<AtomicUsize>,
}

impl StubSource {
    pub fn new(records: Vec<Record>) -> Self {
        Self::with_columns(&["sector", "code", "quantity", "description"], records)
    }

    pub fn with_columns(columns: &[&str], records: Vec<Record>) -> Self {
        Self {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            records: Arc::new(Mutex::new(records)),
            ..Self::default()
        }
    }

    /// Replace the rows served by the next load.
    pub fn set_records(&self, records: Vec<Record>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn fail_with(&self, error: SectorGridError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InventorySource for StubSource {
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

/// The four-row example inventory.
pub fn scenario_records() -> Vec<Record> {
    vec![
        Record::new("A1", "SKU1", 5).with_description("pallet"),
        Record::new("A1", "SKU1", 3),
        Record::new("A1", "SKU2", 2),
        Record::new("B2", "SKU1", 1),
    ]
}

/// Context plus router over a stub source.
pub struct TestApp {
    pub ctx: Arc<AppContext>,
    pub source: StubSource,
}

impl TestApp {
    pub fn new(source: StubSource) -> Self {
        Self::with_config(Config::default(), source)
    }

    pub fn with_config(config: Config, source: StubSource) -> Self {
        let ctx = Arc::new(AppContext::with_source(config, Arc::new(source.clone())));
        Self { ctx, source }
    }

    pub fn scenario() -> Self {
        Self::new(StubSource::new(scenario_records()))
    }

    pub fn router(&self) -> Router {
        router(self.ctx.clone())
    }

    /// Send one request and return status plus body text.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router().oneshot(request).await.expect("request should complete");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body should read");
        (status, String::from_utf8(bytes.to_vec()).expect("body should be utf-8"))
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.get(uri).await;
        (status, serde_json::from_str(&body).expect("body should be JSON"))
    }

    pub async fn post_json(
        &self,
        uri: &str,
        payload: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();
        let (status, body) = self.send(request).await;
        (status, serde_json::from_str(&body).expect("body should be JSON"))
    }

    pub async fn post_empty(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.send(Request::post(uri).body(Body::empty()).unwrap()).await;
        (status, serde_json::from_str(&body).expect("body should be JSON"))
    }
}

/// SQLite file with the example table, kept alive for the test.
pub struct TestDatabase {
    pub path: PathBuf,
    _temp_dir: TempDir,
}

impl TestDatabase {
    pub fn scenario() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let path = temp_dir.path().join("inventory.db");
        let conn = rusqlite::Connection::open(&path).expect("database should be created");
        conn.execute_batch(
            "CREATE TABLE inventory (sector TEXT, code TEXT, quantity INTEGER, description TEXT);
             INSERT INTO inventory VALUES
                ('A1', 'SKU1', 5, 'pallet'),
                ('A1', 'SKU1', 3, NULL),
                ('A1', 'SKU2', 2, NULL),
                ('B2', 'SKU1', 1, NULL);",
        )
        .expect("schema should apply");
        Self { path, _temp_dir: temp_dir }
    }

    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.database.path = Some(self.path.to_string_lossy().into_owned());
        config
    }
}
