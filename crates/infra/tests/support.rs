use std::path::PathBuf;
use std::sync::Arc;

use sectorgrid_domain::ColumnMapping;
use sectorgrid_infra::database::{DbManager, SqliteInventorySource};
use tempfile::TempDir;

/// Temporary database file that stays alive for the duration of a test run.
pub struct TestDatabase {
    pub path: PathBuf,
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a database file and run `sql` against it.
    pub fn with_schema(sql: &str) -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let path = temp_dir.path().join("inventory.db");

        let conn = rusqlite::Connection::open(&path).expect("database should be created");
        conn.execute_batch(sql).expect("SQL batch execution should succeed");

        Self { path, _temp_dir: temp_dir }
    }

    /// Execute more SQL through a separate read-write connection.
    pub fn execute_batch(&self, sql: &str) {
        let conn = rusqlite::Connection::open(&self.path).expect("database should open");
        conn.execute_batch(sql).expect("SQL batch execution should succeed");
    }

    /// Read-only pool over the file.
    pub fn manager(&self) -> Arc<DbManager> {
        Arc::new(DbManager::new(&self.path, 2).expect("db manager should be created"))
    }

    /// Source over `table` with the default column mapping.
    pub fn source(&self, table: &str) -> SqliteInventorySource {
        SqliteInventorySource::new(self.manager(), table, ColumnMapping::default())
    }
}

/// The four-row example table.
pub fn scenario_db() -> TestDatabase {
    TestDatabase::with_schema(
        "CREATE TABLE inventory (
            id INTEGER PRIMARY KEY,
            sector TEXT,
            code TEXT NOT NULL,
            quantity INTEGER,
            description TEXT
        );
        INSERT INTO inventory (sector, code, quantity, description) VALUES
            ('A1', 'SKU1', 5, 'pallet 1'),
            ('A1', 'SKU1', 3, 'pallet 2'),
            ('A1', 'SKU2', 2, NULL),
            ('B2', 'SKU1', 1, NULL);",
    )
}
