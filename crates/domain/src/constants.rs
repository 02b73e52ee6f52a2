//! Domain constants shared by the aggregation pipeline and adapters.

/// Logical name of the sector field.
pub const FIELD_SECTOR: &str = "sector";

/// Logical name of the SKU code field.
pub const FIELD_CODE: &str = "code";

/// Logical name of the quantity field.
pub const FIELD_QUANTITY: &str = "quantity";

/// Logical name of the optional description field.
pub const FIELD_DESCRIPTION: &str = "description";

/// Fields that must be present before aggregation may run.
pub const REQUIRED_FIELDS: [&str; 3] = [FIELD_SECTOR, FIELD_CODE, FIELD_QUANTITY];

/// Default lifetime of a cached inventory snapshot (5 minutes).
pub const DEFAULT_SNAPSHOT_TTL_SECONDS: u64 = 300;

/// Default column count for the fixed sector list layout.
///
/// Sectors stack in a single column unless configured otherwise.
pub const DEFAULT_FIXED_LAYOUT_COLUMNS: usize = 1;

/// Default largest column number accepted from a parsed sector name.
///
/// Bounds the width of a parsed grid, so a typo such as "A1000000" is
/// reported as unmapped instead of allocating a million-column row.
pub const DEFAULT_MAX_COLUMN_NUMBER: u64 = 10_000;

/// Default idle lifetime of a selection session.
pub const DEFAULT_SESSION_IDLE_SECONDS: u64 = 1800;

/// Default upper bound on live selection sessions.
pub const DEFAULT_MAX_SESSIONS: u64 = 10_000;

/// Default inventory table name.
pub const DEFAULT_TABLE_NAME: &str = "inventory";

/// Default SQLite connection pool size.
pub const DEFAULT_POOL_SIZE: u32 = 4;

/// Default HTTP bind address for the rendering adapter.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
