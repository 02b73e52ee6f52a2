use std::time::Duration;

use sectorgrid_domain::SectorGridError;
use tracing::{info, warn};

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"grid::get_grid_view"`).
/// * `surface` - Caller surface (`"json"` or `"html"`).
/// * `elapsed` - Duration the command execution took.
/// * `error` - Stable error label when the command failed.
///
/// Callers must avoid forwarding sensitive values in `command` or `surface`.
#[inline]
pub fn log_command_execution(
    command: &str,
    surface: &str,
    elapsed: Duration,
    error: Option<&'static str>,
) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match error {
        None => info!(command, surface, duration_ms, "command_execution_success"),
        Some(error_type) => {
            warn!(command, surface, duration_ms, error_type, "command_execution_failure");
        }
    }
}

/// Convert a `SectorGridError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &SectorGridError) -> &'static str {
    match error {
        SectorGridError::Schema { .. } => "schema",
        SectorGridError::Database(_) => "database",
        SectorGridError::Config(_) => "config",
        SectorGridError::NotFound(_) => "not_found",
        SectorGridError::InvalidInput(_) => "invalid_input",
        SectorGridError::Internal(_) => "internal",
    }
}
