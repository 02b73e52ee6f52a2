//! Required-field check run before aggregation.

use sectorgrid_domain::constants::REQUIRED_FIELDS;
use sectorgrid_domain::{Result, SectorGridError};
use tracing::warn;

/// Verify that every required field is among `columns`.
///
/// Matching is case-insensitive. All missing fields are reported at once so
/// the message shown to the user is complete.
///
/// # Errors
/// Returns `SectorGridError::Schema` listing the missing fields.
pub fn validate_schema<S: AsRef<str>>(columns: &[S]) -> Result<()> {
    let missing: Vec<&str> = REQUIRED_FIELDS
        .into_iter()
        .filter(|field| !columns.iter().any(|c| c.as_ref().eq_ignore_ascii_case(field)))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    warn!(missing = ?missing, "inventory schema check failed");
    Err(SectorGridError::schema(missing))
}
