//! Shared row handling for the SQL inventory sources.
//!
//! Both adapters read every mapped column as optional text and convert it
//! here, so SQLite's dynamic typing and PostgreSQL's static typing end up
//! with the same record semantics.

use sectorgrid_core::validate_schema;
use sectorgrid_domain::constants::FIELD_DESCRIPTION;
use sectorgrid_domain::{ColumnMapping, Record, Result, SectorGridError};
use tracing::debug;

/// Physical columns to select, resolved from table metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedColumns {
    /// Logical field names present in the table.
    pub logical: Vec<String>,
    pub sector: String,
    pub code: String,
    pub quantity: String,
    pub description: Option<String>,
}

impl ResolvedColumns {
    /// Map the table's physical columns onto logical fields.
    ///
    /// # Errors
    /// Returns `SectorGridError::Schema` when a required field has no
    /// matching column, before any row is read.
    pub fn resolve<S: AsRef<str>>(physical: &[S], mapping: &ColumnMapping) -> Result<Self> {
        let mut logical = Vec::new();
        for column in physical {
            if let Some(field) = mapping.logical_field(column.as_ref()) {
                if !logical.iter().any(|f| f == field) {
                    logical.push(field.to_string());
                }
            }
        }

        validate_schema(&logical)?;

        // Keep the table's spelling of each name for the SELECT.
        let find = |wanted: &str| {
            physical
                .iter()
                .map(AsRef::as_ref)
                .find(|c| c.eq_ignore_ascii_case(wanted))
                .map(String::from)
        };
        let missing = |field: &str| SectorGridError::schema([field.to_string()]);

        let columns = Self {
            sector: find(&mapping.sector).ok_or_else(|| missing("sector"))?,
            code: find(&mapping.code).ok_or_else(|| missing("code"))?,
            quantity: find(&mapping.quantity).ok_or_else(|| missing("quantity"))?,
            description: find(&mapping.description),
            logical,
        };

        debug!(columns = ?columns.logical, "inventory columns resolved");
        Ok(columns)
    }

    /// Full-table SELECT over the resolved columns.
    ///
    /// `cast` is appended to every column, e.g. `::text` for PostgreSQL.
    pub fn select_sql(&self, table: &str, cast: &str) -> String {
        let description = self
            .description
            .as_deref()
            .map_or_else(|| "NULL".to_string(), |c| format!("{}{cast}", quote_ident(c)));
        format!(
            "SELECT {}{cast}, {}{cast}, {}{cast}, {description} AS {FIELD_DESCRIPTION} FROM {}",
            quote_ident(&self.sector),
            quote_ident(&self.code),
            quote_ident(&self.quantity),
            quote_ident(table),
        )
    }
}

/// Quote an SQL identifier, doubling embedded quotes.
///
/// Identifiers cannot be bound as parameters, so they are spliced quoted.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// One row as read from the database, every value stringified.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct RawRow {
    pub sector: Option<String>,
    pub code: Option<String>,
    pub quantity: Option<String>,
    pub description: Option<String>,
}

impl RawRow {
    /// Convert into a [`Record`].
    ///
    /// A missing code becomes an empty string and is dropped later by the
    /// aggregator. A missing quantity counts as zero.
    ///
    /// # Errors
    /// Returns `SectorGridError::InvalidInput` for a quantity that is not a
    /// non-negative whole number.
    pub fn into_record(self) -> Result<Record> {
        let quantity = match self.quantity.as_deref() {
            Some(raw) => parse_quantity(raw)?,
            None => 0,
        };

        Ok(Record {
            sector: self.sector,
            code: self.code.unwrap_or_default(),
            quantity,
            description: self.description,
        })
    }
}

/// Parse a stock quantity.
///
/// Accepts integers and integral decimals such as `"5.0"`, which is how
/// spreadsheet-fed tables often store whole counts.
pub(crate) fn parse_quantity(raw: &str) -> Result<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    if let Ok(value) = trimmed.parse::<u64>() {
        return Ok(value);
    }

    let invalid = || SectorGridError::InvalidInput(format!("invalid quantity: {raw}"));
    let value: f64 = trimmed.parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(invalid());
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(value as u64)
}
