//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for SectorGrid
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SectorGridError {
    /// Required inventory fields are absent from the loaded record set.
    ///
    /// Blocking: the pipeline halts before aggregation runs.
    #[error("Schema error: missing required field(s): {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SectorGridError {
    /// Build a schema error from the missing field names.
    pub fn schema<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Schema { missing: missing.into_iter().map(Into::into).collect() }
    }

    /// Message suitable for showing to the person looking at the grid.
    ///
    /// Schema problems get a plain-language explanation; everything else
    /// falls back to the `Display` output.
    pub fn user_message(&self) -> String {
        match self {
            Self::Schema { missing } => format!(
                "The inventory table is missing required column(s): {}. \
                 The grid cannot be built until the table exposes sector, code and quantity.",
                missing.join(", ")
            ),
            Self::Database(_) => {
                "The inventory database could not be read. Try refreshing in a moment.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Result type alias for SectorGrid operations
pub type Result<T> = std::result::Result<T, SectorGridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_missing_fields() {
        let err = SectorGridError::schema(["sector", "quantity"]);
        assert_eq!(err.to_string(), "Schema error: missing required field(s): sector, quantity");
        assert!(err.user_message().contains("sector, quantity"));
    }

    #[test]
    fn errors_serialize_with_type_tag() {
        let err = SectorGridError::InvalidInput("code must not be empty".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "InvalidInput");
        assert_eq!(json["message"], "code must not be empty");

        let schema = serde_json::to_value(SectorGridError::schema(["code"])).unwrap();
        assert_eq!(schema["type"], "Schema");
        assert_eq!(schema["message"]["missing"][0], "code");
    }
}
