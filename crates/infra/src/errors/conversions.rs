//! Conversions from external infrastructure errors into domain errors.

use r2d2::Error as PoolError;
use rusqlite::Error as SqlError;
use sectorgrid_domain::SectorGridError;
use tokio::task::JoinError;
use tokio_postgres::error::SqlState;
use tokio_postgres::Error as PgError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SectorGridError);

impl From<InfraError> for SectorGridError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SectorGridError> for InfraError {
    fn from(value: SectorGridError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoSectorGridError {
    fn into_sectorgrid(self) -> SectorGridError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → SectorGridError */
/* -------------------------------------------------------------------------- */

impl IntoSectorGridError for SqlError {
    fn into_sectorgrid(self) -> SectorGridError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match err.code {
                    ErrorCode::DatabaseBusy => SectorGridError::Database("database is busy".into()),
                    ErrorCode::DatabaseLocked => {
                        SectorGridError::Database("database is locked".into())
                    }
                    ErrorCode::CannotOpen => {
                        SectorGridError::Database(format!("unable to open database: {message}"))
                    }
                    ErrorCode::NotADatabase => {
                        SectorGridError::Database("file is not a sqlite database".into())
                    }
                    _ if message.contains("no such table") => SectorGridError::NotFound(message),
                    _ => SectorGridError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => {
                SectorGridError::NotFound("no rows returned by query".into())
            }
            RE::FromSqlConversionFailure(_, _, cause) => {
                SectorGridError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, name, ty) => {
                SectorGridError::Database(format!("column '{name}' has unexpected type {ty}"))
            }
            RE::Utf8Error(_) => {
                SectorGridError::Database("invalid UTF-8 returned from sqlite".into())
            }
            RE::InvalidPath(path) => SectorGridError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            RE::InvalidQuery => SectorGridError::Database("invalid SQL query".into()),
            other => SectorGridError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_sectorgrid())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → SectorGridError */
/* -------------------------------------------------------------------------- */

impl IntoSectorGridError for PoolError {
    fn into_sectorgrid(self) -> SectorGridError {
        SectorGridError::Database(format!("connection pool unavailable: {self}"))
    }
}

impl From<PoolError> for InfraError {
    fn from(value: PoolError) -> Self {
        InfraError(value.into_sectorgrid())
    }
}

/* -------------------------------------------------------------------------- */
/* tokio_postgres::Error → SectorGridError */
/* -------------------------------------------------------------------------- */

impl IntoSectorGridError for PgError {
    fn into_sectorgrid(self) -> SectorGridError {
        if self.is_closed() {
            return SectorGridError::Database("postgres connection closed".into());
        }

        let Some(db_error) = self.as_db_error() else {
            return SectorGridError::Database(format!("postgres error: {self}"));
        };

        let code = db_error.code();
        let message = db_error.message().to_string();

        if code == &SqlState::UNDEFINED_TABLE {
            SectorGridError::NotFound(message)
        } else if code == &SqlState::INVALID_PASSWORD
            || code == &SqlState::INVALID_AUTHORIZATION_SPECIFICATION
        {
            SectorGridError::Config(format!("postgres rejected credentials: {message}"))
        } else {
            SectorGridError::Database(format!("postgres error {}: {message}", code.code()))
        }
    }
}

impl From<PgError> for InfraError {
    fn from(value: PgError) -> Self {
        InfraError(value.into_sectorgrid())
    }
}

/* -------------------------------------------------------------------------- */
/* tokio::task::JoinError → SectorGridError */
/* -------------------------------------------------------------------------- */

impl IntoSectorGridError for JoinError {
    fn into_sectorgrid(self) -> SectorGridError {
        if self.is_cancelled() {
            SectorGridError::Internal("blocking database task cancelled".into())
        } else {
            SectorGridError::Internal(format!("blocking database task failed: {self}"))
        }
    }
}

impl From<JoinError> for InfraError {
    fn from(value: JoinError) -> Self {
        InfraError(value.into_sectorgrid())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use rusqlite::ffi::{Error as FfiError, ErrorCode};
    use rusqlite::Connection;

    use super::*;

    #[test]
    fn sqlite_busy_maps_to_database_error() {
        let err = SqlError::SqliteFailure(
            FfiError { code: ErrorCode::DatabaseBusy, extended_code: 5 },
            Some("database is locked".into()),
        );

        let mapped: SectorGridError = InfraError::from(err).into();
        match mapped {
            SectorGridError::Database(msg) => {
                assert!(msg.contains("busy") || msg.contains("locked"));
            }
            other => panic!("expected database error, got {:?}", other),
        }
    }

    #[test]
    fn missing_table_maps_to_not_found() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn.prepare("SELECT * FROM inventory").unwrap_err();

        let mapped: SectorGridError = InfraError::from(err).into();
        match mapped {
            SectorGridError::NotFound(msg) => assert!(msg.contains("inventory")),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        let mapped: SectorGridError = InfraError::from(SqlError::QueryReturnedNoRows).into();
        assert!(matches!(mapped, SectorGridError::NotFound(_)));
    }

    #[tokio::test]
    async fn cancelled_task_maps_to_internal_error() {
        let handle = tokio::spawn(async {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
        });
        handle.abort();
        let err = handle.await.unwrap_err();

        let mapped: SectorGridError = InfraError::from(err).into();
        match mapped {
            SectorGridError::Internal(msg) => assert!(msg.contains("cancelled")),
            other => panic!("expected internal error, got {:?}", other),
        }
    }
}
