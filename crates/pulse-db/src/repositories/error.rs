//! Error handling utilities for repositories

use pulse_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Attempts per engine transaction before surfacing `StorageContention`
pub(crate) const MAX_TX_ATTEMPTS: u32 = 3;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Error inside an engine transaction attempt: either a deterministic domain
/// outcome (returned to the caller as-is, never retried) or a database error
/// (retried when transient).
#[derive(Debug)]
pub(crate) enum TxError {
    Domain(DomainError),
    Db(SqlxError),
}

impl From<SqlxError> for TxError {
    fn from(e: SqlxError) -> Self {
        Self::Db(e)
    }
}

impl From<DomainError> for TxError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

/// Whether a failed transaction attempt is worth retrying from the read step.
///
/// Serialization failures (40001) and deadlocks (40P01) are the usual
/// write-conflict signals; a unique violation on the reactions primary key
/// means two first-reactions raced past the empty read - the retry will
/// observe the winner's row and take the switch/toggle branch instead.
pub(crate) fn is_retryable(e: &SqlxError) -> bool {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return true;
        }
        if let Some(code) = db_err.code() {
            return code == "40001" || code == "40P01";
        }
    }
    false
}

/// Resolve one engine-transaction attempt: deterministic domain errors
/// propagate, retryable database errors yield `None` (try again), anything
/// else maps to a database error.
pub(crate) fn resolve_attempt<T>(
    result: Result<T, TxError>,
    attempt: u32,
    operation: &'static str,
) -> Result<Option<T>, DomainError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(TxError::Domain(e)) => Err(e),
        Err(TxError::Db(e)) if is_retryable(&e) => {
            if attempt >= MAX_TX_ATTEMPTS {
                tracing::warn!(operation, attempt, error = %e, "Transaction retries exhausted");
                Err(DomainError::StorageContention(e.to_string()))
            } else {
                tracing::debug!(operation, attempt, error = %e, "Retrying transaction");
                Ok(None)
            }
        }
        Err(TxError::Db(e)) => Err(map_db_error(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_is_not_retryable() {
        assert!(!is_retryable(&SqlxError::RowNotFound));
    }

    #[test]
    fn test_resolve_attempt_passes_domain_errors_through() {
        let result: Result<(), TxError> = Err(TxError::Domain(DomainError::PostNotFound(
            pulse_core::Snowflake::new(1),
        )));
        let resolved = resolve_attempt(result, 1, "test");
        assert!(matches!(resolved, Err(DomainError::PostNotFound(_))));
    }

    #[test]
    fn test_resolve_attempt_maps_terminal_db_errors() {
        let result: Result<(), TxError> = Err(TxError::Db(SqlxError::RowNotFound));
        let resolved = resolve_attempt(result, 1, "test");
        assert!(matches!(resolved, Err(DomainError::DatabaseError(_))));
    }
}
