//! Classification of `sqlx` errors into [`StoreError`].

use crate::domain::repositories::StoreError;

/// Column named by SQLite in `UNIQUE constraint failed: urls.short_code`.
const SHORT_CODE_COLUMN: &str = "urls.short_code";

/// Returns true if `e` is a unique violation on the `short_code` column.
///
/// SQLite reports no constraint name, so the column is matched in the
/// driver message instead.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    match db_err.constraint() {
        Some(constraint) => constraint.contains("short_code"),
        None => db_err.message().contains(SHORT_CODE_COLUMN),
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation_on_code(&e) {
            return StoreError::DuplicateShortCode;
        }

        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::backend(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn test_pool_timeout_maps_to_backend() {
        let err: StoreError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[test]
    fn test_non_database_error_is_not_unique_violation() {
        assert!(!is_unique_violation_on_code(&sqlx::Error::PoolClosed));
    }
}
