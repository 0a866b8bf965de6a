//! Error types for villadesk.

use thiserror::Error;

/// Common error type for villadesk.
#[derive(Error, Debug)]
pub enum VillaError {
    /// Database error.
    ///
    /// Generic database fault wrapping errors from the sqlx backend.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error (backing store unreachable).
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for VillaError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                VillaError::DatabaseConnection(e.to_string())
            }
            other => VillaError::Database(other.to_string()),
        }
    }
}

/// Result type alias for villadesk operations.
pub type Result<T> = std::result::Result<T, VillaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = VillaError::Auth("invalid password".to_string());
        assert_eq!(err.to_string(), "authentication error: invalid password");
    }

    #[test]
    fn test_permission_error_display() {
        let err = VillaError::Permission("admin access required".to_string());
        assert_eq!(err.to_string(), "permission denied: admin access required");
    }

    #[test]
    fn test_validation_error_display() {
        let err = VillaError::Validation("price must be numeric".to_string());
        assert_eq!(err.to_string(), "validation error: price must be numeric");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = VillaError::NotFound("property".to_string());
        assert_eq!(err.to_string(), "property not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: VillaError = io_err.into();
        assert!(matches!(err, VillaError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_connection_errors_mapped() {
        let err: VillaError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, VillaError::DatabaseConnection(_)));

        let err: VillaError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, VillaError::Database(_)));
    }
}
