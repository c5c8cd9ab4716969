//! Custom error types for the common library
//!
//! This module defines database-level error types and the classification
//! helpers the API service uses to translate store failures into its own
//! error taxonomy.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// PostgreSQL error code for unique constraint violations.
const UNIQUE_VIOLATION_CODE: &str = "23505";

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Check whether a sqlx error is a unique constraint violation.
///
/// Used to classify duplicate-email writes into a Conflict response
/// instead of a generic server error.
pub fn is_unique_violation(error: &SqlxError) -> bool {
    match error {
        SqlxError::Database(db_error) => db_error
            .code()
            .map(|code| code == UNIQUE_VIOLATION_CODE)
            .unwrap_or(false),
        _ => false,
    }
}
