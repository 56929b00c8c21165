//! Failures raised while talking to PostgreSQL
//!
//! Services wrap [`DatabaseError`] in their own error enums and decide there
//! which status code it becomes.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Where a database call went wrong
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The pool could not open a connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// A statement failed, including constraint violations
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// The schema batch failed
    #[error("Database migration error: {0}")]
    Migration(#[source] SqlxError),

    /// Settings rejected before connecting, e.g. an unparsable URL
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Result of a database call
pub type DatabaseResult<T> = Result<T, DatabaseError>;
