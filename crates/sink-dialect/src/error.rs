//! Error types for SQL generation.

use thiserror::Error;

/// Main error type for dialect operations.
#[derive(Error, Debug)]
pub enum DialectError {
    /// Table name was empty or whitespace-only
    #[error("Table name cannot be blank")]
    BlankTableName,

    /// Upsert was requested without key columns (required for the match predicate)
    #[error("Table {0} has no key columns - upsert requires at least one key column")]
    NoKeyColumns(String),

    /// Dialect lookup by name failed
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),
}

/// Result type alias for dialect operations.
pub type Result<T> = std::result::Result<T, DialectError>;
