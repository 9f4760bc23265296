//! # sink-dialect
//!
//! Dialect-aware SQL generation for relational sink writers.
//!
//! Given a database-agnostic table schema, this library produces
//! syntactically and semantically correct SQL text for a specific backend
//! family:
//!
//! - **CREATE TABLE** with the backend's native types and PRIMARY KEY clause
//! - **ALTER TABLE ADD COLUMN**, combined or one statement per column
//!   depending on what the backend accepts
//! - **Idempotent upsert** (native MERGE, a single-statement conflict
//!   idiom, or a multi-statement emulation) with a fixed positional
//!   placeholder binding contract
//!
//! The library only generates text. It never opens a connection; executing
//! the statements, batching, transactions, and retries belong to the caller.
//!
//! ## Example
//!
//! ```rust
//! use sink_dialect::{ColumnDescriptor, ColumnType, Dialect, DialectCatalog};
//!
//! let catalog = DialectCatalog::with_builtins();
//! let dialect = catalog.from_connection_url("sqlite:/var/lib/sink.db")?;
//!
//! let columns = vec![
//!     ColumnDescriptor::new("visits", ColumnType::Int64, false),
//!     ColumnDescriptor::new("page", ColumnType::String, true),
//! ];
//!
//! let ddl = dialect.build_create_query("page_visits", &columns)?;
//! assert!(ddl.starts_with("CREATE TABLE `page_visits`"));
//! # Ok::<(), sink_dialect::DialectError>(())
//! ```

pub mod dialect;
pub mod error;
pub mod schema;

// Re-exports for convenient access
pub use dialect::{
    Dialect, DialectCatalog, GenericDialect, MySqlDialect, SqlServerDialect, SqliteDialect,
};
pub use error::{DialectError, Result};
pub use schema::{partition_by_key, ColumnDescriptor, ColumnType};
