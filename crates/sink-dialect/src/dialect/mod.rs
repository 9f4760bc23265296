//! SQL dialect strategies for sink DDL and upsert generation.
//!
//! Relational backends disagree on identifier quoting, native type names,
//! whether ALTER TABLE can add several columns in one statement, and how an
//! idempotent upsert is spelled. Each backend family gets one [`Dialect`]
//! implementation that localizes those quirks:
//!
//! - [`SqlServerDialect`]: bracket quoting, native MERGE upsert
//! - [`MySqlDialect`]: backtick quoting, `ON DUPLICATE KEY UPDATE` upsert
//! - [`SqliteDialect`]: backtick quoting, `INSERT OR IGNORE` upsert,
//!   per-column ALTER TABLE
//! - [`GenericDialect`]: ANSI double-quote quoting, multi-statement
//!   update-then-guarded-insert upsert
//!
//! # Design Patterns
//!
//! - **Strategy**: dialects are interchangeable behind the [`Dialect`] trait,
//!   resolved once at startup via [`DialectCatalog`]
//! - **Template Method**: `build_create_query` and `build_alter_queries` have
//!   default implementations; dialects only override the pieces that differ
//!   (type tokens, quote characters, ALTER statement shape, upsert strategy)
//!
//! All implementations are stateless beyond compile-time constants, so one
//! instance is safely shared across concurrent writer tasks.

pub mod catalog;
mod generic;
mod mysql;
mod sqlite;
mod sqlserver;

pub use catalog::DialectCatalog;
pub use generic::GenericDialect;
pub use mysql::MySqlDialect;
pub use sqlite::SqliteDialect;
pub use sqlserver::SqlServerDialect;

use tracing::debug;

use crate::error::{DialectError, Result};
use crate::schema::{partition_by_key, ColumnDescriptor, ColumnType};

/// SQL generation strategy for one relational backend family.
///
/// Every operation is a pure function of its arguments: the trait only
/// produces SQL text and never executes it. Statement execution, batching,
/// and retries belong to the writer that consumes the generated statements.
pub trait Dialect: Send + Sync {
    /// Get the dialect identifier (e.g., "sqlserver", "sqlite").
    fn name(&self) -> &str;

    /// Quote an identifier (table name, column name).
    ///
    /// Applied to every identifier reference in every generated statement,
    /// including join and merge predicates, to guard against reserved words
    /// and mixed-case names.
    fn quote_ident(&self, name: &str) -> String;

    /// Map a logical column type to the backend's native type token.
    ///
    /// Total over [`ColumnType`]: the exhaustive `match` in each
    /// implementation makes an unmapped type a compile error.
    fn sql_type(&self, column_type: ColumnType) -> &'static str;

    /// Render one column definition line: quoted name, native type,
    /// NULL/NOT NULL suffix.
    ///
    /// Key columns are always NOT NULL. Every other column is rendered NULL
    /// regardless of the descriptor: non-key NOT NULL columns are not
    /// supported by this layer.
    fn column_spec(&self, column: &ColumnDescriptor) -> String {
        let nullability = if column.is_primary_key {
            "NOT NULL"
        } else {
            "NULL"
        };
        format!(
            "{} {} {}",
            self.quote_ident(&column.name),
            self.sql_type(column.column_type),
            nullability
        )
    }

    /// Build a CREATE TABLE statement.
    ///
    /// Columns are rendered non-key first, then key columns, both in input
    /// order, followed by a `PRIMARY KEY(...)` clause when at least one key
    /// column exists. The caller guarantees at least one column.
    fn build_create_query(&self, table: &str, columns: &[ColumnDescriptor]) -> Result<String> {
        validate_table_name(table)?;

        let (non_key, key) = partition_by_key(columns);

        let mut lines: Vec<String> = non_key
            .iter()
            .chain(key.iter())
            .map(|column| self.column_spec(column))
            .collect();

        if !key.is_empty() {
            let key_names = key
                .iter()
                .map(|column| self.quote_ident(&column.name))
                .collect::<Vec<_>>()
                .join(",");
            lines.push(format!("PRIMARY KEY({})", key_names));
        }

        let sql = format!(
            "CREATE TABLE {} (\n{})",
            self.quote_ident(table),
            lines.join(",\n")
        );

        debug!(
            "Generated CREATE TABLE for {} ({} columns, {} dialect)",
            table,
            columns.len(),
            self.name()
        );
        Ok(sql)
    }

    /// Build ALTER TABLE ADD COLUMN statement(s) for newly discovered columns.
    ///
    /// The default implementation emits a single combined statement with all
    /// column definitions; backends that only accept one added column per
    /// statement override this to return one statement per column. Columns
    /// keep the caller's order, no key/non-key re-partitioning, and no
    /// PRIMARY KEY clause: keys are never added retroactively.
    fn build_alter_queries(&self, table: &str, columns: &[ColumnDescriptor]) -> Result<Vec<String>> {
        validate_table_name(table)?;

        let lines = columns
            .iter()
            .map(|column| self.column_spec(column))
            .collect::<Vec<_>>()
            .join(",\n");

        let sql = format!("ALTER TABLE {} ADD\n{}", self.quote_ident(table), lines);

        debug!(
            "Generated ALTER TABLE for {} ({} columns, {} dialect)",
            table,
            columns.len(),
            self.name()
        );
        Ok(vec![sql])
    }

    /// Build the dialect's idempotent insert-or-update statement(s).
    ///
    /// # Binding Contract
    ///
    /// Per statement, `?` placeholders bind non-key columns in input order,
    /// then key columns in input order. Single-statement strategies (MERGE,
    /// INSERT OR IGNORE, ON DUPLICATE KEY UPDATE) return exactly one element;
    /// the generic fallback returns an ordered sequence the caller executes
    /// in order.
    ///
    /// # Errors
    ///
    /// Fails before assembling any SQL when the table name is blank or the
    /// key column list is empty.
    fn build_upsert_query(
        &self,
        table: &str,
        non_key_cols: &[String],
        key_cols: &[String],
    ) -> Result<Vec<String>>;
}

/// Reject blank table names before any SQL is assembled.
pub(crate) fn validate_table_name(table: &str) -> Result<()> {
    if table.trim().is_empty() {
        return Err(DialectError::BlankTableName);
    }
    Ok(())
}

/// Shared upsert precondition check: non-blank table, non-empty key list.
pub(crate) fn validate_upsert_input(table: &str, key_cols: &[String]) -> Result<()> {
    validate_table_name(table)?;
    if key_cols.is_empty() {
        return Err(DialectError::NoKeyColumns(table.to_string()));
    }
    Ok(())
}
