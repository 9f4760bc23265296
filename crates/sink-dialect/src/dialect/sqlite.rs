//! SQLite dialect.
//!
//! Backtick-quoted identifiers, `INSERT OR IGNORE` upsert, and one ALTER
//! TABLE statement per added column: SQLite rejects multi-column ADD.

use super::{validate_table_name, validate_upsert_input, Dialect};
use crate::error::Result;
use crate::schema::{ColumnDescriptor, ColumnType};

/// SQLite dialect (embedded engine, no native MERGE).
#[derive(Debug, Clone, Default)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Create a new SQLite dialect instance.
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn quote_ident(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn sql_type(&self, column_type: ColumnType) -> &'static str {
        // SQLite types are affinities, not storage classes
        match column_type {
            ColumnType::Int8 => "INTEGER",
            ColumnType::Int16 => "INTEGER",
            ColumnType::Int32 => "INTEGER",
            ColumnType::Int64 => "INTEGER",
            ColumnType::Float32 => "REAL",
            ColumnType::Float64 => "REAL",
            ColumnType::Boolean => "NUMERIC",
            ColumnType::String => "TEXT",
            ColumnType::Bytes => "BLOB",
        }
    }

    /// One statement per column, in input order.
    fn build_alter_queries(&self, table: &str, columns: &[ColumnDescriptor]) -> Result<Vec<String>> {
        validate_table_name(table)?;

        Ok(columns
            .iter()
            .map(|column| {
                format!(
                    "ALTER TABLE {} ADD {};",
                    self.quote_ident(table),
                    self.column_spec(column)
                )
            })
            .collect())
    }

    /// Build an `INSERT OR IGNORE` statement.
    ///
    /// The conflict target is inferred from the table's declared primary
    /// key; rows whose key already exists are skipped rather than updated,
    /// which keeps replayed batches idempotent.
    fn build_upsert_query(
        &self,
        table: &str,
        non_key_cols: &[String],
        key_cols: &[String],
    ) -> Result<Vec<String>> {
        validate_upsert_input(table, key_cols)?;

        let columns = non_key_cols
            .iter()
            .chain(key_cols.iter())
            .map(|col| self.quote_ident(col))
            .collect::<Vec<_>>()
            .join(",");

        let placeholders = vec!["?"; non_key_cols.len() + key_cols.len()].join(",");

        let sql = format!(
            "insert or ignore into {}({}) values({})",
            self.quote_ident(table),
            columns,
            placeholders
        );

        Ok(vec![sql])
    }
}
