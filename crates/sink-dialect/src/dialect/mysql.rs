//! MySQL/MariaDB dialect.
//!
//! Backtick-quoted identifiers, `ON DUPLICATE KEY UPDATE` upsert, combined
//! ALTER TABLE.

use super::{validate_upsert_input, Dialect};
use crate::error::Result;
use crate::schema::ColumnType;

/// MySQL family dialect (no native MERGE).
#[derive(Debug, Clone, Default)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Create a new MySQL dialect instance.
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &str {
        "mysql"
    }

    fn quote_ident(&self, name: &str) -> String {
        // Backticks inside the name are doubled
        format!("`{}`", name.replace('`', "``"))
    }

    fn sql_type(&self, column_type: ColumnType) -> &'static str {
        match column_type {
            ColumnType::Int8 => "tinyint",
            ColumnType::Int16 => "smallint",
            ColumnType::Int32 => "int",
            ColumnType::Int64 => "bigint",
            ColumnType::Float32 => "float",
            ColumnType::Float64 => "double",
            ColumnType::Boolean => "tinyint",
            ColumnType::String => "varchar(256)",
            ColumnType::Bytes => "varbinary(1024)",
        }
    }

    /// Build an `INSERT ... ON DUPLICATE KEY UPDATE` statement.
    ///
    /// The conflict target is the table's own declared primary key, so only
    /// the value tuple carries placeholders; the update clause re-reads the
    /// incoming row via `values(col)`. Key-only tables degrade to
    /// `insert ignore`, which leaves existing rows untouched.
    fn build_upsert_query(
        &self,
        table: &str,
        non_key_cols: &[String],
        key_cols: &[String],
    ) -> Result<Vec<String>> {
        validate_upsert_input(table, key_cols)?;

        let all_cols = || non_key_cols.iter().chain(key_cols.iter());

        let columns = all_cols()
            .map(|col| self.quote_ident(col))
            .collect::<Vec<_>>()
            .join(",");

        let placeholders = vec!["?"; non_key_cols.len() + key_cols.len()].join(",");

        let sql = if non_key_cols.is_empty() {
            format!(
                "insert ignore into {}({}) values({})",
                self.quote_ident(table),
                columns,
                placeholders
            )
        } else {
            let assignments = non_key_cols
                .iter()
                .map(|col| {
                    let quoted = self.quote_ident(col);
                    format!("{}=values({})", quoted, quoted)
                })
                .collect::<Vec<_>>()
                .join(",");
            format!(
                "insert into {}({}) values({}) on duplicate key update {}",
                self.quote_ident(table),
                columns,
                placeholders,
                assignments
            )
        };

        Ok(vec![sql])
    }
}
