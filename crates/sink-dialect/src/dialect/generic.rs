//! Generic ANSI dialect.
//!
//! Fallback for backends with neither native MERGE nor a single-statement
//! conflict-handling insert. Double-quoted identifiers, combined ALTER
//! TABLE, and a two-statement upsert emulation.

use super::{validate_upsert_input, Dialect};
use crate::error::Result;
use crate::schema::ColumnType;

/// ANSI fallback dialect for otherwise unrecognized backends.
#[derive(Debug, Clone, Default)]
pub struct GenericDialect;

impl GenericDialect {
    /// Create a new generic dialect instance.
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &str {
        "generic"
    }

    fn quote_ident(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn sql_type(&self, column_type: ColumnType) -> &'static str {
        match column_type {
            ColumnType::Int8 => "smallint",
            ColumnType::Int16 => "smallint",
            ColumnType::Int32 => "integer",
            ColumnType::Int64 => "bigint",
            ColumnType::Float32 => "real",
            ColumnType::Float64 => "double precision",
            ColumnType::Boolean => "boolean",
            ColumnType::String => "varchar(256)",
            ColumnType::Bytes => "blob",
        }
    }

    /// Emulate upsert as a conditional UPDATE followed by a guarded INSERT.
    ///
    /// The two statements are executed by the caller in order, inside one
    /// transaction. Binding per statement:
    ///
    /// 1. `UPDATE`: non-key columns in input order, then key columns in
    ///    input order.
    /// 2. guarded `INSERT`: non-key columns, then key columns, then the key
    ///    columns a second time for the `not exists` check.
    ///
    /// Key-only tables skip the UPDATE: there is nothing to assign.
    fn build_upsert_query(
        &self,
        table: &str,
        non_key_cols: &[String],
        key_cols: &[String],
    ) -> Result<Vec<String>> {
        validate_upsert_input(table, key_cols)?;

        let quoted_table = self.quote_ident(table);

        let predicates = key_cols
            .iter()
            .map(|col| format!("{}=?", self.quote_ident(col)))
            .collect::<Vec<_>>()
            .join(" and ");

        let columns = non_key_cols
            .iter()
            .chain(key_cols.iter())
            .map(|col| self.quote_ident(col))
            .collect::<Vec<_>>()
            .join(",");

        let placeholders = vec!["?"; non_key_cols.len() + key_cols.len()].join(",");

        let insert = format!(
            "insert into {}({}) select {} where not exists(select 1 from {} where {})",
            quoted_table, columns, placeholders, quoted_table, predicates
        );

        if non_key_cols.is_empty() {
            return Ok(vec![insert]);
        }

        let assignments = non_key_cols
            .iter()
            .map(|col| format!("{}=?", self.quote_ident(col)))
            .collect::<Vec<_>>()
            .join(",");

        let update = format!(
            "update {} set {} where {}",
            quoted_table, assignments, predicates
        );

        Ok(vec![update, insert])
    }
}
