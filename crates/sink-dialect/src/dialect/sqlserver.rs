//! Microsoft SQL Server dialect.
//!
//! Bracket-quoted identifiers, native MERGE upsert, combined ALTER TABLE.

use super::{validate_upsert_input, Dialect};
use crate::error::Result;
use crate::schema::ColumnType;

/// SQL Server family dialect (MERGE-capable).
#[derive(Debug, Clone, Default)]
pub struct SqlServerDialect;

impl SqlServerDialect {
    /// Create a new SQL Server dialect instance.
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for SqlServerDialect {
    fn name(&self) -> &str {
        "sqlserver"
    }

    fn quote_ident(&self, name: &str) -> String {
        // Closing brackets inside the name are doubled
        format!("[{}]", name.replace(']', "]]"))
    }

    fn sql_type(&self, column_type: ColumnType) -> &'static str {
        match column_type {
            ColumnType::Int8 => "tinyint",
            ColumnType::Int16 => "smallint",
            ColumnType::Int32 => "int",
            ColumnType::Int64 => "bigint",
            ColumnType::Float32 => "real",
            ColumnType::Float64 => "float",
            ColumnType::Boolean => "bit",
            ColumnType::String => "varchar(256)",
            ColumnType::Bytes => "varbinary(max)",
        }
    }

    /// Build a MERGE statement keyed on the primary-key columns.
    ///
    /// The incoming row is presented as a one-row `select` of `?`
    /// placeholders aliased per column, non-key columns first, then key
    /// columns; the caller binds values in that same order. HOLDLOCK keeps
    /// the match-then-insert decision atomic under concurrent writers.
    fn build_upsert_query(
        &self,
        table: &str,
        non_key_cols: &[String],
        key_cols: &[String],
    ) -> Result<Vec<String>> {
        validate_upsert_input(table, key_cols)?;

        let all_cols = || non_key_cols.iter().chain(key_cols.iter());

        let select_aliases = all_cols()
            .map(|col| format!("? AS {}", self.quote_ident(col)))
            .collect::<Vec<_>>()
            .join(", ");

        let match_predicates = key_cols
            .iter()
            .map(|col| {
                let quoted = self.quote_ident(col);
                format!("target.{}=incoming.{}", quoted, quoted)
            })
            .collect::<Vec<_>>()
            .join(" and ");

        // Key-only tables have nothing to update on match
        let update_clause = if non_key_cols.is_empty() {
            String::new()
        } else {
            let assignments = non_key_cols
                .iter()
                .map(|col| {
                    let quoted = self.quote_ident(col);
                    format!("{}=incoming.{}", quoted, quoted)
                })
                .collect::<Vec<_>>()
                .join(",");
            format!(" when matched then update set {}", assignments)
        };

        let insert_cols = all_cols()
            .map(|col| self.quote_ident(col))
            .collect::<Vec<_>>()
            .join(", ");

        let insert_values = all_cols()
            .map(|col| format!("incoming.{}", self.quote_ident(col)))
            .collect::<Vec<_>>()
            .join(",");

        let sql = format!(
            "merge into {} with (HOLDLOCK) AS target using (select {}) AS incoming on ({}){} when not matched then insert ({}) values ({});",
            self.quote_ident(table),
            select_aliases,
            match_predicates,
            update_clause,
            insert_cols,
            insert_values
        );

        Ok(vec![sql])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnDescriptor;

    fn dialect() -> SqlServerDialect {
        SqlServerDialect::new()
    }

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    // =========================================================================
    // Upsert (MERGE)
    // =========================================================================

    #[test]
    fn test_upsert_single_key() {
        let queries = dialect()
            .build_upsert_query(
                "Customer",
                &strings(&["name", "salary", "address"]),
                &strings(&["id"]),
            )
            .unwrap();

        assert_eq!(queries.len(), 1);
        assert_eq!(
            queries[0],
            "merge into [Customer] with (HOLDLOCK) AS target using (select ? AS [name], ? AS [salary], \
             ? AS [address], ? AS [id]) AS incoming on (target.[id]=incoming.[id]) when matched then \
             update set [name]=incoming.[name],[salary]=incoming.[salary],[address]=incoming.[address] \
             when not matched then insert ([name], [salary], [address], [id]) values \
             (incoming.[name],incoming.[salary],incoming.[address],incoming.[id]);"
        );
    }

    #[test]
    fn test_upsert_composite_key() {
        let queries = dialect()
            .build_upsert_query(
                "Book",
                &strings(&["ISBN", "year", "pages"]),
                &strings(&["author", "title"]),
            )
            .unwrap();

        assert_eq!(queries.len(), 1);
        assert_eq!(
            queries[0],
            "merge into [Book] with (HOLDLOCK) AS target using (select ? AS [ISBN], ? AS [year], \
             ? AS [pages], ? AS [author], ? AS [title]) AS incoming on \
             (target.[author]=incoming.[author] and target.[title]=incoming.[title]) when matched \
             then update set [ISBN]=incoming.[ISBN],[year]=incoming.[year],[pages]=incoming.[pages] \
             when not matched then insert ([ISBN], [year], [pages], [author], [title]) values \
             (incoming.[ISBN],incoming.[year],incoming.[pages],incoming.[author],incoming.[title]);"
        );
    }

    #[test]
    fn test_upsert_single_key_has_one_match_predicate() {
        let queries = dialect()
            .build_upsert_query("Customer", &strings(&["name"]), &strings(&["id"]))
            .unwrap();

        assert!(queries[0].contains("on (target.[id]=incoming.[id])"));
        assert!(!queries[0].contains(" and "));
    }

    #[test]
    fn test_upsert_key_only_omits_update_clause() {
        let queries = dialect()
            .build_upsert_query("Events", &[], &strings(&["id"]))
            .unwrap();

        assert_eq!(
            queries[0],
            "merge into [Events] with (HOLDLOCK) AS target using (select ? AS [id]) AS incoming \
             on (target.[id]=incoming.[id]) when not matched then insert ([id]) values \
             (incoming.[id]);"
        );
    }

    // =========================================================================
    // CREATE TABLE
    // =========================================================================

    #[test]
    fn test_create_table_one_key_column() {
        let sql = dialect()
            .build_create_query(
                "tableA",
                &[
                    ColumnDescriptor::new("col1", ColumnType::Int32, true),
                    ColumnDescriptor::new("col2", ColumnType::Int64, false),
                    ColumnDescriptor::new("col3", ColumnType::String, false),
                    ColumnDescriptor::new("col4", ColumnType::Float32, false),
                    ColumnDescriptor::new("col5", ColumnType::Float64, false),
                    ColumnDescriptor::new("col6", ColumnType::Boolean, false),
                    ColumnDescriptor::new("col7", ColumnType::Int8, false),
                    ColumnDescriptor::new("col8", ColumnType::Int16, false),
                ],
            )
            .unwrap();

        // Non-key columns lead, the key column joins the PRIMARY KEY clause at the end
        let expected = "CREATE TABLE [tableA] (\n\
                        [col2] bigint NULL,\n\
                        [col3] varchar(256) NULL,\n\
                        [col4] real NULL,\n\
                        [col5] float NULL,\n\
                        [col6] bit NULL,\n\
                        [col7] tinyint NULL,\n\
                        [col8] smallint NULL,\n\
                        [col1] int NOT NULL,\n\
                        PRIMARY KEY([col1]))";
        assert_eq!(sql, expected);
    }

    #[test]
    fn test_create_table_composite_key() {
        let sql = dialect()
            .build_create_query(
                "tableA",
                &[
                    ColumnDescriptor::new("userid", ColumnType::Int32, true),
                    ColumnDescriptor::new("userdataid", ColumnType::Int32, true),
                    ColumnDescriptor::new("info", ColumnType::String, false),
                ],
            )
            .unwrap();

        let expected = "CREATE TABLE [tableA] (\n\
                        [info] varchar(256) NULL,\n\
                        [userid] int NOT NULL,\n\
                        [userdataid] int NOT NULL,\n\
                        PRIMARY KEY([userid],[userdataid]))";
        assert_eq!(sql, expected);
    }

    #[test]
    fn test_create_table_no_key_columns() {
        let sql = dialect()
            .build_create_query(
                "tableA",
                &[
                    ColumnDescriptor::new("col1", ColumnType::Int32, false),
                    ColumnDescriptor::new("col2", ColumnType::Int64, false),
                    ColumnDescriptor::new("col3", ColumnType::String, false),
                    ColumnDescriptor::new("col4", ColumnType::Float32, false),
                    ColumnDescriptor::new("col5", ColumnType::Float64, false),
                    ColumnDescriptor::new("col6", ColumnType::Boolean, false),
                    ColumnDescriptor::new("col7", ColumnType::Int8, false),
                    ColumnDescriptor::new("col8", ColumnType::Int16, false),
                ],
            )
            .unwrap();

        let expected = "CREATE TABLE [tableA] (\n\
                        [col1] int NULL,\n\
                        [col2] bigint NULL,\n\
                        [col3] varchar(256) NULL,\n\
                        [col4] real NULL,\n\
                        [col5] float NULL,\n\
                        [col6] bit NULL,\n\
                        [col7] tinyint NULL,\n\
                        [col8] smallint NULL)";
        assert_eq!(sql, expected);
    }

    // =========================================================================
    // ALTER TABLE
    // =========================================================================

    #[test]
    fn test_alter_table_combined_statement() {
        let queries = dialect()
            .build_alter_queries(
                "tableA",
                &[
                    ColumnDescriptor::new("col1", ColumnType::Int32, false),
                    ColumnDescriptor::new("col2", ColumnType::Int64, false),
                    ColumnDescriptor::new("col3", ColumnType::String, false),
                    ColumnDescriptor::new("col4", ColumnType::Float32, false),
                    ColumnDescriptor::new("col5", ColumnType::Float64, false),
                    ColumnDescriptor::new("col6", ColumnType::Boolean, false),
                    ColumnDescriptor::new("col7", ColumnType::Int8, false),
                    ColumnDescriptor::new("col8", ColumnType::Int16, false),
                ],
            )
            .unwrap();

        assert_eq!(queries.len(), 1);

        let expected = "ALTER TABLE [tableA] ADD\n\
                        [col1] int NULL,\n\
                        [col2] bigint NULL,\n\
                        [col3] varchar(256) NULL,\n\
                        [col4] real NULL,\n\
                        [col5] float NULL,\n\
                        [col6] bit NULL,\n\
                        [col7] tinyint NULL,\n\
                        [col8] smallint NULL";
        assert_eq!(queries[0], expected);
    }

    #[test]
    fn test_quote_ident_doubles_closing_bracket() {
        assert_eq!(dialect().quote_ident("users"), "[users]");
        assert_eq!(dialect().quote_ident("odd]name"), "[odd]]name]");
    }
}
