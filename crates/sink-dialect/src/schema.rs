//! Schema descriptor types shared by every dialect.
//!
//! These types are the database-agnostic input contract of the crate: the
//! record-to-schema mapping layer produces an ordered list of
//! [`ColumnDescriptor`]s per sink table, and every statement builder consumes
//! that list without mutating it.

use serde::{Deserialize, Serialize};

/// Logical column type of the abstract sink schema.
///
/// Closed set: every dialect maps each variant to exactly one native SQL type
/// token via an exhaustive `match`, so adding a variant here forces every
/// dialect to declare its mapping at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
    /// Boolean/bit type.
    Boolean,
    /// Variable-length text. Dialects bound it where the backend requires an
    /// explicit length (varchar(256)).
    String,
    /// Opaque byte sequence.
    Bytes,
}

/// A single column of a sink table schema.
///
/// Immutable value object created per invocation by the schema-mapping
/// collaborator. Column names are trusted internal identifiers, unique
/// (case-sensitive) within one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,

    /// Logical column type.
    pub column_type: ColumnType,

    /// Whether the column participates in the table's primary key.
    pub is_primary_key: bool,
}

impl ColumnDescriptor {
    /// Create a new column descriptor.
    pub fn new(name: impl Into<String>, column_type: ColumnType, is_primary_key: bool) -> Self {
        Self {
            name: name.into(),
            column_type,
            is_primary_key,
        }
    }
}

/// Partition columns into (non-key, key), each preserving input order.
///
/// This is the single ordering policy used by every statement builder.
/// Upsert statements bind `?` placeholders positionally, so the SQL text and
/// the caller's value binding must agree on one ordering: non-key columns in
/// input order, then key columns in input order.
pub fn partition_by_key(
    columns: &[ColumnDescriptor],
) -> (Vec<&ColumnDescriptor>, Vec<&ColumnDescriptor>) {
    let mut non_key = Vec::new();
    let mut key = Vec::new();
    for column in columns {
        if column.is_primary_key {
            key.push(column);
        } else {
            non_key.push(column);
        }
    }
    (non_key, key)
}
