//! Dialect registry and resolution.
//!
//! The [`DialectCatalog`] is explicitly constructed and injected into the
//! writer rather than living in global state: deterministic initialization,
//! easy to substitute in tests, and new backends are added by registration
//! instead of linker magic.
//!
//! Resolution happens once at startup, either from an explicit dialect name
//! or by sniffing the scheme of the backend connection URL; the resolved
//! `Arc<dyn Dialect>` is then immutable for the lifetime of the writer.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::error::{DialectError, Result};

use super::{Dialect, GenericDialect, MySqlDialect, SqlServerDialect, SqliteDialect};

/// Registry of SQL dialects, keyed by canonical name.
#[derive(Default)]
pub struct DialectCatalog {
    dialects: HashMap<String, Arc<dyn Dialect>>,
}

impl DialectCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog with the standard built-in dialects registered.
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        catalog.register("sqlserver", Arc::new(SqlServerDialect::new()));
        catalog.register("mysql", Arc::new(MySqlDialect::new()));
        catalog.register("sqlite", Arc::new(SqliteDialect::new()));
        catalog.register("generic", Arc::new(GenericDialect::new()));
        catalog
    }

    /// Register a dialect under a canonical name.
    pub fn register(&mut self, name: impl Into<String>, dialect: Arc<dyn Dialect>) {
        self.dialects.insert(name.into(), dialect);
    }

    /// Look up a dialect by name or alias.
    ///
    /// # Errors
    ///
    /// Returns `DialectError::UnknownDialect` when no dialect is registered
    /// under the resolved name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Dialect>> {
        let canonical = canonical_name(name);
        self.dialects
            .get(canonical.as_ref())
            .cloned()
            .ok_or_else(|| DialectError::UnknownDialect(name.to_string()))
    }

    /// Resolve a dialect from a backend connection URL.
    ///
    /// Sniffs the URL scheme (`mssql://…`, `sqlite::memory:`, a `jdbc:`
    /// prefix is tolerated). Unrecognized schemes fall back to the generic
    /// ANSI dialect with a logged warning, so an unknown backend still gets
    /// standards-conforming DDL.
    pub fn from_connection_url(&self, url: &str) -> Result<Arc<dyn Dialect>> {
        let trimmed = url.trim();
        let without_jdbc = trimmed.strip_prefix("jdbc:").unwrap_or(trimmed);

        let scheme = without_jdbc
            .split(':')
            .next()
            .unwrap_or_default()
            .to_lowercase();

        match scheme.as_str() {
            "sqlserver" | "mssql" => self.get("sqlserver"),
            "mysql" | "mariadb" => self.get("mysql"),
            "sqlite" => self.get("sqlite"),
            _ => {
                warn!(
                    "No dedicated dialect for connection URL scheme {:?}, falling back to generic",
                    scheme
                );
                self.get("generic")
            }
        }
    }
}

/// Map a dialect alias to its canonical registry key.
fn canonical_name(name: &str) -> std::borrow::Cow<'_, str> {
    match name.to_lowercase().as_str() {
        "mssql" | "sqlserver" => "sqlserver".into(),
        "mariadb" | "mysql" => "mysql".into(),
        "ansi" | "generic" => "generic".into(),
        "sqlite" => "sqlite".into(),
        other => other.to_string().into(),
    }
}
