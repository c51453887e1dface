//! Engine configuration.

use crate::dialect::Dialect;
use serde::Deserialize;

/// Default number of record types whose descriptors are cached.
pub const DEFAULT_CACHE_CAPACITY: usize = 16;

/// How a table name is derived from a record's type name.
///
/// The type name is always lowercased first. Explicit table names
/// (`#[structsql(table = "...")]`) bypass this rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableNaming {
    /// `User` → `users` for every statement.
    #[default]
    Plural,
    /// `User` → `user` for every statement.
    Singular,
    /// `users` for INSERT, `user` for UPDATE and DELETE.
    InsertPlural,
}

/// Configuration for [`Engine`](crate::Engine).
///
/// Deserializable so hosts can embed it in their own config files:
///
/// ```toml
/// dialect = "sqlite"
/// table_naming = "singular"
/// cache_capacity = 32
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Placeholder dialect.
    pub dialect: Dialect,
    /// Table name derivation rule.
    pub table_naming: TableNaming,
    /// Maximum number of cached type descriptors.
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::Postgres,
            table_naming: TableNaming::Plural,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder dialect.
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Set the table naming rule.
    pub fn table_naming(mut self, naming: TableNaming) -> Self {
        self.table_naming = naming;
        self
    }

    /// Set the descriptor cache capacity. `0` disables caching.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}
