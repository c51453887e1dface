//! The statement-building engine.

use crate::cache::TypeCache;
use crate::config::EngineConfig;
use crate::descriptor::TypeDescriptor;
use crate::dialect::Dialect;
use crate::error::BuildResult;
use crate::introspect::{self, Resolved};
use crate::record::Reflect;
use std::sync::Arc;

/// Builds INSERT/UPDATE/DELETE statements from records.
///
/// An engine owns its descriptor cache and a reusable SQL buffer, so it needs
/// `&mut self` for every call. Use one engine per thread (or per worker), or
/// wrap a shared one in a `Mutex`.
///
/// ```ignore
/// use structsql::{Engine, Record};
///
/// #[derive(Record)]
/// struct User {
///     id: i64,
///     name: String,
///     email: String,
/// }
///
/// let mut engine = Engine::new();
/// let mut sql = String::new();
/// let mut values = Vec::new();
///
/// let user = User { id: 1, name: "Alice".into(), email: "alice@example.com".into() };
/// engine.insert(&user, &mut sql, &mut values)?;
/// assert_eq!(sql, "INSERT INTO users (id, name, email) VALUES ($1, $2, $3)");
/// ```
#[derive(Debug)]
pub struct Engine {
    pub(crate) config: EngineConfig,
    pub(crate) cache: TypeCache,
    /// SQL assembly buffer, cleared per call.
    pub(crate) buf: String,
    /// Field indices selected for an UPDATE's SET list, cleared per call.
    pub(crate) selected: Vec<usize>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Engine with the default configuration (Postgres placeholders).
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_dialect(dialect: Dialect) -> Self {
        Self::with_config(EngineConfig::default().dialect(dialect))
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            cache: TypeCache::new(config.cache_capacity),
            config,
            buf: String::with_capacity(128),
            selected: Vec::new(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.config.dialect
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of record types with a cached descriptor.
    pub fn cached_types(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Resolve `record`'s type descriptor (columns, primary key, table).
    pub fn describe<R: Reflect + ?Sized>(&mut self, record: &R) -> BuildResult<Arc<TypeDescriptor>> {
        Ok(self.resolve(record)?.descriptor)
    }

    pub(crate) fn resolve<'r, R: Reflect + ?Sized>(
        &mut self,
        record: &'r R,
    ) -> BuildResult<Resolved<'r>> {
        introspect::resolve(&mut self.cache, record)
    }
}
