//! Resolve a record to its type descriptor.

use crate::cache::TypeCache;
use crate::descriptor::TypeDescriptor;
use crate::error::{BuildError, BuildResult};
use crate::record::{Record, Reflect, Reflected};
use std::sync::Arc;

/// A record together with its descriptor.
pub(crate) struct Resolved<'r> {
    pub(crate) record: &'r dyn Record,
    pub(crate) descriptor: Arc<TypeDescriptor>,
}

/// Validate `input` as a named record and look up (or build and cache) its
/// descriptor.
pub(crate) fn resolve<'r, R>(cache: &mut TypeCache, input: &'r R) -> BuildResult<Resolved<'r>>
where
    R: Reflect + ?Sized,
{
    let record = match input.reflect() {
        Reflected::Record(record) => record,
        Reflected::Absent => return Err(BuildError::InvalidInput),
        Reflected::Other(kind) => return Err(BuildError::NotARecordShape { kind }),
    };

    let type_name = match record.type_name() {
        Some(name) if !name.is_empty() => name,
        _ => return Err(BuildError::UnnamedType),
    };

    let key = record.type_key();
    if let Some(descriptor) = cache.get(&key) {
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "structsql", type_name, "descriptor cache hit");
        return Ok(Resolved { record, descriptor });
    }

    let descriptor = Arc::new(TypeDescriptor::build(key, record, type_name));

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "structsql",
        type_name,
        columns = descriptor.field_count(),
        primary_key = ?descriptor.primary_key_column(),
        "built type descriptor"
    );

    if !cache.insert(descriptor.clone()) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "structsql",
            type_name,
            capacity = cache.capacity(),
            "descriptor cache full; resolving uncached"
        );
    }

    Ok(Resolved { record, descriptor })
}
