//! Bounded store of type descriptors, owned by one engine.

use crate::descriptor::TypeDescriptor;
use crate::record::TypeKey;
use std::collections::HashMap;
use std::sync::Arc;

/// Descriptors keyed by record type.
///
/// Holds at most `capacity` entries. Once full, new types are still resolved
/// by the engine but not stored; existing entries are never evicted.
#[derive(Debug)]
pub struct TypeCache {
    capacity: usize,
    entries: HashMap<TypeKey, Arc<TypeDescriptor>>,
}

impl TypeCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, key: &TypeKey) -> Option<Arc<TypeDescriptor>> {
        self.entries.get(key).cloned()
    }

    /// Store `descriptor` unless the cache is full. Returns whether it was
    /// stored (or already present).
    pub fn insert(&mut self, descriptor: Arc<TypeDescriptor>) -> bool {
        if self.entries.contains_key(descriptor.key()) {
            return true;
        }
        if self.is_full() {
            return false;
        }
        self.entries.insert(descriptor.key().clone(), descriptor);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
