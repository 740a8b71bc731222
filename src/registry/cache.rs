//! Memoized accessor over the operation registry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{OperationDefinition, OperationRegistry};
use crate::error::RegistryError;

/// Memoizes registry lookups so repeated requests for the same
/// operation resolve once.
///
/// The memo table is append-only: entries are written once per key and
/// never updated. Concurrent first-calls for the same name are
/// serialized by the write lock (check-then-insert), so two divergent
/// entries cannot exist. Failed lookups are never cached.
#[derive(Debug)]
pub struct OperationCache {
    registry: Arc<OperationRegistry>,
    memo: RwLock<HashMap<&'static str, Arc<OperationDefinition>>>,
}

impl OperationCache {
    /// Wrap a registry in a fresh, empty cache.
    #[must_use]
    pub fn new(registry: Arc<OperationRegistry>) -> Self {
        Self {
            registry,
            memo: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve an operation by name, memoizing the result.
    ///
    /// Repeated calls for the same name return the identical
    /// definition (`Arc::ptr_eq` holds).
    ///
    /// # Errors
    ///
    /// Propagates [`RegistryError::NotFound`] unchanged; the failure is
    /// not cached.
    pub fn get(&self, name: &str) -> Result<Arc<OperationDefinition>, RegistryError> {
        if let Some(definition) = self.memo.read().get(name) {
            return Ok(Arc::clone(definition));
        }

        let mut memo = self.memo.write();
        // Re-check under the write lock: another caller may have
        // resolved the name between our read and write acquisition.
        if let Some(definition) = memo.get(name) {
            return Ok(Arc::clone(definition));
        }
        let definition = self.registry.lookup(name)?;
        memo.insert(definition.name, Arc::clone(&definition));
        Ok(definition)
    }

    /// Drop all memoized entries; subsequent [`get`](Self::get) calls
    /// re-resolve from the registry. Test/dev hook, not part of the
    /// steady-state request path.
    pub fn clear(&self) {
        self.memo.write().clear();
    }

    /// Number of memoized entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.memo.read().len()
    }

    /// Check if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.memo.read().is_empty()
    }
}
