//! Operation registry: the canonical set of named Cadence operations
//! the client is permitted to run against the chain.
//!
//! The registry is pure data plus lookup. Operation source text is an
//! opaque asset; this layer never parses or inspects it. Lookups are
//! total over the registered set: an unknown name is a configuration
//! error, never a silent `None`.

mod cache;
pub mod operations;

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::RegistryError;

pub use cache::OperationCache;
pub use operations::ops;

/// Whether an operation reads or mutates chain state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Read-only script; no signer required, no side effects.
    Query,
    /// State-changing transaction; requires a signing authorization.
    Transaction,
}

impl OperationKind {
    pub(crate) const fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Transaction => "transaction",
        }
    }
}

/// Positional argument types an operation expects, in order.
///
/// Documentation-grade: enforced by the gateway's argument encoder,
/// not by the registry itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    Address,
    UInt64,
    UInt8,
    UFix64,
    String,
}

/// A named, registered operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDefinition {
    /// Stable key used by all callers.
    pub name: &'static str,
    pub kind: OperationKind,
    /// Cadence source submitted verbatim to the gateway.
    pub source: &'static str,
    /// Expected positional argument shape.
    pub args: &'static [ArgType],
}

/// In-memory table of operation definitions, immutable after startup.
///
/// Constructed explicitly and injected into consumers; there is no
/// ambient global table.
#[derive(Debug, Default)]
pub struct OperationRegistry {
    table: HashMap<&'static str, Arc<OperationDefinition>>,
}

impl OperationRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Create a registry preloaded with every builtin FlowWager
    /// operation.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for definition in operations::builtin() {
            // Builtin names are unique by construction.
            registry
                .define(definition)
                .unwrap_or_else(|err| unreachable!("builtin table is duplicate-free: {err}"));
        }
        registry
    }

    /// Register an operation.
    ///
    /// Registering the same definition twice is idempotent; registering
    /// a different definition under an existing name fails fast to
    /// catch accidental duplication at startup.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] when `definition.name` is
    /// already registered with different content.
    pub fn define(&mut self, definition: OperationDefinition) -> Result<(), RegistryError> {
        if let Some(existing) = self.table.get(definition.name) {
            if **existing == definition {
                return Ok(());
            }
            return Err(RegistryError::Duplicate {
                name: definition.name,
            });
        }
        self.table.insert(definition.name, Arc::new(definition));
        Ok(())
    }

    /// Look up an operation by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for any unregistered name.
    pub fn lookup(&self, name: &str) -> Result<Arc<OperationDefinition>, RegistryError> {
        self.table
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_string(),
            })
    }

    /// Iterate over all registered names.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.keys().copied()
    }

    /// Number of registered operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
