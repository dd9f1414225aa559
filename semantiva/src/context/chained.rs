//! Layered context used for pipeline branching.

use super::ContextType;
use std::sync::Arc;

/// An ordered chain of context layers, innermost first.
///
/// Only the innermost (local) layer is owned and writable. Outer layers are
/// shared, immutable snapshots of the parent scope, so a branch can never
/// mutate its parent or a sibling branch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainedContext {
    local: ContextType,
    parents: Vec<Arc<ContextType>>,
}

impl ChainedContext {
    /// Creates a chain with an empty local layer over `parent`.
    #[must_use]
    pub fn new(parent: Arc<ContextType>) -> Self {
        Self {
            local: ContextType::new(),
            parents: vec![parent],
        }
    }

    /// Creates a chain from an explicit local layer and outer layers.
    #[must_use]
    pub fn from_layers(local: ContextType, parents: Vec<Arc<ContextType>>) -> Self {
        Self { local, parents }
    }

    /// The writable innermost layer.
    #[must_use]
    pub fn local(&self) -> &ContextType {
        &self.local
    }

    /// The read-through outer layers, innermost first.
    #[must_use]
    pub fn parents(&self) -> &[Arc<ContextType>] {
        &self.parents
    }

    /// Iterates every layer, innermost first.
    pub fn layers(&self) -> impl Iterator<Item = &ContextType> {
        std::iter::once(&self.local).chain(self.parents.iter().map(AsRef::as_ref))
    }

    /// Number of layers including the local one.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.parents.len()
    }

    /// Resolves a key by scanning layers front to back.
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.layers().find_map(|layer| layer.get_value(key))
    }

    /// Writes into the innermost layer.
    pub fn set_value(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.local.set_value(key, value);
    }

    /// Removes a key from the innermost layer only.
    ///
    /// A value with the same key in an outer layer stays visible.
    pub fn delete_value(&mut self, key: &str) -> Option<serde_json::Value> {
        self.local.delete_value(key)
    }

    /// True if any layer holds `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.layers().any(|layer| layer.contains_key(key))
    }

    /// All keys visible through the chain.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.flatten().keys()
    }

    /// Collapses the chain into a single flat context, inner values winning.
    #[must_use]
    pub fn flatten(&self) -> ContextType {
        let mut flat = ContextType::new();
        for layer in self.layers().collect::<Vec<_>>().into_iter().rev() {
            for (key, value) in layer.iter() {
                flat.set_value(key.clone(), value.clone());
            }
        }
        flat
    }

    /// Opens a child scope: the current chain becomes read-only for the child.
    #[must_use]
    pub fn branch(&self) -> Self {
        let mut parents = Vec::with_capacity(self.parents.len() + 1);
        parents.push(Arc::new(self.local.clone()));
        parents.extend(self.parents.iter().cloned());
        Self {
            local: ContextType::new(),
            parents,
        }
    }

    /// Takes the local layer out of the chain.
    #[must_use]
    pub fn into_local(self) -> ContextType {
        self.local
    }
}
