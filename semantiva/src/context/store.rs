//! The read/write contract shared by every context shape.

use super::{ChainedContext, ContextCollectionType, ContextType};
use serde_json::Value;

/// Key-value access common to all context shapes.
///
/// For a collection, these methods address the collection-wide scope.
/// For a chained context, reads resolve through every layer while writes
/// and deletes target the innermost layer.
pub trait ContextStore {
    /// Gets a value by key.
    fn get_value(&self, key: &str) -> Option<&Value>;

    /// Sets a value.
    fn set_value(&mut self, key: String, value: Value);

    /// Removes a key, returning its value if it was present.
    fn delete_value(&mut self, key: &str) -> Option<Value>;

    /// All visible keys.
    fn keys(&self) -> Vec<String>;

    /// Checks if a key is visible. Agrees with [`ContextStore::keys`].
    fn contains_key(&self, key: &str) -> bool {
        self.get_value(key).is_some()
    }
}

impl ContextStore for ContextType {
    fn get_value(&self, key: &str) -> Option<&Value> {
        Self::get_value(self, key)
    }

    fn set_value(&mut self, key: String, value: Value) {
        Self::set_value(self, key, value);
    }

    fn delete_value(&mut self, key: &str) -> Option<Value> {
        Self::delete_value(self, key)
    }

    fn keys(&self) -> Vec<String> {
        Self::keys(self)
    }
}

impl ContextStore for ContextCollectionType {
    fn get_value(&self, key: &str) -> Option<&Value> {
        Self::get_value(self, key)
    }

    fn set_value(&mut self, key: String, value: Value) {
        Self::set_value(self, key, value);
    }

    fn delete_value(&mut self, key: &str) -> Option<Value> {
        Self::delete_value(self, key)
    }

    fn keys(&self) -> Vec<String> {
        Self::keys(self)
    }

    fn contains_key(&self, key: &str) -> bool {
        Self::contains_key(self, key)
    }
}

impl ContextStore for ChainedContext {
    fn get_value(&self, key: &str) -> Option<&Value> {
        Self::get_value(self, key)
    }

    fn set_value(&mut self, key: String, value: Value) {
        Self::set_value(self, key, value);
    }

    fn delete_value(&mut self, key: &str) -> Option<Value> {
        Self::delete_value(self, key)
    }

    fn keys(&self) -> Vec<String> {
        Self::keys(self)
    }
}

/// The context in scope for a pipeline node.
#[derive(Debug, Clone, PartialEq)]
pub enum Context {
    /// A flat context for a single data item.
    Single(ContextType),
    /// A global scope plus per-item slices.
    Collection(ContextCollectionType),
    /// A branch-local layer over shared parent layers.
    Chained(ChainedContext),
}

impl Context {
    /// Short name of the shape, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Single(_) => "single",
            Self::Collection(_) => "collection",
            Self::Chained(_) => "chained",
        }
    }

    /// Number of item slices (zero for non-collection shapes).
    #[must_use]
    pub fn slice_count(&self) -> usize {
        match self {
            Self::Collection(c) => c.len(),
            _ => 0,
        }
    }

    /// Returns the flat context, if that is the shape.
    #[must_use]
    pub const fn as_single(&self) -> Option<&ContextType> {
        match self {
            Self::Single(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the collection, if that is the shape.
    #[must_use]
    pub const fn as_collection(&self) -> Option<&ContextCollectionType> {
        match self {
            Self::Collection(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the chain, if that is the shape.
    #[must_use]
    pub const fn as_chained(&self) -> Option<&ChainedContext> {
        match self {
            Self::Chained(c) => Some(c),
            _ => None,
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::Single(ContextType::new())
    }
}

impl From<ContextType> for Context {
    fn from(ctx: ContextType) -> Self {
        Self::Single(ctx)
    }
}

impl From<ContextCollectionType> for Context {
    fn from(ctx: ContextCollectionType) -> Self {
        Self::Collection(ctx)
    }
}

impl From<ChainedContext> for Context {
    fn from(ctx: ChainedContext) -> Self {
        Self::Chained(ctx)
    }
}

impl ContextStore for Context {
    fn get_value(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Single(c) => c.get_value(key),
            Self::Collection(c) => c.get_value(key),
            Self::Chained(c) => c.get_value(key),
        }
    }

    fn set_value(&mut self, key: String, value: Value) {
        match self {
            Self::Single(c) => c.set_value(key, value),
            Self::Collection(c) => c.set_value(key, value),
            Self::Chained(c) => c.set_value(key, value),
        }
    }

    fn delete_value(&mut self, key: &str) -> Option<Value> {
        match self {
            Self::Single(c) => c.delete_value(key),
            Self::Collection(c) => c.delete_value(key),
            Self::Chained(c) => c.delete_value(key),
        }
    }

    fn keys(&self) -> Vec<String> {
        match self {
            Self::Single(c) => c.keys(),
            Self::Collection(c) => c.keys(),
            Self::Chained(c) => c.keys(),
        }
    }

    fn contains_key(&self, key: &str) -> bool {
        match self {
            Self::Single(c) => c.contains_key(key),
            Self::Collection(c) => c.contains_key(key),
            Self::Chained(c) => c.contains_key(key),
        }
    }
}
