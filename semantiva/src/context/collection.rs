//! Context for a collection of data items processed together.

use super::ContextType;
use crate::errors::ContextScopeError;
use serde::{Deserialize, Serialize};

/// A global context plus one slice per data item.
///
/// The number of slices is fixed at construction. A per-item write
/// touches exactly one slice; a collection-wide write lands in the
/// global scope and drops any per-slice override of the same key, so
/// every item sees it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextCollectionType {
    global: ContextType,
    items: Vec<ContextType>,
}

impl ContextCollectionType {
    /// Creates a collection from a global context and per-item slices.
    #[must_use]
    pub fn new(global: ContextType, items: Vec<ContextType>) -> Self {
        Self { global, items }
    }

    /// Creates a collection of `len` empty slices with an empty global scope.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self {
            global: ContextType::new(),
            items: vec![ContextType::new(); len],
        }
    }

    /// Number of item slices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the collection has no item slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The collection-wide scope.
    #[must_use]
    pub fn global_context(&self) -> &ContextType {
        &self.global
    }

    /// The per-item slices, in item order.
    #[must_use]
    pub fn items(&self) -> &[ContextType] {
        &self.items
    }

    /// Gets a collection-wide value.
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.global.get_value(key)
    }

    /// Writes a collection-wide value visible from every item.
    pub fn set_value(&mut self, key: impl Into<String>, value: serde_json::Value) {
        let key = key.into();
        for item in &mut self.items {
            item.delete_value(&key);
        }
        self.global.set_value(key, value);
    }

    /// Removes a key from the global scope and from every slice.
    pub fn delete_value(&mut self, key: &str) -> Option<serde_json::Value> {
        let mut removed = self.global.delete_value(key);
        for item in &mut self.items {
            if let Some(value) = item.delete_value(key) {
                removed.get_or_insert(value);
            }
        }
        removed
    }

    /// Reads a value as seen from item `index`: slice first, then global.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index` is not a valid slice.
    pub fn get_item_value(
        &self,
        index: usize,
        key: &str,
    ) -> Result<Option<&serde_json::Value>, ContextScopeError> {
        let item = self.item(index)?;
        Ok(item.get_value(key).or_else(|| self.global.get_value(key)))
    }

    /// Writes a value into slice `index` only.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index` is not a valid slice.
    pub fn set_item_value(
        &mut self,
        index: usize,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Result<(), ContextScopeError> {
        self.item_mut(index)?.set_value(key, value);
        Ok(())
    }

    /// Removes a key from slice `index` only.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index` is not a valid slice.
    pub fn delete_item_value(
        &mut self,
        index: usize,
        key: &str,
    ) -> Result<Option<serde_json::Value>, ContextScopeError> {
        Ok(self.item_mut(index)?.delete_value(key))
    }

    /// The raw slice at `index`, without global values merged in.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index` is not a valid slice.
    pub fn item(&self, index: usize) -> Result<&ContextType, ContextScopeError> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(ContextScopeError::IndexOutOfRange { index, len })
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut ContextType, ContextScopeError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(ContextScopeError::IndexOutOfRange { index, len })
    }

    /// Materializes the context as seen from item `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index` is not a valid slice.
    pub fn item_view(&self, index: usize) -> Result<ContextType, ContextScopeError> {
        let item = self.item(index)?;
        let mut view = self.global.clone();
        for (key, value) in item.iter() {
            view.set_value(key.clone(), value.clone());
        }
        Ok(view)
    }

    /// True if `key` is set globally or in any slice.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.global.contains_key(key) || self.items.iter().any(|item| item.contains_key(key))
    }

    /// All keys visible anywhere in the collection.
    ///
    /// Agrees with [`ContextCollectionType::contains_key`].
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys = self.global.keys();
        for item in &self.items {
            for key in item.keys() {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }
}
