//! The flat key-value context.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A flat mapping of string keys to arbitrary values.
///
/// This is the context shape carried alongside a single data item.
/// It performs no validation of keys or values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextType {
    data: HashMap<String, serde_json::Value>,
}

impl ContextType {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context from existing data.
    #[must_use]
    pub fn from_data(data: HashMap<String, serde_json::Value>) -> Self {
        Self { data }
    }

    /// Gets a value by key.
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Sets a value, overwriting any previous one.
    pub fn set_value(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    /// Removes a key, returning its value if it was present.
    pub fn delete_value(&mut self, key: &str) -> Option<serde_json::Value> {
        self.data.remove(key)
    }

    /// Checks if a key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Returns all keys.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the context is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates over entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.data.iter()
    }

    /// Returns a copy of all data.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        self.data.clone()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl<K: Into<String>> FromIterator<(K, serde_json::Value)> for ContextType {
    fn from_iter<I: IntoIterator<Item = (K, serde_json::Value)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl From<HashMap<String, serde_json::Value>> for ContextType {
    fn from(data: HashMap<String, serde_json::Value>) -> Self {
        Self::from_data(data)
    }
}

impl std::fmt::Display for ContextType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.data.keys().collect();
        keys.sort();
        write!(f, "ContextType(")?;
        for (i, key) in keys.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}={}", self.data[*key])?;
        }
        write!(f, ")")
    }
}
