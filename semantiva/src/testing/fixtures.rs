//! Test fixtures for context and component-file testing.

use anyhow::Context as _;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::context::{ChainedContext, Context, ContextCollectionType, ContextType};

/// Builds contexts of any shape from the same seed data.
#[derive(Debug, Default)]
pub struct ContextFixture {
    /// Data to inject into the context.
    pub data: HashMap<String, serde_json::Value>,
    /// Per-item data, one map per slice.
    pub items: Vec<HashMap<String, serde_json::Value>>,
}

impl ContextFixture {
    /// Creates a new test context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds data to the context.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Adds an item slice.
    #[must_use]
    pub fn with_item(mut self, item: HashMap<String, serde_json::Value>) -> Self {
        self.items.push(item);
        self
    }

    /// Adds `count` empty item slices.
    #[must_use]
    pub fn with_empty_items(mut self, count: usize) -> Self {
        self.items.extend(std::iter::repeat_with(HashMap::new).take(count));
        self
    }

    /// Builds a flat context from the data.
    #[must_use]
    pub fn build_single(&self) -> Context {
        Context::Single(ContextType::from_data(self.data.clone()))
    }

    /// Builds a collection: data becomes the global scope, items the slices.
    #[must_use]
    pub fn build_collection(&self) -> Context {
        Context::Collection(ContextCollectionType::new(
            ContextType::from_data(self.data.clone()),
            self.items
                .iter()
                .cloned()
                .map(ContextType::from_data)
                .collect(),
        ))
    }

    /// Builds a chain with an empty local layer over the data.
    #[must_use]
    pub fn build_chained(&self) -> Context {
        Context::Chained(ChainedContext::new(Arc::new(ContextType::from_data(
            self.data.clone(),
        ))))
    }
}

/// Builds a component-file document from `(name, steps)` pairs.
#[must_use]
pub fn manifest_json(components: &[(&str, serde_json::Value)]) -> serde_json::Value {
    let components: serde_json::Map<String, serde_json::Value> = components
        .iter()
        .map(|(name, steps)| ((*name).to_string(), serde_json::json!({ "steps": steps })))
        .collect();
    serde_json::json!({ "components": components })
}

/// Writes a component file into `dir` and returns its path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_manifest(dir: &Path, file_name: &str, document: &serde_json::Value) -> anyhow::Result<PathBuf> {
    let path = dir.join(file_name);
    let body = serde_json::to_string_pretty(document)?;
    std::fs::write(&path, body)
        .with_context(|| format!("writing component file {}", path.display()))?;
    Ok(path)
}
