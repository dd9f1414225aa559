//! Component files: declarative manifests loaded from registered paths.
//!
//! A component file is a JSON document mapping component names to a list of
//! context steps. Each lookup re-reads the file; nothing is cached.

use super::Resolver;
use crate::components::{Component, ComponentClass, ComponentKind};
use crate::context::ContextObserver;
use crate::errors::{ComponentLoadError, Result as SemantivaResult};
use crate::operations::rename_key;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Top-level structure of a component file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentManifest {
    /// Components defined by the file, by name.
    #[serde(default)]
    pub components: BTreeMap<String, ManifestEntry>,
}

/// One component definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    /// Component category.
    #[serde(default)]
    pub kind: ComponentKind,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Steps applied in order.
    pub steps: Vec<ManifestStep>,
}

/// A single context step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ManifestStep {
    /// Move a value between keys.
    Rename {
        /// Source key.
        from: String,
        /// Destination key.
        to: String,
    },
    /// Write a collection-wide (or flat) value.
    Set {
        /// Key to write.
        key: String,
        /// Value to write.
        value: serde_json::Value,
    },
    /// Remove a key.
    Delete {
        /// Key to remove.
        key: String,
    },
}

impl ManifestStep {
    fn keys(&self) -> Vec<&str> {
        match self {
            Self::Rename { from, to } => vec![from.as_str(), to.as_str()],
            Self::Set { key, .. } | Self::Delete { key } => vec![key.as_str()],
        }
    }
}

impl ComponentManifest {
    /// Parses and validates a manifest.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn from_json_str(source: &str) -> Result<Self, String> {
        let manifest: Self = serde_json::from_str(source).map_err(|e| e.to_string())?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<(), String> {
        for (name, entry) in &self.components {
            if name.trim().is_empty() {
                return Err("component name must not be empty".to_string());
            }
            for (position, step) in entry.steps.iter().enumerate() {
                if step.keys().iter().any(|key| key.is_empty()) {
                    return Err(format!("component `{name}` step {position} has an empty key"));
                }
            }
        }
        Ok(())
    }
}

/// A component built from manifest steps.
#[derive(Debug, Clone)]
pub struct ManifestComponent {
    steps: Arc<Vec<ManifestStep>>,
}

impl Component for ManifestComponent {
    fn process(&self, observer: &mut ContextObserver<'_>) -> SemantivaResult<()> {
        for step in self.steps.iter() {
            match step {
                ManifestStep::Rename { from, to } => rename_key(observer, from, to)?,
                ManifestStep::Set { key, value } => observer.update(key.clone(), value.clone(), None)?,
                ManifestStep::Delete { key } => {
                    observer.delete(key, None)?;
                }
            }
        }
        Ok(())
    }

    fn required_keys(&self) -> Vec<String> {
        let mut produced: Vec<&str> = Vec::new();
        let mut required = Vec::new();
        for step in self.steps.iter() {
            match step {
                ManifestStep::Rename { from, to } => {
                    if !produced.contains(&from.as_str()) && !required.contains(from) {
                        required.push(from.clone());
                    }
                    produced.push(to);
                }
                ManifestStep::Set { key, .. } => produced.push(key),
                ManifestStep::Delete { .. } => {}
            }
        }
        required
    }

    fn created_keys(&self) -> Vec<String> {
        let mut created: Vec<String> = Vec::new();
        for step in self.steps.iter() {
            let key = match step {
                ManifestStep::Rename { to, .. } => to,
                ManifestStep::Set { key, .. } => key,
                ManifestStep::Delete { .. } => continue,
            };
            if !created.contains(key) {
                created.push(key.clone());
            }
        }
        created
    }

    fn suppressed_keys(&self) -> Vec<String> {
        let mut suppressed: Vec<String> = Vec::new();
        for step in self.steps.iter() {
            let key = match step {
                ManifestStep::Rename { from, .. } => from,
                ManifestStep::Delete { key } => key,
                ManifestStep::Set { .. } => continue,
            };
            if !suppressed.contains(key) {
                suppressed.push(key.clone());
            }
        }
        suppressed
    }
}

/// A loaded component file, named after the file stem.
#[derive(Debug, Clone)]
pub struct ComponentUnit {
    name: String,
    path: PathBuf,
    classes: HashMap<String, ComponentClass>,
}

impl ComponentUnit {
    /// Loads a component file.
    ///
    /// # Errors
    ///
    /// Returns `FileExecution` if the file cannot be read or is not a valid
    /// manifest.
    pub fn load(path: &Path) -> Result<Self, ComponentLoadError> {
        let name = unit_name(path);
        let origin = format!("path:{}", path.display());

        let source = std::fs::read_to_string(path)
            .map_err(|e| ComponentLoadError::file_execution(path, &name, e.to_string()))?;
        let manifest = ComponentManifest::from_json_str(&source)
            .map_err(|reason| ComponentLoadError::file_execution(path, &name, reason))?;

        let classes = manifest
            .components
            .into_iter()
            .map(|(component, entry)| {
                let steps = Arc::new(entry.steps);
                let class = ComponentClass::new(component.clone(), entry.kind, move || {
                    Box::new(ManifestComponent {
                        steps: Arc::clone(&steps),
                    })
                })
                .with_origin(origin.clone());
                (component, class)
            })
            .collect();

        Ok(Self {
            name,
            path: path.to_path_buf(),
            classes,
        })
    }

    /// Synthetic unit name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The file the unit was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Looks up a component class in the unit.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ComponentClass> {
        self.classes.get(name)
    }

    /// Component names defined by the unit, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.classes.keys().cloned().collect();
        names.sort();
        names
    }
}

fn unit_name(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| "component_unit".to_string(), |stem| stem.to_string_lossy().into_owned())
}

/// Resolves names against one component file.
#[derive(Debug, Clone)]
pub struct FileResolver {
    path: PathBuf,
}

impl FileResolver {
    /// Creates a resolver for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Resolver for FileResolver {
    fn describe(&self) -> String {
        format!("path:{}", self.path.display())
    }

    fn resolve(&self, name: &str) -> Result<Option<ComponentClass>, ComponentLoadError> {
        if !self.path.is_file() {
            debug!(path = %self.path.display(), "Component path is not a file; skipping");
            return Ok(None);
        }

        match ComponentUnit::load(&self.path) {
            Ok(unit) => Ok(unit.get(name).cloned()),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Error loading component file; skipping"
                );
                Ok(None)
            }
        }
    }
}
