//! The component registry.

use super::{FileResolver, NamespaceCatalog, NamespaceResolver, Resolver, DEFAULT_NAMESPACES};
use crate::components::ComponentClass;
use crate::config::RegistryConfig;
use crate::errors::{RegistryError, Result};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// A registered component source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegisteredSource {
    /// An importable namespace identifier.
    Namespace(String),
    /// A component file on disk.
    Path(PathBuf),
}

impl std::fmt::Display for RegisteredSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Namespace(id) => write!(f, "namespace:{id}"),
            Self::Path(path) => write!(f, "path:{}", path.display()),
        }
    }
}

/// A single value or a sequence of values accepted by registration.
pub trait OneOrMany<T> {
    /// Flattens into a list.
    fn into_vec(self) -> Vec<T>;
}

impl OneOrMany<String> for &str {
    fn into_vec(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl OneOrMany<String> for String {
    fn into_vec(self) -> Vec<String> {
        vec![self]
    }
}

impl OneOrMany<String> for &String {
    fn into_vec(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<S: Into<String>> OneOrMany<String> for Vec<S> {
    fn into_vec(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String>, const N: usize> OneOrMany<String> for [S; N] {
    fn into_vec(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl OneOrMany<PathBuf> for &str {
    fn into_vec(self) -> Vec<PathBuf> {
        vec![PathBuf::from(self)]
    }
}

impl OneOrMany<PathBuf> for String {
    fn into_vec(self) -> Vec<PathBuf> {
        vec![PathBuf::from(self)]
    }
}

impl OneOrMany<PathBuf> for PathBuf {
    fn into_vec(self) -> Vec<PathBuf> {
        vec![self]
    }
}

impl OneOrMany<PathBuf> for &Path {
    fn into_vec(self) -> Vec<PathBuf> {
        vec![self.to_path_buf()]
    }
}

impl OneOrMany<PathBuf> for &PathBuf {
    fn into_vec(self) -> Vec<PathBuf> {
        vec![self.clone()]
    }
}

impl<S: Into<PathBuf>> OneOrMany<PathBuf> for Vec<S> {
    fn into_vec(self) -> Vec<PathBuf> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<PathBuf>, const N: usize> OneOrMany<PathBuf> for [S; N] {
    fn into_vec(self) -> Vec<PathBuf> {
        self.into_iter().map(Into::into).collect()
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    modules: Vec<String>,
    paths: Vec<PathBuf>,
    frozen: bool,
}

/// Catalog of component sources, resolved in registration order.
///
/// Namespaces are searched before paths. Registration is idempotent and
/// keeps first-registration order, so precedence is deterministic.
///
/// All state sits behind a lock: registration and lookup may run from any
/// thread. Lookups copy the source lists and release the lock before any
/// namespace import or file read. [`ComponentRegistry::freeze`] closes
/// registration for callers that want a fixed source set.
pub struct ComponentRegistry {
    state: RwLock<RegistryState>,
    catalog: Arc<NamespaceCatalog>,
}

impl ComponentRegistry {
    /// Creates a registry with the default sources.
    #[must_use]
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.register_defaults();
        registry
    }

    /// Creates a registry with no sources.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_catalog(Arc::new(NamespaceCatalog::new()))
    }

    /// Creates a registry with no sources over a shared namespace catalog.
    #[must_use]
    pub fn with_catalog(catalog: Arc<NamespaceCatalog>) -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
            catalog,
        }
    }

    /// Builds a registry from configuration.
    ///
    /// # Errors
    ///
    /// Propagates registration errors.
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        let registry = Self::empty();
        if config.include_defaults {
            registry.register_defaults();
        }
        registry.register_modules(config.modules.clone())?;
        registry.register_paths(config.paths.clone())?;
        if config.freeze {
            registry.freeze();
        }
        Ok(registry)
    }

    fn register_defaults(&self) {
        let mut state = self.state.write();
        for id in DEFAULT_NAMESPACES {
            if !state.modules.iter().any(|m| m == id) {
                state.modules.push((*id).to_string());
            }
        }
    }

    /// The namespace catalog used for imports.
    #[must_use]
    pub fn catalog(&self) -> &Arc<NamespaceCatalog> {
        &self.catalog
    }

    /// Registers one or more namespace identifiers.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Frozen` if the registry is frozen.
    pub fn register_modules(&self, modules: impl OneOrMany<String>) -> Result<(), RegistryError> {
        let modules = modules.into_vec();
        let mut state = self.state.write();
        if state.frozen {
            if let Some(first) = modules.first() {
                return Err(RegistryError::Frozen {
                    source_kind: "namespace",
                    value: first.clone(),
                });
            }
        }

        for module in modules {
            if state.modules.contains(&module) {
                debug!(namespace = %module, "Namespace already registered");
                continue;
            }
            info!(namespace = %module, "Registered component namespace");
            state.modules.push(module);
        }
        Ok(())
    }

    /// Registers one or more component file paths.
    ///
    /// Paths are not checked for existence here.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Frozen` if the registry is frozen.
    pub fn register_paths(&self, paths: impl OneOrMany<PathBuf>) -> Result<(), RegistryError> {
        let paths = paths.into_vec();
        let mut state = self.state.write();
        if state.frozen {
            if let Some(first) = paths.first() {
                return Err(RegistryError::Frozen {
                    source_kind: "path",
                    value: first.display().to_string(),
                });
            }
        }

        for path in paths {
            if state.paths.contains(&path) {
                debug!(path = %path.display(), "Path already registered");
                continue;
            }
            info!(path = %path.display(), "Registered component path");
            state.paths.push(path);
        }
        Ok(())
    }

    /// Registered namespaces, in precedence order.
    #[must_use]
    pub fn registered_modules(&self) -> Vec<String> {
        self.state.read().modules.clone()
    }

    /// Registered paths, in precedence order.
    #[must_use]
    pub fn registered_paths(&self) -> Vec<PathBuf> {
        self.state.read().paths.clone()
    }

    /// Every registered source, in search order.
    #[must_use]
    pub fn sources(&self) -> Vec<RegisteredSource> {
        let state = self.state.read();
        state
            .modules
            .iter()
            .cloned()
            .map(RegisteredSource::Namespace)
            .chain(state.paths.iter().cloned().map(RegisteredSource::Path))
            .collect()
    }

    /// Closes registration. Lookups are unaffected.
    pub fn freeze(&self) {
        self.state.write().frozen = true;
        debug!("Component registry frozen");
    }

    /// True once [`ComponentRegistry::freeze`] has been called.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.state.read().frozen
    }

    /// Builds the prioritized resolver list from a snapshot of the sources.
    #[must_use]
    pub fn resolvers(&self) -> Vec<Box<dyn Resolver>> {
        self.sources()
            .into_iter()
            .map(|source| -> Box<dyn Resolver> {
                match source {
                    RegisteredSource::Namespace(id) => {
                        Box::new(NamespaceResolver::new(id, Arc::clone(&self.catalog)))
                    }
                    RegisteredSource::Path(path) => Box::new(FileResolver::new(path)),
                }
            })
            .collect()
    }

    /// Resolves `name` to a component class.
    ///
    /// # Errors
    ///
    /// Returns `ComponentNotFound` when no source has the name, or a `Load`
    /// error when a namespace import fails. Broken component files are
    /// logged and skipped.
    pub fn get_class(&self, name: &str) -> Result<ComponentClass> {
        let resolvers = self.resolvers();
        let resolvers: Vec<&dyn Resolver> = resolvers.iter().map(|r| &**r).collect();
        super::resolve_first(&resolvers, name)
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("ComponentRegistry")
            .field("modules", &state.modules)
            .field("paths", &state.paths)
            .field("frozen", &state.frozen)
            .finish()
    }
}
