//! Importable namespaces of component classes.
//!
//! A namespace is declared once (at link time through `inventory`, or at run
//! time on a [`NamespaceCatalog`]) and imported on demand. Importing runs the
//! namespace's import function into a fresh [`Namespace`] every time.

use super::Resolver;
use crate::components::ComponentClass;
use crate::errors::ComponentLoadError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Import function signature for link-time namespace declarations.
pub type NamespaceImport = fn(&mut Namespace) -> Result<(), String>;

type DeclaredImport = Arc<dyn Fn(&mut Namespace) -> Result<(), String> + Send + Sync>;

/// A link-time namespace declaration.
///
/// ```rust,ignore
/// inventory::submit! {
///     NamespaceRegistration { id: "acme.audio", import: acme_audio_import }
/// }
/// ```
pub struct NamespaceRegistration {
    /// Namespace identifier.
    pub id: &'static str,
    /// Populates the namespace on import.
    pub import: NamespaceImport,
}

inventory::collect!(NamespaceRegistration);

/// An imported namespace: a named set of exported component classes.
#[derive(Debug, Clone)]
pub struct Namespace {
    id: String,
    classes: HashMap<String, ComponentClass>,
}

impl Namespace {
    /// Creates an empty namespace.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            classes: HashMap::new(),
        }
    }

    /// The namespace identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Exports a class under its own name.
    pub fn export(&mut self, class: ComponentClass) -> &mut Self {
        self.classes.insert(class.name().to_string(), class);
        self
    }

    /// Looks up an exported class.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ComponentClass> {
        self.classes.get(name)
    }

    /// Exported class names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.classes.keys().cloned().collect();
        names.sort();
        names
    }
}

/// The set of namespaces that can be imported.
///
/// Run-time declarations shadow link-time ones with the same identifier.
#[derive(Default)]
pub struct NamespaceCatalog {
    declared: RwLock<HashMap<String, DeclaredImport>>,
}

impl NamespaceCatalog {
    /// Creates a catalog with only link-time namespaces.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a namespace at run time.
    pub fn declare<F>(&self, id: impl Into<String>, import: F)
    where
        F: Fn(&mut Namespace) -> Result<(), String> + Send + Sync + 'static,
    {
        self.declared.write().insert(id.into(), Arc::new(import));
    }

    /// True if `id` can be imported.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.declared.read().contains_key(id) || Self::linked(id).is_some()
    }

    /// All importable namespace identifiers, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.declared.read().keys().cloned().collect();
        for reg in inventory::iter::<NamespaceRegistration> {
            if !ids.iter().any(|id| id == reg.id) {
                ids.push(reg.id.to_string());
            }
        }
        ids.sort();
        ids
    }

    /// Imports a namespace.
    ///
    /// Returns `Ok(None)` when no namespace with that identifier exists.
    ///
    /// # Errors
    ///
    /// Returns `NamespaceImport` when the namespace exists but its import
    /// function fails.
    pub fn import(&self, id: &str) -> Result<Option<Namespace>, ComponentLoadError> {
        let declared = self.declared.read().get(id).cloned();

        let mut namespace = Namespace::new(id);
        let outcome = if let Some(import) = declared {
            import(&mut namespace)
        } else if let Some(reg) = Self::linked(id) {
            (reg.import)(&mut namespace)
        } else {
            debug!(namespace = id, "Namespace not found");
            return Ok(None);
        };

        outcome.map_err(|reason| ComponentLoadError::namespace_import(id, reason))?;
        Ok(Some(namespace))
    }

    fn linked(id: &str) -> Option<&'static NamespaceRegistration> {
        inventory::iter::<NamespaceRegistration>
            .into_iter()
            .find(|reg| reg.id == id)
    }
}

impl std::fmt::Debug for NamespaceCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamespaceCatalog")
            .field("declared_count", &self.declared.read().len())
            .finish()
    }
}

/// Resolves names against one namespace.
#[derive(Debug, Clone)]
pub struct NamespaceResolver {
    namespace: String,
    catalog: Arc<NamespaceCatalog>,
}

impl NamespaceResolver {
    /// Creates a resolver for `namespace`.
    #[must_use]
    pub fn new(namespace: impl Into<String>, catalog: Arc<NamespaceCatalog>) -> Self {
        Self {
            namespace: namespace.into(),
            catalog,
        }
    }
}

impl Resolver for NamespaceResolver {
    fn describe(&self) -> String {
        format!("namespace:{}", self.namespace)
    }

    fn resolve(&self, name: &str) -> Result<Option<ComponentClass>, ComponentLoadError> {
        let Some(namespace) = self.catalog.import(&self.namespace)? else {
            return Ok(None);
        };

        Ok(namespace
            .get(name)
            .cloned()
            .map(|class| class.with_origin(self.describe())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentKind;
    use crate::operations::ContextPassthrough;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn passthrough(name: &str) -> ComponentClass {
        ComponentClass::of::<ContextPassthrough>(name, ComponentKind::ContextProcessor)
    }

    #[test]
    fn test_import_declared_namespace() {
        let catalog = NamespaceCatalog::new();
        catalog.declare("acme.audio", |ns| {
            ns.export(passthrough("Normalize"));
            Ok(())
        });

        let ns = catalog.import("acme.audio").unwrap().unwrap();
        assert_eq!(ns.id(), "acme.audio");
        assert_eq!(ns.names(), vec!["Normalize".to_string()]);
        assert!(catalog.contains("acme.audio"));
    }

    #[test]
    fn test_missing_namespace_is_none() {
        let catalog = NamespaceCatalog::new();
        assert!(catalog.import("nope").unwrap().is_none());
        assert!(!catalog.contains("nope"));
    }

    #[test]
    fn test_failing_import_is_error() {
        let catalog = NamespaceCatalog::new();
        catalog.declare("broken", |_| Err("missing dependency".to_string()));

        let err = catalog.import("broken").unwrap_err();
        assert!(err.to_string().contains("missing dependency"));
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_import_runs_every_time() {
        static IMPORTS: AtomicUsize = AtomicUsize::new(0);
        let catalog = NamespaceCatalog::new();
        catalog.declare("counted", |_| {
            IMPORTS.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        catalog.import("counted").unwrap();
        catalog.import("counted").unwrap();
        assert_eq!(IMPORTS.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_builtin_namespace_is_linked() {
        let catalog = NamespaceCatalog::new();
        assert!(catalog.contains(crate::registry::BUILTIN_NAMESPACE));
        assert!(catalog.ids().contains(&crate::registry::BUILTIN_NAMESPACE.to_string()));
    }

    #[test]
    fn test_resolver_sets_origin() {
        let catalog = Arc::new(NamespaceCatalog::new());
        catalog.declare("acme", |ns| {
            ns.export(passthrough("Thing"));
            Ok(())
        });
        let resolver = NamespaceResolver::new("acme", catalog);

        let class = resolver.resolve("Thing").unwrap().unwrap();
        assert_eq!(class.origin(), Some("namespace:acme"));
        assert!(resolver.resolve("Other").unwrap().is_none());
    }
}
