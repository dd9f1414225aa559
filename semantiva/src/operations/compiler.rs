//! Descriptor compilation: registry lookup with an operation-grammar fallback.

use super::OperationDescriptor;
use crate::components::ComponentClass;
use crate::errors::{Result, SemantivaError, UnknownContextOperationError};
use crate::registry::{get_component_registry, ComponentRegistry};
use std::sync::Arc;
use tracing::debug;

/// Turns a descriptor string into a component class.
///
/// A descriptor is first looked up by name in the registry. Only when that
/// lookup reports "not found" is it parsed as `rename:<old>:<new>` or
/// `delete:<key>`. Any other registry error propagates unchanged.
#[derive(Debug, Clone)]
pub struct OperationDescriptorCompiler {
    registry: Arc<ComponentRegistry>,
}

impl OperationDescriptorCompiler {
    /// Creates a compiler over `registry`.
    #[must_use]
    pub fn new(registry: Arc<ComponentRegistry>) -> Self {
        Self { registry }
    }

    /// Creates a compiler over the process-wide registry.
    #[must_use]
    pub fn with_global() -> Self {
        Self::new(get_component_registry())
    }

    /// The registry consulted first.
    #[must_use]
    pub fn registry(&self) -> &Arc<ComponentRegistry> {
        &self.registry
    }

    /// Resolves a descriptor.
    ///
    /// # Errors
    ///
    /// Returns `UnknownContextOperation` when neither the registry nor the
    /// operation grammar recognizes `descriptor`, and propagates fatal
    /// registry errors such as a failing namespace import.
    pub fn resolve(&self, descriptor: &str) -> Result<ComponentClass> {
        match self.registry.get_class(descriptor) {
            Ok(class) => Ok(class),
            Err(SemantivaError::ComponentNotFound(_)) => {
                let Some(operation) = OperationDescriptor::parse(descriptor) else {
                    return Err(UnknownContextOperationError::new(descriptor).into());
                };
                debug!(descriptor, operation = %operation, "Compiled context operation");
                Ok(operation.into_class())
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for OperationDescriptorCompiler {
    fn default() -> Self {
        Self::with_global()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentKind;
    use crate::context::{Context, ContextObserver, ContextStore, ContextType};
    use crate::operations::ContextPassthrough;
    use crate::registry::NamespaceCatalog;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn run(class: &ComponentClass, ctx: &mut Context) {
        class
            .instantiate()
            .process(&mut ContextObserver::new(ctx))
            .unwrap();
    }

    fn compiler() -> OperationDescriptorCompiler {
        OperationDescriptorCompiler::new(Arc::new(ComponentRegistry::new()))
    }

    #[test]
    fn test_rename_descriptor() {
        let class = compiler().resolve("rename:a:b").unwrap();
        assert_eq!(class.name(), "Rename_a_to_b");

        let mut ctx = Context::Single([("a", json!(5))].into_iter().collect());
        run(&class, &mut ctx);

        assert_eq!(ctx.get_value("b"), Some(&json!(5)));
        assert!(!ctx.contains_key("a"));
    }

    #[test]
    fn test_delete_descriptor() {
        let class = compiler().resolve("delete:a").unwrap();
        assert_eq!(class.name(), "Delete_a");

        let mut ctx = Context::Single(
            [("a", json!(1)), ("c", json!(7))].into_iter().collect::<ContextType>(),
        );
        run(&class, &mut ctx);

        assert_eq!(ctx.keys(), vec!["c".to_string()]);
    }

    #[test]
    fn test_unknown_descriptor() {
        let err = compiler().resolve("not_a_real_name").unwrap_err();
        assert!(matches!(err, SemantivaError::UnknownContextOperation(_)));
        assert!(err.to_string().contains("not_a_real_name"));
    }

    #[test]
    fn test_registered_name_wins() {
        let catalog = Arc::new(NamespaceCatalog::new());
        catalog.declare("shadowing", |ns| {
            ns.export(ComponentClass::of::<ContextPassthrough>(
                "delete:a",
                ComponentKind::ContextProcessor,
            ));
            Ok(())
        });
        let registry = ComponentRegistry::with_catalog(catalog);
        registry.register_modules("shadowing").unwrap();

        let class = OperationDescriptorCompiler::new(Arc::new(registry))
            .resolve("delete:a")
            .unwrap();
        assert_eq!(class.origin(), Some("namespace:shadowing"));

        let mut ctx = Context::Single([("a", json!(1))].into_iter().collect());
        run(&class, &mut ctx);
        assert_eq!(ctx.get_value("a"), Some(&json!(1)));
    }

    #[test]
    fn test_fatal_registry_error_propagates() {
        let catalog = Arc::new(NamespaceCatalog::new());
        catalog.declare("broken", |_| Err("cannot import".to_string()));
        let registry = ComponentRegistry::with_catalog(catalog);
        registry.register_modules("broken").unwrap();

        let err = OperationDescriptorCompiler::new(Arc::new(registry))
            .resolve("rename:a:b")
            .unwrap_err();
        assert!(matches!(err, SemantivaError::Load(_)));
    }
}
