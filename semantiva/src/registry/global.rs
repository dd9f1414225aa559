//! The process-wide default registry.

use super::{ComponentRegistry, OneOrMany};
use crate::components::ComponentClass;
use crate::errors::{RegistryError, Result};
use std::path::PathBuf;
use std::sync::Arc;

static GLOBAL_REGISTRY: parking_lot::RwLock<Option<Arc<ComponentRegistry>>> =
    parking_lot::RwLock::new(None);

/// Gets the process-wide registry, creating it with the default sources on
/// first use.
pub fn get_component_registry() -> Arc<ComponentRegistry> {
    let read = GLOBAL_REGISTRY.read();
    if let Some(ref registry) = *read {
        return Arc::clone(registry);
    }
    drop(read);

    let mut write = GLOBAL_REGISTRY.write();
    Arc::clone(write.get_or_insert_with(|| Arc::new(ComponentRegistry::new())))
}

/// Replaces the process-wide registry.
pub fn set_component_registry(registry: Arc<ComponentRegistry>) {
    *GLOBAL_REGISTRY.write() = Some(registry);
}

/// Drops the process-wide registry; the next access recreates it.
pub fn clear_component_registry() {
    *GLOBAL_REGISTRY.write() = None;
}

/// Registers namespaces in the process-wide registry.
///
/// # Errors
///
/// Returns `RegistryError::Frozen` if the registry is frozen.
pub fn register_modules(modules: impl OneOrMany<String>) -> Result<(), RegistryError> {
    get_component_registry().register_modules(modules)
}

/// Registers component file paths in the process-wide registry.
///
/// # Errors
///
/// Returns `RegistryError::Frozen` if the registry is frozen.
pub fn register_paths(paths: impl OneOrMany<PathBuf>) -> Result<(), RegistryError> {
    get_component_registry().register_paths(paths)
}

/// Resolves a name against the process-wide registry.
///
/// # Errors
///
/// See [`ComponentRegistry::get_class`].
pub fn get_class(name: &str) -> Result<ComponentClass> {
    get_component_registry().get_class(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::BUILTIN_NAMESPACE;

    #[test]
    fn test_global_registry() {
        clear_component_registry();

        let registry = get_component_registry();
        assert_eq!(registry.registered_modules(), vec![BUILTIN_NAMESPACE.to_string()]);
        assert!(get_class("ContextPassthrough").is_ok());

        register_paths("/no/such/components.json").unwrap();
        assert_eq!(get_component_registry().registered_paths().len(), 1);

        set_component_registry(Arc::new(ComponentRegistry::empty()));
        assert!(get_class("ContextPassthrough").unwrap_err().is_not_found());

        clear_component_registry();
    }
}
