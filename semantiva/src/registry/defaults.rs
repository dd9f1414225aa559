//! Sources registered by the default initialization step.

use super::{Namespace, NamespaceRegistration};
use crate::components::{ComponentClass, ComponentKind};
use crate::operations::ContextPassthrough;

/// The built-in namespace of context processors.
pub const BUILTIN_NAMESPACE: &str = "semantiva.context_processors";

/// Namespaces every registry created with defaults starts with.
pub const DEFAULT_NAMESPACES: &[&str] = &[BUILTIN_NAMESPACE];

fn import_context_processors(ns: &mut Namespace) -> Result<(), String> {
    ns.export(ComponentClass::of::<ContextPassthrough>(
        "ContextPassthrough",
        ComponentKind::ContextProcessor,
    ));
    Ok(())
}

inventory::submit! {
    NamespaceRegistration {
        id: BUILTIN_NAMESPACE,
        import: import_context_processors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::NamespaceCatalog;

    #[test]
    fn test_builtin_exports_passthrough() {
        let ns = NamespaceCatalog::new().import(BUILTIN_NAMESPACE).unwrap().unwrap();
        assert_eq!(ns.names(), vec!["ContextPassthrough".to_string()]);
    }
}
