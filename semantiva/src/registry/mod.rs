//! Component resolution by name.
//!
//! A [`ComponentRegistry`] keeps two ordered source lists, namespaces and
//! filesystem paths, and resolves a name by asking each source in turn
//! through the [`Resolver`] capability. Namespaces always come before paths,
//! and within each list the first-registered source wins.

mod defaults;
mod global;
mod manifest;
mod namespace;
#[allow(clippy::module_inception)]
mod registry;
mod resolver;

pub use defaults::{BUILTIN_NAMESPACE, DEFAULT_NAMESPACES};
pub use global::{
    clear_component_registry, get_class, get_component_registry, register_modules,
    register_paths, set_component_registry,
};
pub use manifest::{ComponentManifest, ComponentUnit, FileResolver, ManifestEntry, ManifestStep};
pub use namespace::{Namespace, NamespaceCatalog, NamespaceImport, NamespaceRegistration, NamespaceResolver};
pub use registry::{ComponentRegistry, OneOrMany, RegisteredSource};
pub use resolver::{resolve_first, Resolver};
