//! # Semantiva
//!
//! Component resolution and context propagation for semantiva pipelines.
//!
//! This crate provides:
//!
//! - **Component registry**: resolve a name to a component class from
//!   registered namespaces and component files, in a fixed precedence order
//! - **Context operations**: `rename:<old>:<new>` and `delete:<key>`
//!   descriptors compiled into ready-to-run components
//! - **Context observer**: scoped writes into flat, collection and chained
//!   contexts
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use semantiva::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(ComponentRegistry::new());
//! registry.register_paths("components/audio.json")?;
//!
//! let compiler = OperationDescriptorCompiler::new(Arc::clone(&registry));
//! let rename = compiler.resolve("rename:gain:raw_gain")?;
//!
//! let mut context = Context::default();
//! rename.instantiate().process(&mut ContextObserver::new(&mut context))?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod components;
pub mod config;
pub mod context;
pub mod errors;
pub mod observability;
pub mod operations;
pub mod registry;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::components::{Component, ComponentClass, ComponentKind};
    pub use crate::config::RegistryConfig;
    pub use crate::context::{
        ChainedContext, Context, ContextCollectionType, ContextObserver, ContextStore,
        ContextType,
    };
    pub use crate::errors::{
        ComponentLoadError, ComponentNotFoundError, ContextScopeError, RegistryError,
        Result, SemantivaError, UnknownContextOperationError,
    };
    pub use crate::observability::{init_logging, LoggingConfig};
    pub use crate::operations::{
        ContextDeleter, ContextPassthrough, ContextRenamer, OperationDescriptor,
        OperationDescriptorCompiler,
    };
    pub use crate::registry::{
        get_class, get_component_registry, register_modules, register_paths,
        ComponentRegistry, NamespaceCatalog, NamespaceRegistration, Resolver,
    };
}
