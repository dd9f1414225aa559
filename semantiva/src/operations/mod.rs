//! Context-mutating operations and descriptor compilation.
//!
//! Descriptors are resolved registry-first; only a "component not found"
//! falls through to the `rename:` / `delete:` grammar.

mod builtin;
mod compiler;
mod descriptor;

pub use builtin::{
    context_deleter_factory, context_renamer_factory, rename_key, ContextDeleter,
    ContextPassthrough, ContextRenamer,
};
pub use compiler::OperationDescriptorCompiler;
pub use descriptor::OperationDescriptor;
