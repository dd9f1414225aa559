//! Context management for pipeline execution.
//!
//! This module provides:
//! - The flat, collection and chained context shapes
//! - The `ContextStore` contract shared by all of them
//! - The `ContextObserver` that routes updates to the right scope

mod chained;
mod collection;
mod observer;
mod store;
mod types;

pub use chained::ChainedContext;
pub use collection::ContextCollectionType;
pub use observer::ContextObserver;
pub use store::{Context, ContextStore};
pub use types::ContextType;
