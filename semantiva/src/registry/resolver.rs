//! The resolver capability and prioritized lookup.

use crate::components::ComponentClass;
use crate::errors::{ComponentLoadError, ComponentNotFoundError, Result};
use tracing::debug;

/// A source that can be asked for a component by name.
///
/// `Ok(None)` means "no match here, keep looking". `Err` is fatal and stops
/// resolution.
#[cfg_attr(test, mockall::automock)]
pub trait Resolver {
    /// Human-readable source description, e.g. `namespace:foo`.
    fn describe(&self) -> String;

    /// Looks up `name` in this source.
    fn resolve(&self, name: &str) -> Result<Option<ComponentClass>, ComponentLoadError>;
}

/// Asks each resolver in order and returns the first match.
///
/// # Errors
///
/// Propagates the first fatal resolver error, or returns
/// `ComponentNotFound` when every resolver reports no match.
pub fn resolve_first(resolvers: &[&dyn Resolver], name: &str) -> Result<ComponentClass> {
    for resolver in resolvers {
        let source = resolver.describe();
        debug!(source = %source, name, "Checking component source");

        if let Some(class) = resolver.resolve(name)? {
            debug!(source = %source, name, "Component resolved");
            return Ok(class);
        }
    }

    debug!(name, checked = resolvers.len(), "Component not found in any source");
    Err(ComponentNotFoundError::new(name).into())
}
