//! The component trait and the class handle returned by resolution.

use crate::context::ContextObserver;
use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Trait for pipeline components.
///
/// A component runs its process logic against the context in scope through
/// a [`ContextObserver`] and declares which context keys it touches.
pub trait Component: Send + Sync + Debug {
    /// Runs the component against the observed context.
    fn process(&self, observer: &mut ContextObserver<'_>) -> Result<()>;

    /// Keys that must be present before the component runs.
    fn required_keys(&self) -> Vec<String> {
        Vec::new()
    }

    /// Keys the component creates or overwrites.
    fn created_keys(&self) -> Vec<String> {
        Vec::new()
    }

    /// Keys the component removes.
    fn suppressed_keys(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Broad category of a component, reported as metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Reads and writes context only.
    #[default]
    ContextProcessor,
    /// Transforms a data payload.
    DataOperation,
    /// Inspects a data payload and reports a result.
    DataProbe,
    /// Any other category.
    Other(String),
}

impl ComponentKind {
    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ContextProcessor => "ContextProcessor",
            Self::DataOperation => "DataOperation",
            Self::DataProbe => "DataProbe",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Factory function type for creating components.
pub type ComponentFactory = Arc<dyn Fn() -> Box<dyn Component> + Send + Sync>;

/// A resolvable component "type": a name, a kind and a factory.
///
/// Cloning is cheap; every [`ComponentClass::instantiate`] call builds a new
/// component.
#[derive(Clone)]
pub struct ComponentClass {
    name: String,
    kind: ComponentKind,
    origin: Option<String>,
    factory: ComponentFactory,
}

impl ComponentClass {
    /// Creates a class from a factory.
    pub fn new<F>(name: impl Into<String>, kind: ComponentKind, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Component> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kind,
            origin: None,
            factory: Arc::new(factory),
        }
    }

    /// Creates a class for a component type with a `Default` constructor.
    pub fn of<T>(name: impl Into<String>, kind: ComponentKind) -> Self
    where
        T: Component + Default + 'static,
    {
        Self::new(name, kind, || Box::new(T::default()))
    }

    /// Records the source the class was resolved from.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// The class name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The component kind.
    #[must_use]
    pub const fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    /// The source that provided this class, if it came from a registry.
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Builds a fresh component.
    #[must_use]
    pub fn instantiate(&self) -> Box<dyn Component> {
        (self.factory)()
    }

    /// Metadata describing the class.
    #[must_use]
    pub fn metadata(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("class_name".to_string(), serde_json::json!(self.name));
        map.insert("component_type".to_string(), serde_json::json!(self.kind.as_str()));
        if let Some(ref origin) = self.origin {
            map.insert("origin".to_string(), serde_json::json!(origin));
        }
        map
    }
}

impl std::fmt::Debug for ComponentClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentClass")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}
