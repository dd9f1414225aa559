//! Error types for the semantiva component layer.
//!
//! The taxonomy mirrors how failures are treated during resolution:
//! a missing component is recoverable, a broken namespace is fatal,
//! and a broken component file is demoted to "no match" before it ever
//! reaches a caller.

use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for semantiva operations.
#[derive(Debug, Error)]
pub enum SemantivaError {
    /// No registered source provides the requested component.
    #[error("{0}")]
    ComponentNotFound(#[from] ComponentNotFoundError),

    /// A descriptor matched neither a component nor the operation grammar.
    #[error("{0}")]
    UnknownContextOperation(#[from] UnknownContextOperationError),

    /// A component source failed to load.
    #[error("{0}")]
    Load(#[from] ComponentLoadError),

    /// A context update was addressed to the wrong scope.
    #[error("{0}")]
    Scope(#[from] ContextScopeError),

    /// A registry lifecycle violation.
    #[error("{0}")]
    Registry(#[from] RegistryError),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SemantivaError {
    /// True when the error is a plain "component not found".
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ComponentNotFound(_))
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        match self {
            Self::ComponentNotFound(err) => err.to_dict(),
            Self::UnknownContextOperation(err) => err.to_dict(),
            Self::Load(err) => err.to_dict(),
            Self::Scope(err) => err.to_dict(),
            Self::Registry(err) => err.to_dict(),
            _ => {
                let mut map = HashMap::new();
                map.insert("type".to_string(), serde_json::json!("SemantivaError"));
                map.insert("message".to_string(), serde_json::json!(self.to_string()));
                map
            }
        }
    }
}

impl From<serde_json::Error> for SemantivaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result alias used across the crate.
pub type Result<T, E = SemantivaError> = std::result::Result<T, E>;

/// Raised when a component name matches no registered source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("component not found: `{name}`")]
pub struct ComponentNotFoundError {
    /// The name that was queried, verbatim.
    pub name: String,
}

impl ComponentNotFoundError {
    /// Creates a new component not found error.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("type".to_string(), serde_json::json!("ComponentNotFound"));
        map.insert("name".to_string(), serde_json::json!(self.name));
        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

/// Raised when a descriptor is neither a component nor a known operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown context operation: `{descriptor}`")]
pub struct UnknownContextOperationError {
    /// The descriptor string, verbatim.
    pub descriptor: String,
}

impl UnknownContextOperationError {
    /// Creates a new unknown context operation error.
    #[must_use]
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self {
            descriptor: descriptor.into(),
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("type".to_string(), serde_json::json!("UnknownContextOperation"));
        map.insert("descriptor".to_string(), serde_json::json!(self.descriptor));
        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

/// Errors raised while loading a component source.
#[derive(Debug, Clone, Error)]
pub enum ComponentLoadError {
    /// A namespace exists but its import failed.
    #[error("failed to import namespace `{namespace}`: {reason}")]
    NamespaceImport {
        /// The namespace identifier.
        namespace: String,
        /// Why the import failed.
        reason: String,
    },

    /// A component file exists but could not be loaded.
    #[error("failed to load component file `{}` (unit `{unit}`): {reason}", path.display())]
    FileExecution {
        /// The file that was loaded.
        path: PathBuf,
        /// The synthetic unit name derived from the file stem.
        unit: String,
        /// Why loading failed.
        reason: String,
    },
}

impl ComponentLoadError {
    /// Creates a namespace import error.
    #[must_use]
    pub fn namespace_import(namespace: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NamespaceImport {
            namespace: namespace.into(),
            reason: reason.into(),
        }
    }

    /// Creates a file execution error.
    #[must_use]
    pub fn file_execution(
        path: impl Into<PathBuf>,
        unit: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::FileExecution {
            path: path.into(),
            unit: unit.into(),
            reason: reason.into(),
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();

        match self {
            Self::NamespaceImport { namespace, reason } => {
                map.insert("type".to_string(), serde_json::json!("NamespaceImport"));
                map.insert("namespace".to_string(), serde_json::json!(namespace));
                map.insert("reason".to_string(), serde_json::json!(reason));
            }
            Self::FileExecution { path, unit, reason } => {
                map.insert("type".to_string(), serde_json::json!("FileExecution"));
                map.insert("path".to_string(), serde_json::json!(path.display().to_string()));
                map.insert("unit".to_string(), serde_json::json!(unit));
                map.insert("reason".to_string(), serde_json::json!(reason));
            }
        }

        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

/// Errors raised when a context write targets a scope the context lacks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextScopeError {
    /// An item index was given for a context that has no slices.
    #[error("index {index} supplied for a {kind} context, which has no item slices")]
    IndexOnNonCollection {
        /// The context shape that received the index.
        kind: &'static str,
        /// The offending index.
        index: usize,
    },

    /// An item index fell outside the collection.
    #[error("slice index {index} out of range for a collection of {len} items")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of slices in the collection.
        len: usize,
    },
}

impl ContextScopeError {
    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();

        match self {
            Self::IndexOnNonCollection { kind, index } => {
                map.insert("type".to_string(), serde_json::json!("IndexOnNonCollection"));
                map.insert("kind".to_string(), serde_json::json!(kind));
                map.insert("index".to_string(), serde_json::json!(index));
            }
            Self::IndexOutOfRange { index, len } => {
                map.insert("type".to_string(), serde_json::json!("IndexOutOfRange"));
                map.insert("index".to_string(), serde_json::json!(index));
                map.insert("len".to_string(), serde_json::json!(len));
            }
        }

        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

/// Registry lifecycle errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Registration was attempted after the registry was frozen.
    #[error("component registry is frozen; cannot register {source_kind} `{value}`")]
    Frozen {
        /// "namespace" or "path".
        source_kind: &'static str,
        /// The value that was rejected.
        value: String,
    },
}

impl RegistryError {
    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        match self {
            Self::Frozen { source_kind, value } => {
                map.insert("type".to_string(), serde_json::json!("Frozen"));
                map.insert("source_kind".to_string(), serde_json::json!(source_kind));
                map.insert("value".to_string(), serde_json::json!(value));
            }
        }
        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_carries_name_verbatim() {
        let err = ComponentNotFoundError::new("Some Odd:Name");
        assert_eq!(err.to_string(), "component not found: `Some Odd:Name`");
    }

    #[test]
    fn test_unknown_operation_message_carries_descriptor_verbatim() {
        let err = UnknownContextOperationError::new("not_a_real_name");
        assert_eq!(err.to_string(), "unknown context operation: `not_a_real_name`");
        assert_eq!(err.to_dict().get("descriptor").unwrap(), "not_a_real_name");
    }

    #[test]
    fn test_is_not_found() {
        let err: SemantivaError = ComponentNotFoundError::new("x").into();
        assert!(err.is_not_found());

        let err: SemantivaError = UnknownContextOperationError::new("x").into();
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_load_error_to_dict() {
        let err = ComponentLoadError::file_execution("/tmp/ops.json", "ops", "bad json");
        let dict = err.to_dict();

        assert_eq!(dict.get("type").unwrap(), "FileExecution");
        assert_eq!(dict.get("unit").unwrap(), "ops");
        assert!(err.to_string().contains("/tmp/ops.json"));
    }

    #[test]
    fn test_scope_error_messages() {
        let err = ContextScopeError::IndexOutOfRange { index: 5, len: 3 };
        assert!(err.to_string().contains("out of range"));
        assert_eq!(err.to_dict().get("len").unwrap(), 3);

        let err = ContextScopeError::IndexOnNonCollection {
            kind: "single",
            index: 1,
        };
        assert!(err.to_string().contains("single"));
    }

    #[test]
    fn test_frozen_error() {
        let err: SemantivaError = RegistryError::Frozen {
            source_kind: "path",
            value: "/plugins".to_string(),
        }
        .into();
        assert!(err.to_string().contains("frozen"));

        let dict = err.to_dict();
        assert_eq!(dict.get("type").unwrap(), "Frozen");
        assert_eq!(dict.get("source_kind").unwrap(), "path");
        assert_eq!(dict.get("value").unwrap(), "/plugins");
        assert!(dict.get("message").unwrap().as_str().unwrap().contains("frozen"));
    }
}
