//! Registry configuration.

use crate::errors::{Result, SemantivaError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding extra component paths (platform path list).
pub const PATHS_ENV: &str = "SEMANTIVA_COMPONENT_PATHS";

/// Environment variable holding extra namespaces (comma separated).
pub const MODULES_ENV: &str = "SEMANTIVA_COMPONENT_MODULES";

/// Sources a [`ComponentRegistry`](crate::registry::ComponentRegistry) is
/// built with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Namespaces registered after the defaults, in order.
    #[serde(default)]
    pub modules: Vec<String>,
    /// Component file paths, in order.
    #[serde(default)]
    pub paths: Vec<PathBuf>,
    /// Whether the built-in namespaces are registered first.
    #[serde(default = "default_include_defaults")]
    pub include_defaults: bool,
    /// Whether registration is closed once the config is applied.
    #[serde(default)]
    pub freeze: bool,
}

fn default_include_defaults() -> bool {
    true
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            modules: Vec::new(),
            paths: Vec::new(),
            include_defaults: default_include_defaults(),
            freeze: false,
        }
    }
}

impl RegistryConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a namespace.
    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.modules.push(module.into());
        self
    }

    /// Appends a component file path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Sets whether default namespaces are included.
    #[must_use]
    pub fn with_defaults(mut self, include: bool) -> Self {
        self.include_defaults = include;
        self
    }

    /// Sets whether the registry is frozen after setup.
    #[must_use]
    pub fn with_freeze(mut self, freeze: bool) -> Self {
        self.freeze = freeze;
        self
    }

    /// Parses a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the document is malformed or has unknown fields.
    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|e| SemantivaError::Config(e.to_string()))
    }

    /// Reads a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, or `Config` if it cannot be
    /// parsed.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    /// Appends sources from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var_os(name))
    }

    /// Appends sources from `lookup`, which stands in for the environment.
    #[must_use]
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<std::ffi::OsString>,
    {
        if let Some(paths) = lookup(PATHS_ENV) {
            self.paths.extend(
                std::env::split_paths(&paths).filter(|p| !p.as_os_str().is_empty()),
            );
        }
        if let Some(modules) = lookup(MODULES_ENV) {
            self.modules.extend(
                modules
                    .to_string_lossy()
                    .split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(String::from),
            );
        }
        self
    }
}
