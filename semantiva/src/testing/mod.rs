//! Testing utilities for semantiva components.
//!
//! This module provides:
//! - Context builders for flat, collection and chained shapes
//! - Component file helpers
//! - Mock components that record calls or write fixed values

mod fixtures;
mod mocks;

pub use fixtures::{manifest_json, write_manifest, ContextFixture};
pub use mocks::{RecordingComponent, SettingComponent};
