//! Mock components for testing.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::components::Component;
use crate::context::ContextObserver;
use crate::errors::Result;

/// A component that records each call and the keys it saw.
#[derive(Debug, Default, Clone)]
pub struct RecordingComponent {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl RecordingComponent {
    /// Creates a new recording component.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of times the component ran.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Returns the sorted visible keys from each call.
    #[must_use]
    pub fn recorded_keys(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }
}

impl Component for RecordingComponent {
    fn process(&self, observer: &mut ContextObserver<'_>) -> Result<()> {
        use crate::context::ContextStore;
        let mut keys = observer.context().keys();
        keys.sort();
        self.calls.lock().push(keys);
        Ok(())
    }
}

/// A component that writes one fixed value.
#[derive(Debug, Clone)]
pub struct SettingComponent {
    key: String,
    value: serde_json::Value,
}

impl SettingComponent {
    /// Creates a component that writes `value` under `key`.
    #[must_use]
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl Component for SettingComponent {
    fn process(&self, observer: &mut ContextObserver<'_>) -> Result<()> {
        observer.update(self.key.clone(), self.value.clone(), None)?;
        Ok(())
    }

    fn created_keys(&self) -> Vec<String> {
        vec![self.key.clone()]
    }
}
