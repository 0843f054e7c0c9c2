//! Store configuration.

use serde::{Deserialize, Serialize};

/// Default label for a bond data store.
pub const DEFAULT_LABEL: &str = "bond-data";

/// Configuration for a [`Store`](crate::Store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name identifying the store in log events.
    pub label: String,
}

impl StoreConfig {
    /// Creates a config with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Sets the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL)
    }
}
