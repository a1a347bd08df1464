//! Application state for the PPh 21 engine API.

use std::sync::Arc;

use crate::config::{ConfigLoader, RateTables};

/// Shared application state.
///
/// Holds the rate tables every handler reads; they are never mutated after
/// startup.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the loaded rate tables.
    pub fn tables(&self) -> &RateTables {
        self.config.tables()
    }
}
