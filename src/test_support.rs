//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::core::config::ResolvedConfig;
use crate::core::store::{KeyValueStore, StoreError};

/// A store whose every operation fails, for exercising degraded paths.
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }

    async fn load(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("test".to_string()))
    }

    async fn save(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("test".to_string()))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("test".to_string()))
    }
}

/// Built-in defaults with no storage path.
pub fn test_config() -> ResolvedConfig {
    ResolvedConfig {
        storage_path: None,
        ..ResolvedConfig::default()
    }
}

/// Creates a test App with empty selections.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(&test_config())
}
