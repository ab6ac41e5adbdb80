//! Key-value persistence
//!
//! Settings and the high score are stored as plain strings under fixed keys:
//! - `MemoryStore` for native builds and tests
//! - `LocalStorage` on the web

use std::collections::HashMap;

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;

/// Storage failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing store not reachable (private mode, no window, ...)
    #[error("storage unavailable")]
    Unavailable,

    #[error("write failed: {0}")]
    Write(String),
}

/// String key-value store
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Read a boolean stored as `"true"` / `"false"`. Anything else reads as absent.
pub fn get_bool(store: &dyn KeyValueStore, key: &str) -> Option<bool> {
    match store.get_item(key) {
        Ok(Some(value)) => match value.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            other => {
                log::warn!("Ignoring unreadable value {:?} for {}", other, key);
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            log::warn!("Could not read {}: {}", key, err);
            None
        }
    }
}

pub fn set_bool(store: &mut dyn KeyValueStore, key: &str, value: bool) -> Result<(), StoreError> {
    store.set_item(key, if value { "true" } else { "false" })
}
