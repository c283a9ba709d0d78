//! # Key-Value Adapter
//!
//! The persistence contract the inventory is written through: whole JSON
//! values stored under stable string keys.
//!
//! ```text
//! ┌────────────────────────┐        ┌──────────────────────────────────┐
//! │    InventoryStore      │        │      dyn KeyValueStore           │
//! │                        │ save   │                                  │
//! │  records  ─────────────┼───────►│  "carImportInventory" → [ ... ]  │
//! │  settings ─────────────┼───────►│  "carImportSettings"  → { ... }  │
//! │                        │ load   │                                  │
//! └────────────────────────┘◄───────┤  SqliteStore  |  MemoryStore     │
//!                                   └──────────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::StoreResult;

/// Key holding the JSON array of car records.
pub const INVENTORY_KEY: &str = "carImportInventory";

/// Key holding the JSON settings object.
pub const SETTINGS_KEY: &str = "carImportSettings";

/// Local key-value storage for JSON snapshots.
///
/// Every `save` replaces the whole value under its key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, or `None` if absent.
    async fn load(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn save(&self, key: &str, value: &Value) -> StoreResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> StoreResult<()>;

    /// Stores several values. Adapters that support it do so atomically.
    async fn save_all(&self, entries: &[(&str, Value)]) -> StoreResult<()> {
        for (key, value) in entries {
            self.save(key, value).await?;
        }
        Ok(())
    }
}

// =============================================================================
// In-Memory Adapter
// =============================================================================

/// HashMap-backed store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn load(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &Value) -> StoreResult<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn save_all(&self, entries: &[(&str, Value)]) -> StoreResult<()> {
        let mut map = self.entries.lock().await;
        for (key, value) in entries {
            map.insert(key.to_string(), value.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.load(SETTINGS_KEY).await.unwrap(), None);

        store
            .save(SETTINGS_KEY, &json!({"originCurrencyRate": 1.1}))
            .await
            .unwrap();
        assert_eq!(
            store.load(SETTINGS_KEY).await.unwrap(),
            Some(json!({"originCurrencyRate": 1.1}))
        );

        store.save(SETTINGS_KEY, &json!({})).await.unwrap();
        assert_eq!(store.load(SETTINGS_KEY).await.unwrap(), Some(json!({})));

        store.remove(SETTINGS_KEY).await.unwrap();
        store.remove(SETTINGS_KEY).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();

        store
            .save_all(&[(INVENTORY_KEY, json!([])), (SETTINGS_KEY, json!({}))])
            .await
            .unwrap();

        assert_eq!(other.len().await, 2);
        assert_eq!(other.load(INVENTORY_KEY).await.unwrap(), Some(json!([])));
    }
}
