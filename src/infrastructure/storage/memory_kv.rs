use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tokio::sync::RwLock;

use crate::application::ports::kv_store::KvStore;

/// Process-local key-value store. Contents vanish with the process.
#[derive(Default)]
pub struct InMemoryKvStore {
    entries: RwLock<HashMap<(String, String), JsonValue>>,
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, namespace: &str, key: &str) -> anyhow::Result<Option<JsonValue>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(&(namespace.to_string(), key.to_string()))
            .cloned())
    }

    async fn set(&self, namespace: &str, key: &str, value: &JsonValue) -> anyhow::Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert((namespace.to_string(), key.to_string()), value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn keys_are_scoped_by_namespace() {
        let kv = InMemoryKvStore::default();
        kv.set("project:a", "documents", &json!([1])).await.unwrap();
        kv.set("project:b", "documents", &json!([2])).await.unwrap();

        assert_eq!(kv.get("project:a", "documents").await.unwrap(), Some(json!([1])));
        assert_eq!(kv.get("project:b", "documents").await.unwrap(), Some(json!([2])));
        assert_eq!(kv.get("project:c", "documents").await.unwrap(), None);
    }
}
