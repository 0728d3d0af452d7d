use async_trait::async_trait;
use serde_json::Value as JsonValue;

/// External key-value store. Values are opaque JSON documents.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, namespace: &str, key: &str) -> anyhow::Result<Option<JsonValue>>;

    async fn set(&self, namespace: &str, key: &str, value: &JsonValue) -> anyhow::Result<()>;
}
