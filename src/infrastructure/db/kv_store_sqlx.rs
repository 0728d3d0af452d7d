use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::Row;

use crate::application::ports::kv_store::KvStore;
use crate::infrastructure::db::PgPool;

pub struct SqlxKvStore {
    pub pool: PgPool,
}

impl SqlxKvStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KvStore for SqlxKvStore {
    async fn get(&self, namespace: &str, key: &str) -> anyhow::Result<Option<JsonValue>> {
        let row = sqlx::query(r#"SELECT value FROM project_kv WHERE namespace = $1 AND key = $2"#)
            .bind(namespace)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        let value = row
            .map(|r| r.try_get::<JsonValue, _>("value"))
            .transpose()?;
        Ok(value)
    }

    async fn set(&self, namespace: &str, key: &str, value: &JsonValue) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO project_kv (namespace, key, value)
               VALUES ($1, $2, $3)
               ON CONFLICT (namespace, key)
               DO UPDATE SET value = EXCLUDED.value, updated_at = now()"#,
        )
        .bind(namespace)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
