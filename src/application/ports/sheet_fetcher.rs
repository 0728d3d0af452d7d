use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A parsed spreadsheet as delivered by the proxy: sheets in workbook order,
/// each row a JSON object keyed by column header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workbook {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    #[serde(default)]
    pub rows: Vec<JsonValue>,
}

#[async_trait]
pub trait SheetFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> anyhow::Result<Workbook>;
}
