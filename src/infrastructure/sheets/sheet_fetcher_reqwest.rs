use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::sheet_fetcher::{SheetFetcher, Workbook};

/// Resolves a spreadsheet URL through the CORS-safe proxy, which answers
/// with the already parsed workbook as JSON.
pub struct ReqwestSheetFetcher {
    client: reqwest::Client,
    proxy_base: String,
}

impl ReqwestSheetFetcher {
    pub fn new(proxy_base: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            proxy_base: proxy_base.to_string(),
        })
    }

    fn proxied_url(&self, url: &str) -> String {
        format!("{}{}", self.proxy_base, urlencoding::encode(url.trim()))
    }
}

#[async_trait]
impl SheetFetcher for ReqwestSheetFetcher {
    async fn fetch(&self, url: &str) -> anyhow::Result<Workbook> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("unsupported spreadsheet url");
        }
        let target = self.proxied_url(url);
        tracing::debug!(%target, "sheet_fetch_started");
        let resp = self
            .client
            .get(&target)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("request failed: {e}"))?;
        if !resp.status().is_success() {
            anyhow::bail!("upstream returned status {}", resp.status());
        }
        let workbook = resp
            .json::<Workbook>()
            .await
            .map_err(|e| anyhow::anyhow!("failed to decode workbook: {e}"))?;
        Ok(workbook)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_url_is_encoded_onto_proxy_base() {
        let fetcher =
            ReqwestSheetFetcher::new("https://proxy.local/fetch?url=", Duration::from_secs(5))
                .unwrap();
        assert_eq!(
            fetcher.proxied_url(" https://sheets.example/d/1?a=b "),
            "https://proxy.local/fetch?url=https%3A%2F%2Fsheets.example%2Fd%2F1%3Fa%3Db"
        );
    }

    #[tokio::test]
    async fn rejects_non_http_urls_without_network() {
        let fetcher =
            ReqwestSheetFetcher::new("https://proxy.local/fetch?url=", Duration::from_secs(5))
                .unwrap();
        assert!(fetcher.fetch("file:///etc/passwd").await.is_err());
    }
}
