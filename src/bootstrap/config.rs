use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_port: u16,
    pub frontend_url: Option<String>,
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub sheet_proxy_url: String,
    pub sheet_fetch_timeout_secs: u64,
    pub allow_anonymous_view: bool,
    pub import_max_rows: usize,
    pub is_production: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_port = lookup("API_PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(8888);
        let frontend_url = lookup("FRONTEND_URL").filter(|s| !s.trim().is_empty());
        let storage_backend = match lookup("STORAGE_BACKEND")
            .map(|s| s.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("") | Some("memory") => StorageBackend::Memory,
            Some("postgres") | Some("pg") => StorageBackend::Postgres,
            Some(other) => anyhow::bail!("unknown STORAGE_BACKEND '{other}'"),
        };
        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());
        let sheet_proxy_url = lookup("SHEET_PROXY_URL")
            .unwrap_or_else(|| "https://corsproxy.io/?url=".into());
        let sheet_fetch_timeout_secs = lookup("SHEET_FETCH_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);
        let allow_anonymous_view = matches!(
            lookup("ALLOW_ANONYMOUS_VIEW").as_deref(),
            Some("1") | Some("true") | Some("yes")
        );
        let import_max_rows = lookup("IMPORT_MAX_ROWS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);
        let is_production = matches!(
            lookup("RUST_ENV").as_deref(),
            Some("production") | Some("prod")
        );

        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL must be set when STORAGE_BACKEND=postgres");
        }
        if is_production {
            if !frontend_url
                .as_deref()
                .is_some_and(|u| u.starts_with("http"))
            {
                anyhow::bail!(
                    "FRONTEND_URL must be set to a full origin in production (e.g., https://app.example.com)"
                );
            }
            if storage_backend == StorageBackend::Memory {
                tracing::warn!("in-memory storage in production; data is lost on restart");
            }
        }

        Ok(Self {
            api_port,
            frontend_url,
            storage_backend,
            database_url,
            sheet_proxy_url,
            sheet_fetch_timeout_secs,
            allow_anonymous_view,
            import_max_rows,
            is_production,
        })
    }
}
