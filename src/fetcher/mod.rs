pub mod errors;
pub mod http_client;

use crate::config::FetcherConfig;
use crate::models::PlayerPage;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;
use url::Url;

pub use self::errors::FetchError;
use self::http_client::HttpClient;

// ── Source trait ──────────────────────────────────────────────────────────────

/// Swappable page source: live site, saved files, test doubles.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, page: &PlayerPage) -> Result<String, FetchError>;
}

// ── pro-football-reference fetcher ────────────────────────────────────────────

pub struct PfrClient {
    client: HttpClient,
    site_root: Url,
}

impl PfrClient {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let site_root = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid base_url {:?}", config.base_url))?;
        Ok(Self {
            client: HttpClient::new(config)?,
            site_root,
        })
    }

    pub fn site_root(&self) -> &Url {
        &self.site_root
    }
}

#[async_trait]
impl PageSource for PfrClient {
    async fn fetch_page(&self, page: &PlayerPage) -> Result<String, FetchError> {
        let url = page.canonical_url(&self.site_root)?;
        let html = self.client.get_text(url.as_str()).await?;
        info!("{}: fetched {} bytes", page, html.len());
        Ok(html)
    }
}
