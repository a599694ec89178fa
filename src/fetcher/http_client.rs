use crate::config::FetcherConfig;
use anyhow::{Context, Result};
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

use super::errors::FetchError;

/// Thin reqwest wrapper: one polite GET per call, no retries.
pub struct HttpClient {
    inner: reqwest::Client,
    config: FetcherConfig,
}

impl HttpClient {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .cookie_store(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            inner,
            config: config.clone(),
        })
    }

    /// Fetch a URL as text. Non-2xx is a `FetchError::Status`.
    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        self.polite_delay().await;

        debug!("GET {}", url);
        let resp = self.inner.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(resp.text().await?)
    }

    /// Sleep for the configured delay + random jitter.
    async fn polite_delay(&self) {
        let jitter = if self.config.jitter_ms == 0 {
            0
        } else {
            rand::random_range(0..=self.config.jitter_ms)
        };
        let total = Duration::from_millis(self.config.request_delay_ms + jitter);
        if !total.is_zero() {
            sleep(total).await;
        }
    }
}
