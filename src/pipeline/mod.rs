//! Batch driver: fetch → extract for many player pages.
//!
//! Each page is an independent task bounded by a semaphore. A failed fetch
//! fails only its own page; results come back in input order.

use crate::config::PipelineConfig;
use crate::extract::build_profile;
use crate::fetcher::PageSource;
use crate::models::{PlayerPage, PlayerProfile};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};
use url::Url;

pub struct Pipeline<S> {
    source: Arc<S>,
    site_root: Url,
    config: PipelineConfig,
}

/// Outcome for one requested page.
pub struct PageResult {
    pub page: PlayerPage,
    pub profile: Result<PlayerProfile>,
}

impl<S: PageSource + 'static> Pipeline<S> {
    pub fn new(source: Arc<S>, site_root: Url, config: PipelineConfig) -> Self {
        Self {
            source,
            site_root,
            config,
        }
    }

    /// Fetch and extract a single page.
    pub async fn profile(&self, page: &PlayerPage) -> Result<PlayerProfile> {
        fetch_and_extract(self.source.as_ref(), page, &self.site_root).await
    }

    pub async fn run(&self, pages: Vec<PlayerPage>) -> (Vec<PageResult>, PipelineStats) {
        let sem = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut handles = Vec::with_capacity(pages.len());

        info!("=== Extracting {} player pages ===", pages.len());

        for page in pages {
            let source = Arc::clone(&self.source);
            let sem = Arc::clone(&sem);
            let site_root = self.site_root.clone();
            let task_page = page.clone();

            let handle = tokio::spawn(async move {
                let _permit = sem.acquire().await?;
                let profile = fetch_and_extract(source.as_ref(), &task_page, &site_root).await?;
                Ok::<PlayerProfile, anyhow::Error>(profile)
            });

            handles.push((page, handle));
        }

        let mut results = Vec::with_capacity(handles.len());
        let mut stats = PipelineStats {
            pages_requested: handles.len(),
            ..PipelineStats::default()
        };

        for (page, handle) in handles {
            let profile = match handle.await {
                Ok(Ok(profile)) => {
                    stats.profiles_built += 1;
                    Ok(profile)
                }
                Ok(Err(e)) => {
                    warn!("{}: {:#}", page, e);
                    stats.errors += 1;
                    Err(e)
                }
                Err(e) => {
                    error!("Task panic for {}: {}", page, e);
                    stats.errors += 1;
                    Err(anyhow::anyhow!("task for {} failed: {}", page, e))
                }
            };
            results.push(PageResult { page, profile });
        }

        info!(
            "=== Done: {} pages | {} profiles | {} errors ===",
            stats.pages_requested, stats.profiles_built, stats.errors
        );

        (results, stats)
    }
}

async fn fetch_and_extract<S: PageSource + ?Sized>(
    source: &S,
    page: &PlayerPage,
    site_root: &Url,
) -> Result<PlayerProfile> {
    let html = source
        .fetch_page(page)
        .await
        .with_context(|| format!("fetch_page({})", page))?;
    Ok(build_profile(&html, page, site_root))
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    pub pages_requested: usize,
    pub profiles_built: usize,
    pub errors: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::FetchError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct StaticSource {
        pages: HashMap<String, String>,
    }

    #[async_trait]
    impl PageSource for StaticSource {
        async fn fetch_page(&self, page: &PlayerPage) -> Result<String, FetchError> {
            self.pages.get(&page.id).cloned().ok_or_else(|| FetchError::Status {
                status: 404,
                url: page.path(),
            })
        }
    }

    fn pipeline(concurrency: usize) -> Pipeline<StaticSource> {
        let mut pages = HashMap::new();
        pages.insert(
            "BradTo00".to_string(),
            r#"<div id="meta"><h1>Tom Brady</h1><p><strong>Throws:</strong> Right</p></div>"#
                .to_string(),
        );
        pages.insert(
            "MontJo01".to_string(),
            r#"<div id="meta"><h1>Joe Montana</h1></div>"#.to_string(),
        );
        Pipeline::new(
            Arc::new(StaticSource { pages }),
            Url::parse("https://www.pro-football-reference.com").unwrap(),
            PipelineConfig { concurrency },
        )
    }

    fn pages(ids: &[&str]) -> Vec<PlayerPage> {
        ids.iter().map(|id| PlayerPage::parse(id).unwrap()).collect()
    }

    #[test]
    fn test_failed_page_does_not_abort_batch() {
        let (results, stats) = tokio_test::block_on(
            pipeline(2).run(pages(&["BradTo00", "NobodyX00", "MontJo01"])),
        );

        assert_eq!(
            stats,
            PipelineStats {
                pages_requested: 3,
                profiles_built: 2,
                errors: 1
            }
        );
        let names: Vec<Option<String>> = results
            .iter()
            .map(|r| r.profile.as_ref().ok().and_then(|p| p.player_name.clone()))
            .collect();
        assert_eq!(
            names,
            vec![Some("Tom Brady".into()), None, Some("Joe Montana".into())]
        );

        let err = results[1].profile.as_ref().unwrap_err();
        let fetch = err.downcast_ref::<FetchError>().unwrap();
        assert_eq!(fetch.status(), Some(404));
    }

    #[test]
    fn test_single_profile() {
        let profile = tokio_test::block_on(
            pipeline(1).profile(&PlayerPage::parse("/players/B/BradTo00.htm").unwrap()),
        )
        .unwrap();
        assert_eq!(profile.throws.as_deref(), Some("Right"));
        assert_eq!(profile.player_id.as_deref(), Some("BradTo00"));
    }
}
