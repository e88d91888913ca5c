// src/pipeline.rs

use anyhow::{Context, Result};
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, error, instrument};

use crate::cache::{year_set, YearSetCache};
use crate::config::Config;
use crate::dataset::CanonicalDataset;
use crate::fetch::{fetch_years, DocumentSource, HttpSource};
use crate::process::Normalizer;

/// Fetch → normalize → memoize, per requested year set.
pub struct Pipeline {
    source: Arc<dyn DocumentSource>,
    normalizer: Normalizer,
    max_concurrency: usize,
    cache: YearSetCache,
}

impl Pipeline {
    /// Pipeline backed by the live Treasury pages.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .gzip(true)
            .build()
            .context("building HTTP client")?;
        let source = HttpSource::new(client, config.url_template.clone());
        Self::with_source(config, Arc::new(source))
    }

    /// Pipeline reading pages from any `DocumentSource`.
    pub fn with_source(config: &Config, source: Arc<dyn DocumentSource>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            normalizer: Normalizer::from_config(config)?,
            max_concurrency: config.max_concurrency,
            cache: YearSetCache::new(),
        })
    }

    /// The canonical dataset for `years`, computed once per distinct year set.
    ///
    /// An empty request, or one where no year produced rows, yields the empty
    /// dataset rather than an error.
    #[instrument(level = "info", skip(self))]
    pub async fn load(&self, years: &[i32]) -> Arc<CanonicalDataset> {
        let key = year_set(years);
        if let Some(ds) = self.cache.get(&key) {
            debug!("cache hit");
            return ds;
        }

        let dataset = if years.is_empty() {
            CanonicalDataset::empty()
        } else {
            let docs = fetch_years(Arc::clone(&self.source), years, self.max_concurrency).await;
            let normalizer = self.normalizer.clone();
            match tokio::task::spawn_blocking(move || normalizer.normalize(&docs)).await {
                Ok(ds) => ds,
                Err(e) => {
                    error!(error = %e, "normalize task aborted; result not cached");
                    return Arc::new(CanonicalDataset::empty());
                }
            }
        };

        self.cache.insert(key, dataset)
    }

    /// Forget the cached dataset for `years`. Returns whether one was cached.
    pub fn invalidate(&self, years: &[i32]) -> bool {
        self.cache.invalidate(&year_set(years))
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache(&self) -> &YearSetCache {
        &self.cache
    }
}
