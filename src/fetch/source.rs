// src/fetch/source.rs
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use super::urls::year_url;
use super::RawYearDocument;

/// Where per-year pages come from.
///
/// Implementations never fail: any problem is reported as
/// `RawYearDocument::failed` so one bad year cannot sink the batch.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch_year(&self, year: i32) -> RawYearDocument;
}

/// Fetches one page per year over HTTP with a single attempt.
pub struct HttpSource {
    client: Client,
    url_template: String,
}

impl HttpSource {
    pub fn new(client: Client, url_template: impl Into<String>) -> Self {
        Self {
            client,
            url_template: url_template.into(),
        }
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch_year(&self, year: i32) -> RawYearDocument {
        let url = match year_url(&self.url_template, year) {
            Ok(u) => u,
            Err(e) => {
                warn!(year, error = %e, "bad URL; year skipped");
                return RawYearDocument::failed(year);
            }
        };

        match get_text(&self.client, &url).await {
            Ok(body) => {
                debug!(year, bytes = body.len(), "fetched");
                RawYearDocument::fetched(year, body)
            }
            Err(e) => {
                warn!(year, %url, error = %e, "fetch failed; year skipped");
                RawYearDocument::failed(year)
            }
        }
    }
}

async fn get_text(client: &Client, url: &Url) -> Result<String> {
    let resp = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {}", url))?;
    let status = resp.status();
    if status != StatusCode::OK {
        bail!("HTTP {} from {}", status, url);
    }
    resp.text()
        .await
        .with_context(|| format!("reading body from {}", url))
}
