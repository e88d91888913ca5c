// src/fetch/urls.rs
use anyhow::{Context, Result};
use url::Url;

const YEAR_PLACEHOLDER: &str = "{year}";

/// Substitute `year` into `template` and parse the result.
pub fn year_url(template: &str, year: i32) -> Result<Url> {
    let raw = template.replace(YEAR_PLACEHOLDER, &year.to_string());
    Url::parse(&raw).with_context(|| format!("parsing URL for year {}: {}", year, raw))
}
