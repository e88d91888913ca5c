// src/config.rs

use anyhow::{anyhow, Context, Result};
use scraper::Selector;

use crate::fetch::urls::year_url;

/// Treasury "TextView" page listing every par yield curve row for one year.
pub const DEFAULT_URL_TEMPLATE: &str = "https://home.treasury.gov/resource-center/data-chart-center/interest-rates/TextView?type=daily_treasury_yield_curve&field_tdr_date_value={year}";

/// The rate table carries exactly this class list on the Treasury page.
pub const DEFAULT_TABLE_SELECTOR: &str = "table.usa-table.views-table.views-view-table.cols-26";

pub const DEFAULT_MISSING_SENTINEL: &str = "N/A";

/// Tenors dropped from every dataset. "1.5 Mo" is only published from 2025.
pub static DEFAULT_EXCLUDED_TENORS: &[&str] = &["1.5 Mo"];

pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Pipeline settings. There is no config file; callers build one in code.
#[derive(Debug, Clone)]
pub struct Config {
    /// URL with a `{year}` placeholder.
    pub url_template: String,
    /// CSS selector locating the rate table inside a fetched page.
    pub table_selector: String,
    /// Tenor columns removed after merging, if present.
    pub excluded_tenors: Vec<String>,
    /// Cell text treated as a missing value.
    pub missing_sentinel: String,
    /// Upper bound on in-flight per-year requests.
    pub max_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            table_selector: DEFAULT_TABLE_SELECTOR.to_string(),
            excluded_tenors: DEFAULT_EXCLUDED_TENORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            missing_sentinel: DEFAULT_MISSING_SENTINEL.to_string(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl Config {
    /// Reject settings that would make every request or parse fail.
    pub fn validate(&self) -> Result<()> {
        if !self.url_template.contains("{year}") {
            return Err(anyhow!(
                "url_template `{}` has no {{year}} placeholder",
                self.url_template
            ));
        }
        year_url(&self.url_template, 2000)
            .with_context(|| format!("url_template `{}` is not a valid URL", self.url_template))?;
        self.parse_table_selector()?;
        if self.max_concurrency == 0 {
            return Err(anyhow!("max_concurrency must be at least 1"));
        }
        Ok(())
    }

    pub fn parse_table_selector(&self) -> Result<Selector> {
        Selector::parse(&self.table_selector).map_err(|e| {
            anyhow!(
                "table_selector `{}` does not parse: {:?}",
                self.table_selector,
                e
            )
        })
    }
}
