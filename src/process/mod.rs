// src/process/mod.rs
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::fetch::RawYearDocument;

pub mod convert;
pub mod date_parser;
pub mod normalize;
pub mod raw_table;
pub mod utils;

pub use normalize::Normalizer;
pub use raw_table::RawTable;

static TH: Lazy<Selector> = Lazy::new(|| Selector::parse("th").expect("th selector should parse"));
static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("tr selector should parse"));
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("td selector should parse"));

fn element_text(el: ElementRef<'_>) -> String {
    utils::clean_str(&el.text().collect::<String>())
}

/// Locate the rate table in a fetched page and pull out its header and rows.
///
/// Returns `None` when the year was not fetched or the page has no element
/// matching `table`. Every `tr` after the first is a data row.
pub fn extract_rate_table(doc: &RawYearDocument, table: &Selector) -> Option<RawTable> {
    if !doc.fetched {
        return None;
    }

    let html = Html::parse_document(&doc.content);
    let Some(tbl) = html.select(table).next() else {
        warn!(year = doc.year, "rate table not found; year skipped");
        return None;
    };

    let headers: Vec<String> = tbl.select(&TH).map(element_text).collect();
    let rows: Vec<Vec<String>> = tbl
        .select(&TR)
        .skip(1)
        .map(|tr| tr.select(&TD).map(element_text).collect())
        .collect();

    debug!(
        year = doc.year,
        columns = headers.len(),
        rows = rows.len(),
        "extracted rate table"
    );
    Some(RawTable {
        year: doc.year,
        headers,
        rows,
    })
}
