// src/fetch/mod.rs

pub mod source;
pub mod urls;
pub mod years;

pub use source::{DocumentSource, HttpSource};
pub use years::fetch_years;

/// The raw page for one requested year.
///
/// `fetched` is false when the request failed or returned a non-OK status;
/// `content` is empty in that case and the year contributes no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawYearDocument {
    pub year: i32,
    pub content: String,
    pub fetched: bool,
}

impl RawYearDocument {
    pub fn fetched(year: i32, content: impl Into<String>) -> Self {
        Self {
            year,
            content: content.into(),
            fetched: true,
        }
    }

    pub fn failed(year: i32) -> Self {
        Self {
            year,
            content: String::new(),
            fetched: false,
        }
    }
}
