// src/schema/tenors.rs

use crate::dataset::DATE_COLUMN;

/// Par yield tenors the Treasury has published, shortest first.
/// Not every year carries every tenor ("4 Mo" starts in late 2022).
pub static EXPECTED_TENORS: &[&str] = &[
    "1 Mo", "1.5 Mo", "2 Mo", "3 Mo", "4 Mo", "6 Mo", "1 Yr", "2 Yr", "3 Yr", "5 Yr", "7 Yr",
    "10 Yr", "20 Yr", "30 Yr",
];

pub fn is_expected_tenor(label: &str) -> bool {
    EXPECTED_TENORS.contains(&label)
}

/// How a fetched header row differs from the declared layout.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeaderDrift {
    /// First header is not `Date`.
    pub misplaced_date: bool,
    /// Labels after the date column that are not known tenors.
    pub unknown: Vec<String>,
    /// Known tenors absent from the header, in schema order.
    pub missing: Vec<String>,
}

impl HeaderDrift {
    pub fn is_clean(&self) -> bool {
        !self.misplaced_date && self.unknown.is_empty() && self.missing.is_empty()
    }
}

/// Compare a header row against `Date` followed by known tenors.
pub fn check_headers(headers: &[String]) -> HeaderDrift {
    let misplaced_date = headers.first().map(String::as_str) != Some(DATE_COLUMN);
    let unknown = headers
        .iter()
        .skip(1)
        .filter(|h| !is_expected_tenor(h))
        .cloned()
        .collect();
    let missing = EXPECTED_TENORS
        .iter()
        .filter(|t| !headers.iter().skip(1).any(|h| h.as_str() == **t))
        .map(|t| t.to_string())
        .collect();
    HeaderDrift {
        misplaced_date,
        unknown,
        missing,
    }
}
