// src/dataset.rs

use chrono::NaiveDate;
use serde::Serialize;

pub const YEAR_COLUMN: &str = "Year";
pub const DATE_COLUMN: &str = "Date";
pub const SHORT_TENOR: &str = "2 Yr";
pub const LONG_TENOR: &str = "10 Yr";

/// One row of the merged table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateRow {
    pub year: i32,
    pub date: NaiveDate,
    /// Rate percentages, aligned with `CanonicalDataset::tenors`.
    pub rates: Vec<f64>,
}

/// The merged, cleaned and date-sorted par yield table for a set of years.
///
/// An empty dataset has no rows and no columns at all; consumers should
/// present it as "no data" rather than as a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CanonicalDataset {
    tenors: Vec<String>,
    rows: Vec<RateRow>,
}

impl CanonicalDataset {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rows must already be sorted by date with `rates` aligned to `tenors`.
    /// A dataset without rows collapses to `empty()`.
    pub(crate) fn from_sorted(tenors: Vec<String>, rows: Vec<RateRow>) -> Self {
        if rows.is_empty() {
            return Self::empty();
        }
        debug_assert!(rows.windows(2).all(|w| w[0].date <= w[1].date));
        debug_assert!(rows.iter().all(|r| r.rates.len() == tenors.len()));
        Self { tenors, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[RateRow] {
        &self.rows
    }

    /// Tenor labels in source column order.
    pub fn tenors(&self) -> &[String] {
        &self.tenors
    }

    /// Full column list: `Year`, `Date`, then tenors. Empty for an empty dataset.
    pub fn columns(&self) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut cols = Vec::with_capacity(self.tenors.len() + 2);
        cols.push(YEAR_COLUMN.to_string());
        cols.push(DATE_COLUMN.to_string());
        cols.extend(self.tenors.iter().cloned());
        cols
    }

    pub fn tenor_index(&self, tenor: &str) -> Option<usize> {
        self.tenors.iter().position(|t| t == tenor)
    }

    pub fn has_tenor(&self, tenor: &str) -> bool {
        self.tenor_index(tenor).is_some()
    }

    /// The whole column for `tenor`, in row order.
    pub fn column(&self, tenor: &str) -> Option<Vec<f64>> {
        let idx = self.tenor_index(tenor)?;
        Some(self.rows.iter().map(|r| r.rates[idx]).collect())
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }

    /// 10 Yr minus 2 Yr for every row, or `None` if either column is absent.
    pub fn spread(&self) -> Option<Vec<f64>> {
        let long = self.tenor_index(LONG_TENOR)?;
        let short = self.tenor_index(SHORT_TENOR)?;
        Some(
            self.rows
                .iter()
                .map(|r| r.rates[long] - r.rates[short])
                .collect(),
        )
    }
}
