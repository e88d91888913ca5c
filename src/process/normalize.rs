// src/process/normalize.rs
use anyhow::Result;
use chrono::NaiveDate;
use scraper::Selector;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

use super::convert::parse_rate;
use super::date_parser::parse_date;
use super::utils::cell_value;
use super::{extract_rate_table, RawTable};
use crate::config::Config;
use crate::dataset::{CanonicalDataset, RateRow};
use crate::fetch::RawYearDocument;
use crate::schema::tenors::is_expected_tenor;
use crate::schema::{check_headers, HeaderDrift};

/// One source row after sentinel handling, aligned to the first header.
struct Record {
    year: i32,
    cells: Vec<Option<String>>,
}

/// Turns fetched pages into a `CanonicalDataset`.
#[derive(Debug, Clone)]
pub struct Normalizer {
    table: Selector,
    excluded_tenors: Vec<String>,
    missing_sentinel: String,
}

impl Normalizer {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            table: config.parse_table_selector()?,
            excluded_tenors: config.excluded_tenors.clone(),
            missing_sentinel: config.missing_sentinel.clone(),
        })
    }

    /// Parse every document and merge the rows of all years.
    ///
    /// Never fails: unfetched years, pages without the rate table and
    /// unusable rows all degrade to fewer rows, down to the empty dataset.
    #[instrument(level = "info", skip_all, fields(documents = docs.len()))]
    pub fn normalize(&self, docs: &[RawYearDocument]) -> CanonicalDataset {
        let tables: Vec<RawTable> = docs
            .iter()
            .filter_map(|doc| extract_rate_table(doc, &self.table))
            .collect();
        self.merge(tables)
    }

    /// Compare one year's header against the tenor schema and warn on drift.
    /// Excluded tenors are never reported as missing.
    pub fn header_drift(&self, year: i32, headers: &[String]) -> HeaderDrift {
        let mut drift = check_headers(headers);
        drift
            .missing
            .retain(|t| !self.excluded_tenors.iter().any(|x| x == t));
        if !drift.is_clean() {
            warn!(
                year,
                misplaced_date = drift.misplaced_date,
                unknown = ?drift.unknown,
                missing = ?drift.missing,
                "header diverges from the tenor schema"
            );
        }
        drift
    }

    /// Merge already-extracted tables, in requested year order.
    pub fn merge(&self, tables: Vec<RawTable>) -> CanonicalDataset {
        // The first non-empty header row labels every year's columns.
        let Some(header) = tables
            .iter()
            .map(|t| &t.headers)
            .find(|h| !h.is_empty())
            .cloned()
        else {
            info!("no rate table in any document; empty dataset");
            return CanonicalDataset::empty();
        };

        let width = header.len();
        let mut records = Vec::new();
        for table in tables {
            if !table.headers.is_empty() {
                self.header_drift(table.year, &table.headers);
                if table.headers != header {
                    warn!(
                        year = table.year,
                        expected = ?header,
                        found = ?table.headers,
                        "header differs from first year; aligning by position"
                    );
                }
            }
            let mut surplus = 0usize;
            for row in table.rows {
                if row.len() > width {
                    surplus += 1;
                }
                let mut cells: Vec<Option<String>> = row
                    .iter()
                    .take(width)
                    .map(|c| cell_value(c, &self.missing_sentinel))
                    .collect();
                cells.resize(width, None);
                records.push(Record {
                    year: table.year,
                    cells,
                });
            }
            if surplus > 0 {
                warn!(
                    year = table.year,
                    rows = surplus,
                    "rows with more cells than headers; extra cells dropped"
                );
            }
        }

        // Rows without a usable date, or repeating a (year, date), go first so
        // they cannot keep an otherwise empty column alive.
        let mut seen = HashSet::new();
        let mut undated = 0usize;
        let mut duplicates = 0usize;
        let mut dated: Vec<(NaiveDate, Record)> = Vec::with_capacity(records.len());
        for rec in records {
            let Some(date) = rec.cells[0].as_deref().and_then(parse_date) else {
                undated += 1;
                continue;
            };
            if !seen.insert((rec.year, date)) {
                duplicates += 1;
                continue;
            }
            dated.push((date, rec));
        }
        if undated > 0 {
            warn!(rows = undated, "rows with unparseable dates dropped");
        }
        if duplicates > 0 {
            debug!(rows = duplicates, "duplicate (year, date) rows dropped");
        }

        // Keep tenor columns that are not excluded and hold data in some row.
        let kept: Vec<usize> = (1..width)
            .filter(|&idx| {
                let label = &header[idx];
                if self.excluded_tenors.iter().any(|x| x == label) {
                    debug!(tenor = %label, "excluded tenor dropped");
                    return false;
                }
                let has_data = dated.iter().any(|(_, r)| r.cells[idx].is_some());
                if !has_data {
                    debug!(tenor = %label, "all-missing column dropped");
                }
                has_data
            })
            .collect();
        let tenors: Vec<String> = kept.iter().map(|&i| header[i].clone()).collect();
        for t in tenors.iter().filter(|t| !is_expected_tenor(t)) {
            warn!(column = %t, "unexpected column carries data; kept as a tenor");
        }

        let mut rows: Vec<RateRow> = dated
            .into_iter()
            .map(|(date, rec)| RateRow {
                year: rec.year,
                date,
                rates: kept
                    .iter()
                    .map(|&idx| parse_rate(rec.cells[idx].as_deref()))
                    .collect(),
            })
            .collect();
        rows.sort_by_key(|r| r.date);

        let ds = CanonicalDataset::from_sorted(tenors, rows);
        info!(
            rows = ds.len(),
            tenors = ds.tenors().len(),
            first = ?ds.first_date(),
            last = ?ds.last_date(),
            "normalized"
        );
        ds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::fixtures::page;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,yieldscraper::process=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn normalizer() -> Normalizer {
        Normalizer::from_config(&Config::default()).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn table(year: i32, headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            year,
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn all_missing_column_is_dropped_and_rates_are_floats() {
        init_test_logging();
        let html = page(
            &["Date", "1 Mo", "2 Yr", "10 Yr"],
            &[
                &["01/03/2024", "N/A", "4.33", "3.91"],
                &["01/02/2024", "N/A", "4.33", "3.95"],
            ],
        );
        let ds = normalizer().normalize(&[RawYearDocument::fetched(2024, html)]);

        assert_eq!(ds.columns(), vec!["Year", "Date", "2 Yr", "10 Yr"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows()[0].date, date("2024-01-02"));
        assert_eq!(ds.rows()[0].year, 2024);
        assert_eq!(ds.rows()[0].rates, vec![4.33, 3.95]);
        assert_eq!(ds.rows()[1].rates, vec![4.33, 3.91]);
    }

    #[test]
    fn partially_missing_column_is_zero_filled() {
        let ds = normalizer().merge(vec![table(
            2024,
            &["Date", "1 Mo", "10 Yr"],
            &[&["01/02/2024", "N/A", "3.95"], &["01/03/2024", "5.54", "oops"]],
        )]);
        assert_eq!(ds.tenors(), &["1 Mo".to_string(), "10 Yr".to_string()]);
        assert_eq!(ds.rows()[0].rates, vec![0.0, 3.95]);
        assert_eq!(ds.rows()[1].rates, vec![5.54, 0.0]);
    }

    #[test]
    fn excluded_tenor_never_survives() {
        let with = normalizer().merge(vec![table(
            2025,
            &["Date", "1 Mo", "1.5 Mo", "2 Yr"],
            &[&["03/03/2025", "4.36", "4.34", "3.97"]],
        )]);
        let without = normalizer().merge(vec![table(
            2025,
            &["Date", "1 Mo", "2 Yr"],
            &[&["03/03/2025", "4.36", "3.97"]],
        )]);
        assert!(!with.has_tenor("1.5 Mo"));
        assert_eq!(with, without);
    }

    #[test]
    fn readding_an_all_missing_column_changes_nothing() {
        let base = normalizer().merge(vec![table(
            2024,
            &["Date", "2 Yr", "10 Yr"],
            &[&["01/02/2024", "4.33", "3.95"]],
        )]);
        let padded = normalizer().merge(vec![table(
            2024,
            &["Date", "20 YR CMT", "2 Yr", "10 Yr"],
            &[&["01/02/2024", "N/A", "4.33", "3.95"]],
        )]);
        assert_eq!(base, padded);
    }

    #[test]
    fn years_merge_sorted_by_date() {
        let ds = normalizer().merge(vec![
            table(
                2024,
                &["Date", "2 Yr"],
                &[&["01/03/2024", "4.33"], &["01/02/2024", "4.33"]],
            ),
            table(2023, &["Date", "2 Yr"], &[&["12/29/2023", "4.23"]]),
        ]);
        let dates: Vec<NaiveDate> = ds.rows().iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![date("2023-12-29"), date("2024-01-02"), date("2024-01-03")]
        );
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(ds.rows()[0].year, 2023);
    }

    #[test]
    fn first_header_labels_later_years() {
        let ds = normalizer().merge(vec![
            table(2023, &["Date", "2 Yr", "10 Yr"], &[&["06/01/2023", "4.41", "3.61"]]),
            table(2024, &["Date", "10 Yr", "2 Yr"], &[&["06/03/2024", "4.40", "4.89"]]),
        ]);
        assert_eq!(ds.tenors(), &["2 Yr".to_string(), "10 Yr".to_string()]);
        // positional alignment: the 2024 row keeps its cell order
        assert_eq!(ds.rows()[1].rates, vec![4.40, 4.89]);
    }

    #[test]
    fn ragged_rows_are_padded_and_truncated() {
        let ds = normalizer().merge(vec![table(
            2024,
            &["Date", "2 Yr", "10 Yr"],
            &[
                &["01/02/2024", "4.33"],
                &["01/03/2024", "4.33", "3.91", "99"],
            ],
        )]);
        assert_eq!(ds.rows()[0].rates, vec![4.33, 0.0]);
        assert_eq!(ds.rows()[1].rates, vec![4.33, 3.91]);
    }

    #[test]
    fn bad_dates_and_duplicates_are_dropped() {
        let ds = normalizer().merge(vec![table(
            2024,
            &["Date", "2 Yr"],
            &[
                &["01/02/2024", "4.33"],
                &["N/A", "4.30"],
                &["not a date", "4.31"],
                &["01/02/2024", "9.99"],
            ],
        )]);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.rows()[0].rates, vec![4.33]);
    }

    #[test]
    fn nothing_usable_gives_empty_dataset() {
        let n = normalizer();
        assert!(n.normalize(&[]).is_empty());
        assert!(n
            .normalize(&[RawYearDocument::failed(2024), RawYearDocument::fetched(2023, "<p/>")])
            .is_empty());
        let undated = n.merge(vec![table(2024, &["Date", "2 Yr"], &[&["x", "1"]])]);
        assert!(undated.is_empty());
        assert!(undated.columns().is_empty());
    }

    #[test]
    fn failed_year_does_not_disturb_others() {
        let ok = page(&["Date", "2 Yr"], &[&["01/02/2024", "4.33"]]);
        let ds = normalizer().normalize(&[
            RawYearDocument::failed(2023),
            RawYearDocument::fetched(2024, ok),
        ]);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.rows()[0].year, 2024);
    }

    #[test]
    fn column_with_data_only_in_dropped_rows_is_dropped() {
        let ds = normalizer().merge(vec![table(
            2024,
            &["Date", "1 Mo", "2 Yr"],
            &[
                &["01/02/2024", "N/A", "4.33"],
                &["01/02/2024", "5.55", "4.30"],
                &["garbage", "5.56", "4.31"],
            ],
        )]);
        assert!(!ds.has_tenor("1 Mo"));
        assert_eq!(ds.columns(), vec!["Year", "Date", "2 Yr"]);
        assert_eq!(ds.rows()[0].rates, vec![4.33]);
    }

    #[test]
    fn header_drift_is_checked_per_year() {
        let n = normalizer();
        let full: Vec<String> = std::iter::once("Date")
            .chain(crate::schema::tenors::EXPECTED_TENORS.iter().copied())
            .map(String::from)
            .collect();
        assert!(n.header_drift(2025, &full).is_clean());

        // the excluded 1.5 Mo is not reported as missing
        let pre_2022: Vec<String> = full
            .iter()
            .filter(|h| !["1.5 Mo", "4 Mo"].contains(&h.as_str()))
            .cloned()
            .chain(std::iter::once("Extrapolation Factor".to_string()))
            .collect();
        let drift = n.header_drift(2021, &pre_2022);
        assert_eq!(drift.missing, vec!["4 Mo"]);
        assert_eq!(drift.unknown, vec!["Extrapolation Factor"]);
        assert!(!drift.misplaced_date);
    }

    #[test]
    fn merge_keeps_first_header_when_a_later_year_drifts() {
        init_test_logging();
        let ds = normalizer().merge(vec![
            table(2023, &["Date", "2 Yr", "10 Yr"], &[&["06/01/2023", "4.41", "3.61"]]),
            table(
                2024,
                &["Day", "2 Yr", "Extrapolation Factor"],
                &[&["06/03/2024", "4.89", "4.40"]],
            ),
        ]);
        assert_eq!(ds.columns(), vec!["Year", "Date", "2 Yr", "10 Yr"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows()[1].rates, vec![4.89, 4.40]);
    }
}
