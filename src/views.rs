// src/views.rs
//! Read-only projections of a `CanonicalDataset` for charting.

use chrono::NaiveDate;
use serde::Serialize;

use crate::dataset::CanonicalDataset;

/// Column title used wherever the spread is shown or exported.
pub const SPREAD_LABEL: &str = "Spread 10Y - 2Y";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadPoint {
    pub date: NaiveDate,
    pub spread: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurvePoint {
    pub tenor: String,
    pub rate: f64,
}

/// The yield curve on one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveSnapshot {
    pub date: NaiveDate,
    pub points: Vec<CurvePoint>,
}

/// One (date, tenor, rate) cell, for animated rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongRecord {
    pub date: NaiveDate,
    pub tenor: String,
    pub rate: f64,
}

impl CanonicalDataset {
    /// Spread over time; `None` when 2 Yr or 10 Yr is absent.
    pub fn spread_series(&self) -> Option<Vec<SpreadPoint>> {
        let spread = self.spread()?;
        Some(
            self.rows()
                .iter()
                .zip(spread)
                .map(|(r, spread)| SpreadPoint {
                    date: r.date,
                    spread,
                })
                .collect(),
        )
    }

    /// Spread on the most recent date.
    pub fn latest_spread(&self) -> Option<SpreadPoint> {
        self.spread_series()?.pop()
    }

    /// Distinct dates in ascending order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.rows().iter().map(|r| r.date).collect();
        dates.dedup();
        dates
    }

    /// The last `n` distinct dates, oldest first.
    pub fn recent_dates(&self, n: usize) -> Vec<NaiveDate> {
        let dates = self.dates();
        let start = dates.len().saturating_sub(n);
        dates[start..].to_vec()
    }

    /// Curve cross-sections for the requested dates, in request order.
    /// Dates not in the dataset are skipped.
    pub fn curve_at(&self, dates: &[NaiveDate]) -> Vec<CurveSnapshot> {
        dates
            .iter()
            .filter_map(|d| self.rows().iter().find(|r| r.date == *d))
            .map(|row| CurveSnapshot {
                date: row.date,
                points: self
                    .tenors()
                    .iter()
                    .zip(&row.rates)
                    .map(|(tenor, rate)| CurvePoint {
                        tenor: tenor.clone(),
                        rate: *rate,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Melt every row into per-tenor records, date-major.
    pub fn long_form(&self) -> Vec<LongRecord> {
        self.rows()
            .iter()
            .flat_map(|row| {
                self.tenors()
                    .iter()
                    .zip(&row.rates)
                    .map(move |(tenor, rate)| LongRecord {
                        date: row.date,
                        tenor: tenor.clone(),
                        rate: *rate,
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::RateRow;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn sample() -> CanonicalDataset {
        let rows = [(d(1, 2), 4.33, 3.95), (d(1, 3), 4.33, 3.91), (d(1, 4), 4.38, 3.99)]
            .into_iter()
            .map(|(date, two, ten)| RateRow {
                year: 2024,
                date,
                rates: vec![two, ten],
            })
            .collect();
        CanonicalDataset::from_sorted(vec!["2 Yr".into(), "10 Yr".into()], rows)
    }

    #[test]
    fn spread_series_matches_columns() {
        let ds = sample();
        let series = ds.spread_series().unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[1].date, d(1, 3));
        assert_eq!(series[1].spread, 3.91 - 4.33);
        assert_eq!(ds.latest_spread().unwrap().spread, 3.99 - 4.38);
    }

    #[test]
    fn recent_dates_are_the_tail() {
        let ds = sample();
        assert_eq!(ds.recent_dates(2), vec![d(1, 3), d(1, 4)]);
        assert_eq!(ds.recent_dates(10).len(), 3);
        assert!(CanonicalDataset::empty().recent_dates(3).is_empty());
    }

    #[test]
    fn curve_at_skips_unknown_dates() {
        let ds = sample();
        let curves = ds.curve_at(&[d(1, 4), d(2, 1), d(1, 2)]);
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].date, d(1, 4));
        assert_eq!(
            curves[1].points,
            vec![
                CurvePoint {
                    tenor: "2 Yr".into(),
                    rate: 4.33
                },
                CurvePoint {
                    tenor: "10 Yr".into(),
                    rate: 3.95
                },
            ]
        );
    }

    #[test]
    fn long_form_has_one_record_per_cell() -> anyhow::Result<()> {
        let ds = sample();
        let long = ds.long_form();
        assert_eq!(long.len(), 6);
        assert_eq!(long[1].tenor, "10 Yr");
        assert_eq!(long[1].date, d(1, 2));

        let json = serde_json::to_value(&long[0])?;
        assert_eq!(
            json,
            serde_json::json!({"date": "2024-01-02", "tenor": "2 Yr", "rate": 4.33})
        );
        Ok(())
    }
}
