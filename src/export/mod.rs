// src/export/mod.rs

pub mod parquet;
pub mod xlsx;

pub use self::parquet::to_parquet;
pub use self::xlsx::to_xlsx;

/// Suggested file name for the spreadsheet download.
pub const XLSX_FILE_NAME: &str = "treasury_par_yield_curve.xlsx";
pub const PARQUET_FILE_NAME: &str = "treasury_par_yield_curve.parquet";

/// Worksheets the spreadsheet export can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sheet {
    /// The full canonical dataset.
    YieldCurve,
    /// Date and 10Y - 2Y spread; skipped when the spread is not computable.
    Spread,
}

impl Sheet {
    pub const ALL: [Sheet; 2] = [Sheet::YieldCurve, Sheet::Spread];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sheet::YieldCurve => "Yield Curve",
            Sheet::Spread => "Spread",
        }
    }
}
