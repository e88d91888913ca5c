// src/export/xlsx.rs

use anyhow::{ensure, Context, Result};
use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet};
use tracing::{debug, info};

use super::Sheet;
use crate::dataset::{CanonicalDataset, DATE_COLUMN};
use crate::views::{SpreadPoint, SPREAD_LABEL};

const DATE_FORMAT: &str = "yyyy-mm-dd";

fn excel_date(d: NaiveDate) -> Result<ExcelDateTime> {
    ExcelDateTime::from_ymd(d.year() as u16, d.month() as u8, d.day() as u8)
        .with_context(|| format!("date {} out of spreadsheet range", d))
}

fn write_header(sheet: &mut Worksheet, names: &[String]) -> Result<()> {
    for (col, name) in names.iter().enumerate() {
        sheet.write_string(0, col as u16, name.as_str())?;
    }
    Ok(())
}

fn write_yield_curve(sheet: &mut Worksheet, ds: &CanonicalDataset, date_fmt: &Format) -> Result<()> {
    sheet.set_name(Sheet::YieldCurve.as_str())?;
    write_header(sheet, &ds.columns())?;
    for (i, row) in ds.rows().iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_number(r, 0, row.year)?;
        sheet.write_datetime_with_format(r, 1, &excel_date(row.date)?, date_fmt)?;
        for (j, rate) in row.rates.iter().enumerate() {
            sheet.write_number(r, (j + 2) as u16, *rate)?;
        }
    }
    Ok(())
}

fn write_spread(sheet: &mut Worksheet, series: &[SpreadPoint], date_fmt: &Format) -> Result<()> {
    sheet.set_name(Sheet::Spread.as_str())?;
    write_header(sheet, &[DATE_COLUMN.to_string(), SPREAD_LABEL.to_string()])?;
    for (i, point) in series.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_datetime_with_format(r, 0, &excel_date(point.date)?, date_fmt)?;
        sheet.write_number(r, 1, point.spread)?;
    }
    Ok(())
}

/// Render the requested sheets into an in-memory `.xlsx` workbook.
///
/// The Spread sheet is silently left out when 2 Yr or 10 Yr is missing.
/// An empty dataset or an empty sheet selection is an error: there is
/// nothing to download.
pub fn to_xlsx(ds: &CanonicalDataset, sheets: &[Sheet]) -> Result<Vec<u8>> {
    ensure!(!ds.is_empty(), "no data to export");
    ensure!(!sheets.is_empty(), "no sheets selected for export");

    let mut workbook = Workbook::new();
    let date_fmt = Format::new().set_num_format(DATE_FORMAT);
    let mut written = 0usize;

    if sheets.contains(&Sheet::YieldCurve) {
        write_yield_curve(workbook.add_worksheet(), ds, &date_fmt)
            .context("writing Yield Curve sheet")?;
        written += 1;
    }
    if sheets.contains(&Sheet::Spread) {
        match ds.spread_series() {
            Some(series) => {
                write_spread(workbook.add_worksheet(), &series, &date_fmt)
                    .context("writing Spread sheet")?;
                written += 1;
            }
            None => debug!("spread not computable; Spread sheet skipped"),
        }
    }
    ensure!(written > 0, "none of the selected sheets can be produced");

    let buf = workbook
        .save_to_buffer()
        .context("serializing xlsx workbook")?;
    info!(sheets = written, rows = ds.len(), bytes = buf.len(), "xlsx export");
    Ok(buf)
}
