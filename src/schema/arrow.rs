// src/schema/arrow.rs

use anyhow::{Context, Result};
use arrow::{
    array::{ArrayRef, Date32Array, Float64Array, Int32Array},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use chrono::NaiveDate;
use std::sync::Arc;

use crate::dataset::{CanonicalDataset, DATE_COLUMN, YEAR_COLUMN};

/// Arrow layout of a canonical dataset:
/// - Year  → Int32
/// - Date  → Date32
/// - tenor → Float64 (one per tenor label)
pub fn build_arrow_schema(tenors: &[String]) -> Arc<Schema> {
    let mut fields = Vec::with_capacity(tenors.len() + 2);
    fields.push(Field::new(YEAR_COLUMN, DataType::Int32, false));
    fields.push(Field::new(DATE_COLUMN, DataType::Date32, false));
    fields.extend(
        tenors
            .iter()
            .map(|t| Field::new(t, DataType::Float64, false)),
    );
    Arc::new(Schema::new(fields))
}

fn days_since_epoch(d: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch is a valid date");
    (d - epoch).num_days() as i32
}

/// Column-major copy of the dataset as a single record batch.
pub fn to_record_batch(ds: &CanonicalDataset) -> Result<RecordBatch> {
    let schema = build_arrow_schema(ds.tenors());
    let rows = ds.rows();

    let mut cols: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
    cols.push(Arc::new(Int32Array::from_iter_values(
        rows.iter().map(|r| r.year),
    )));
    cols.push(Arc::new(Date32Array::from_iter_values(
        rows.iter().map(|r| days_since_epoch(r.date)),
    )));
    for idx in 0..ds.tenors().len() {
        cols.push(Arc::new(Float64Array::from_iter_values(
            rows.iter().map(|r| r.rates[idx]),
        )));
    }

    RecordBatch::try_new(schema, cols).context("building yield curve record batch")
}
