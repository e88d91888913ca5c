// src/export/parquet.rs

use anyhow::{ensure, Context, Result};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use tracing::info;

use crate::dataset::CanonicalDataset;
use crate::schema::to_record_batch;

/// Serialize the dataset as a single-row-group Parquet file in memory.
pub fn to_parquet(ds: &CanonicalDataset) -> Result<Vec<u8>> {
    ensure!(!ds.is_empty(), "no data to export");

    let batch = to_record_batch(ds)?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut buf = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buf, batch.schema(), Some(props))
        .context("creating Arrow writer for yield curve")?;
    writer.write(&batch).context("writing yield curve batch")?;
    writer.close().context("closing yield curve writer")?;

    info!(rows = ds.len(), bytes = buf.len(), "parquet export");
    Ok(buf)
}
