use anyhow::{Context, Result};
use std::{env, fs, path::PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use yieldscraper::{
    export::{self, Sheet},
    Config, Pipeline,
};

const DEFAULT_YEARS: &[i32] = &[2024];
/// How many of the latest dates to overlay as curves.
const COMPARE_DATES: usize = 3;

/// `yieldscraper [YEAR ...] [--out DIR]`
fn parse_args() -> Result<(Vec<i32>, PathBuf)> {
    let mut years = Vec::new();
    let mut out_dir = PathBuf::from(".");
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--out" {
            out_dir = args
                .next()
                .map(PathBuf::from)
                .context("--out needs a directory")?;
            continue;
        }
        let year: i32 = arg
            .parse()
            .with_context(|| format!("`{}` is not a year", arg))?;
        years.push(year);
    }
    if years.is_empty() {
        years = DEFAULT_YEARS.to_vec();
    }
    Ok((years, out_dir))
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,yieldscraper=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    let (years, out_dir) = parse_args()?;
    info!(?years, out = %out_dir.display(), "startup");

    // ─── 2) fetch + normalize ────────────────────────────────────────
    let pipeline = Pipeline::new(&Config::default())?;
    let ds = pipeline.load(&years).await;
    if ds.is_empty() {
        warn!(?years, "no data found for the selected years");
        return Ok(());
    }
    info!(
        rows = ds.len(),
        first = ?ds.first_date(),
        last = ?ds.last_date(),
        "records fetched"
    );

    // ─── 3) derived views ────────────────────────────────────────────
    match ds.latest_spread() {
        Some(p) => info!(date = %p.date, spread = %format!("{:.2} %", p.spread), "current spread 10Y - 2Y"),
        None => warn!("2 Yr or 10 Yr missing; no spread"),
    }
    let curves = ds.curve_at(&ds.recent_dates(COMPARE_DATES));
    println!("{}", serde_json::to_string_pretty(&curves)?);

    // ─── 4) downloads ────────────────────────────────────────────────
    fs::create_dir_all(&out_dir).with_context(|| format!("creating {:?}", out_dir))?;

    let xlsx_path = out_dir.join(export::XLSX_FILE_NAME);
    fs::write(&xlsx_path, export::to_xlsx(&ds, &Sheet::ALL)?)
        .with_context(|| format!("writing {:?}", xlsx_path))?;
    info!(path = %xlsx_path.display(), "wrote spreadsheet");

    let parquet_path = out_dir.join(export::PARQUET_FILE_NAME);
    fs::write(&parquet_path, export::to_parquet(&ds)?)
        .with_context(|| format!("writing {:?}", parquet_path))?;
    info!(path = %parquet_path.display(), "wrote parquet");

    info!("all done");
    Ok(())
}
