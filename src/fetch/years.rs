// src/fetch/years.rs
use std::{collections::HashSet, sync::Arc};

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{error, info, instrument};

use super::{DocumentSource, RawYearDocument};

/// Drop repeated years, keeping the first occurrence.
pub fn distinct_in_order(years: &[i32]) -> Vec<i32> {
    let mut seen = HashSet::with_capacity(years.len());
    years.iter().copied().filter(|y| seen.insert(*y)).collect()
}

/// Fetch every requested year as its own task, at most `max_concurrency` at a time.
///
/// The returned documents follow the requested order regardless of which
/// request finished first. A task that panics is reported as a failed year.
#[instrument(level = "info", skip(source, years), fields(requested = years.len()))]
pub async fn fetch_years<S>(
    source: Arc<S>,
    years: &[i32],
    max_concurrency: usize,
) -> Vec<RawYearDocument>
where
    S: DocumentSource + ?Sized + 'static,
{
    let years = distinct_in_order(years);
    let sem = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let handles: Vec<_> = years
        .iter()
        .map(|&year| {
            let source = Arc::clone(&source);
            let sem = Arc::clone(&sem);
            tokio::spawn(async move {
                let _permit = sem.acquire_owned().await.ok();
                source.fetch_year(year).await
            })
        })
        .collect();

    // merge barrier: join_all keeps the spawn order
    let docs: Vec<RawYearDocument> = join_all(handles)
        .await
        .into_iter()
        .zip(years)
        .map(|(joined, year)| {
            joined.unwrap_or_else(|e| {
                error!(year, error = %e, "fetch task aborted");
                RawYearDocument::failed(year)
            })
        })
        .collect();

    info!(
        fetched = docs.iter().filter(|d| d.fetched).count(),
        failed = docs.iter().filter(|d| !d.fetched).count(),
        "fetch complete"
    );
    docs
}
