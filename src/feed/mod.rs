// src/feed/mod.rs
//! The ingestion pipeline: CSV text in, sorted active [`Update`]s out.
//!
//! `process_csv` is pure (callers supply "today") so every stage is
//! testable without a clock or a network; `run_once` adds the fetch.

pub mod classify;
pub mod csv;
pub mod filter;
pub mod header;
pub mod normalize;
pub mod source;
pub mod types;

use anyhow::Result;
use chrono::NaiveDate;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use once_cell::sync::OnceCell;

use crate::feed::filter::DropReason;
use crate::feed::normalize::{RowOutcome, SkipReason};
use crate::feed::source::FeedSource;
use crate::feed::types::Update;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("feed_rows_total", "Data rows seen after the header row.");
        describe_counter!("feed_kept_total", "Updates kept after filtering.");
        describe_counter!("feed_skipped_blank_total", "Rows skipped as blank spacers.");
        describe_counter!(
            "feed_dropped_inactive_total",
            "Updates dropped for inactive status."
        );
        describe_counter!("feed_dropped_expired_total", "Updates dropped as expired.");
        describe_counter!("feed_fetch_errors_total", "Feed fetch failures.");
        describe_histogram!("feed_parse_ms", "CSV parse+normalize time in milliseconds.");
        describe_gauge!("feed_last_run_ts", "Unix ts when the pipeline last ran.");
    });
}

/// Per-cycle bookkeeping, surfaced in logs and metrics so skips stay
/// observable.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleStats {
    pub rows_seen: usize,
    pub blank_rows: usize,
    pub dropped_inactive: usize,
    pub dropped_expired: usize,
}

/// Result of one parse cycle: the surviving records plus the counts of
/// everything that did not survive.
#[derive(Debug, Default)]
pub struct CycleOutcome {
    pub updates: Vec<Update>,
    pub stats: CycleStats,
}

/// Stable ascending sort by priority only; input order is the tiebreak.
pub fn sort_by_priority(updates: &mut [Update]) {
    updates.sort_by_key(|u| u.priority);
}

/// Run the full parse pipeline over one CSV body.
///
/// "No data" outcomes (too few rows, no locatable header) are
/// legitimate: they log a warning and yield an empty result, never an
/// error.
pub fn process_csv(text: &str, today: NaiveDate) -> CycleOutcome {
    ensure_metrics_described();
    let t0 = std::time::Instant::now();

    let rows = csv::tokenize(text);
    if rows.len() < 2 {
        tracing::warn!(rows = rows.len(), "feed has fewer than 2 rows, no data");
        return CycleOutcome::default();
    }

    let Some((header_idx, header_map)) = header::resolve(&rows) else {
        tracing::warn!("feed has no locatable header row");
        return CycleOutcome::default();
    };

    let mut stats = CycleStats::default();
    let mut updates = Vec::new();

    for (pos, row) in rows[header_idx + 1..].iter().enumerate() {
        stats.rows_seen += 1;
        // Ids track raw sheet positions, assigned before any filtering.
        let id = pos as u32 + 1;
        match normalize::normalize_row(row, &header_map, id) {
            RowOutcome::Kept(update) => match filter::check_active(&update, today) {
                Ok(()) => updates.push(update),
                Err(DropReason::Inactive) => {
                    tracing::debug!(id, title = %update.title, "dropped inactive update");
                    stats.dropped_inactive += 1;
                }
                Err(DropReason::Expired) => {
                    tracing::debug!(id, title = %update.title, expires = %update.expires_at, "dropped expired update");
                    stats.dropped_expired += 1;
                }
            },
            RowOutcome::Skipped(SkipReason::BlankRow) => {
                tracing::debug!(id, "skipped blank row");
                stats.blank_rows += 1;
            }
        }
    }

    sort_by_priority(&mut updates);

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("feed_parse_ms").record(ms);
    counter!("feed_rows_total").increment(stats.rows_seen as u64);
    counter!("feed_kept_total").increment(updates.len() as u64);
    counter!("feed_skipped_blank_total").increment(stats.blank_rows as u64);
    counter!("feed_dropped_inactive_total").increment(stats.dropped_inactive as u64);
    counter!("feed_dropped_expired_total").increment(stats.dropped_expired as u64);
    gauge!("feed_last_run_ts").set(chrono::Utc::now().timestamp().max(0) as f64);

    CycleOutcome { updates, stats }
}

/// Fetch from `source` and parse. Fetch-level failures propagate as
/// errors so the broadcaster can decide what to do with its held list;
/// everything past the fetch is non-failing.
pub async fn run_once(source: &dyn FeedSource, today: NaiveDate) -> Result<CycleOutcome> {
    ensure_metrics_described();
    let text = match source.fetch_csv().await {
        Ok(text) => text,
        Err(e) => {
            counter!("feed_fetch_errors_total").increment(1);
            tracing::warn!(error = ?e, source = source.name(), "feed fetch failed");
            return Err(e);
        }
    };
    Ok(process_csv(&text, today))
}
