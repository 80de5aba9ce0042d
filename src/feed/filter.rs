// src/feed/filter.rs
//! Activity filtering: inactive-status suppression and expiry against a
//! single per-cycle "today".

use chrono::{DateTime, NaiveDate};

use crate::feed::types::Update;

/// Why a normalized record was dropped by the activity filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    Inactive,
    Expired,
}

/// Parse a sheet-authored date cell. The sheet is hand-typed, so a few
/// common shapes are accepted; anything else is "no date".
pub fn parse_sheet_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    const FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%Y/%m/%d",
        // Ambiguous slash dates read month-first, matching how the
        // sheet's authors type them.
        "%m/%d/%Y",
        "%B %e, %Y",
        "%b %e, %Y",
        "%e %B %Y",
        "%e %b %Y",
    ];
    for fmt in FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    // Full timestamps occasionally pasted from other tools.
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    None
}

/// Decide whether one record survives, against a `today` computed once
/// for the whole cycle.
///
/// Blank status means "always show" and bypasses expiry entirely. An
/// unparseable expiry date never expires (fail open). Comparison is at
/// day granularity: a record expiring today stays visible through the
/// end of the day.
pub fn check_active(update: &Update, today: NaiveDate) -> Result<(), DropReason> {
    let status = update.status.trim();
    if status.eq_ignore_ascii_case("inactive") {
        return Err(DropReason::Inactive);
    }
    if status.is_empty() {
        return Ok(());
    }
    match parse_sheet_date(&update.expires_at) {
        Some(expiry) if expiry < today => Err(DropReason::Expired),
        _ => Ok(()),
    }
}
