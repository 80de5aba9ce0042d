// src/feed/normalize.rs
//! Converts raw post-header rows into typed [`Update`] records.

use crate::feed::classify::classify;
use crate::feed::header::{Field, HeaderMap};
use crate::feed::types::Update;

/// Sheet convention for "no value" in the action/link columns.
const PLACEHOLDER: &str = "-";

/// Why a row produced no record. Skips are counted and logged, never
/// silently swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Both category and title were empty: a spacer line in the sheet.
    BlankRow,
}

/// Outcome of normalizing one raw row.
#[derive(Debug)]
pub enum RowOutcome {
    Kept(Update),
    Skipped(SkipReason),
}

fn strip_placeholder(raw: &str) -> String {
    if raw == PLACEHOLDER {
        String::new()
    } else {
        raw.to_string()
    }
}

/// Normalize one data row. `id` is the row's 1-based position among all
/// post-header rows; ids are assigned here, before any filtering, so
/// they track raw sheet positions.
pub fn normalize_row(row: &[String], header: &HeaderMap, id: u32) -> RowOutcome {
    let category = header.cell(row, Field::Category).to_string();
    let title = header.cell(row, Field::Title).to_string();

    if category.trim().is_empty() && title.trim().is_empty() {
        return RowOutcome::Skipped(SkipReason::BlankRow);
    }

    let (priority, kind) = classify(&category);

    RowOutcome::Kept(Update {
        id,
        status: header.cell(row, Field::Status).to_string(),
        priority,
        category,
        title,
        message: header.cell(row, Field::Message).to_string(),
        kind,
        link: strip_placeholder(header.cell(row, Field::Link)),
        link_text: strip_placeholder(header.cell(row, Field::Action)),
        created_at: header.cell(row, Field::Date).to_string(),
        expires_at: header.cell(row, Field::Expires).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::header;
    use crate::feed::types::UpdateType;

    fn header_and_rows(csv_rows: &[&[&str]]) -> (HeaderMap, Vec<Vec<String>>) {
        let rows: Vec<Vec<String>> = csv_rows
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect();
        let (idx, map) = header::resolve(&rows).expect("header row");
        (map, rows[idx + 1..].to_vec())
    }

    #[test]
    fn blank_row_is_skipped_with_reason() {
        let (map, data) = header_and_rows(&[
            &["Status", "Category", "Title"],
            &["active", "", "  "],
        ]);
        match normalize_row(&data[0], &map, 1) {
            RowOutcome::Skipped(SkipReason::BlankRow) => {}
            other => panic!("expected blank-row skip, got {other:?}"),
        }
    }

    #[test]
    fn dash_placeholder_becomes_empty_link_fields() {
        let (map, data) = header_and_rows(&[
            &["Category", "Title", "Action", "Link to Action"],
            &["School", "Trip", "-", "-"],
        ]);
        let RowOutcome::Kept(u) = normalize_row(&data[0], &map, 1) else {
            panic!("row should be kept");
        };
        assert_eq!(u.link, "");
        assert_eq!(u.link_text, "");
    }

    #[test]
    fn real_action_text_survives() {
        let (map, data) = header_and_rows(&[
            &["Category", "Title", "Action", "Link to Action"],
            &["School", "Trip", "Pay online", "https://pay.example"],
        ]);
        let RowOutcome::Kept(u) = normalize_row(&data[0], &map, 1) else {
            panic!("row should be kept");
        };
        assert_eq!(u.link_text, "Pay online");
        assert_eq!(u.link, "https://pay.example");
    }

    #[test]
    fn priority_and_type_come_from_classifier() {
        let (map, data) = header_and_rows(&[
            &["Category", "Title"],
            &["Urgent", "Fee due"],
        ]);
        let RowOutcome::Kept(u) = normalize_row(&data[0], &map, 7) else {
            panic!("row should be kept");
        };
        assert_eq!(u.id, 7);
        assert_eq!(u.priority, 1);
        assert_eq!(u.kind, UpdateType::Urgent);
    }

    #[test]
    fn title_only_row_is_kept() {
        let (map, data) = header_and_rows(&[
            &["Category", "Title"],
            &["", "Reminder"],
        ]);
        assert!(matches!(
            normalize_row(&data[0], &map, 1),
            RowOutcome::Kept(_)
        ));
    }
}
