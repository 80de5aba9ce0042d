// src/feed/types.rs
use serde::{Deserialize, Serialize};

/// Semantic tag derived from the category keywords, in lockstep with
/// `priority`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateType {
    Urgent,
    Holiday,
    Notice,
    Info,
}

/// One normalized announcement row from the sheet.
///
/// Serialized in camelCase because the display surfaces consume this
/// shape directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Update {
    /// 1-based position among all post-header rows, assigned before any
    /// filtering. Deterministic per raw row; not contiguous in output
    /// and not stable across refetches if the sheet is reordered.
    pub id: u32,
    pub status: String,
    /// 1 = most urgent, 3 = default.
    pub priority: u8,
    pub category: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: UpdateType,
    pub link: String,
    pub link_text: String,
    /// Sheet-authored date strings, kept verbatim; `expires_at` is
    /// parsed on demand by the activity filter.
    pub created_at: String,
    pub expires_at: String,
}

impl Update {
    /// Whether this row counts toward the homework badge.
    pub fn is_homework(&self) -> bool {
        self.category.to_lowercase().contains("homework")
    }
}
