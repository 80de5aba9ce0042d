// src/feed/classify.rs
//! Keyword classification of the free-text category field.

use crate::feed::types::UpdateType;

/// Ordered rule table: first keyword found in the lowercased category
/// wins. A category containing both "urgent" and "home" is urgent.
const RULES: &[(&str, u8, UpdateType)] = &[
    ("urgent", 1, UpdateType::Urgent),
    ("holiday", 2, UpdateType::Holiday),
    ("school", 2, UpdateType::Notice),
    ("home", 2, UpdateType::Info),
];

pub const DEFAULT_PRIORITY: u8 = 3;

/// Derive `(priority, type)` from the category text. Pure and
/// deterministic; safe to re-run on the same input.
pub fn classify(category: &str) -> (u8, UpdateType) {
    let lowered = category.to_lowercase();
    for (keyword, priority, kind) in RULES {
        if lowered.contains(keyword) {
            return (*priority, *kind);
        }
    }
    (DEFAULT_PRIORITY, UpdateType::Info)
}
