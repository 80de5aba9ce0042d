// src/feed/header.rs
//! Locates the header row in the tokenized sheet and maps recognized
//! column names to indices.
//!
//! The sheet is human-authored: the header need not be the first row
//! (title/blank rows above it are tolerated), and column order carries
//! no meaning. Adding a column is a one-line edit to `FIELD_TOKENS`.

/// Sheet fields the pipeline reads, in no particular column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Status,
    Category,
    Title,
    Message,
    Action,
    Link,
    Date,
    Expires,
}

/// Recognized header token (lowercased, exact match per cell) for each
/// field.
const FIELD_TOKENS: &[(Field, &str)] = &[
    (Field::Status, "status"),
    (Field::Category, "category"),
    (Field::Title, "title"),
    (Field::Message, "notification message"),
    (Field::Action, "action"),
    (Field::Link, "link to action"),
    (Field::Date, "date"),
    (Field::Expires, "expires"),
];

/// Field → column index map for one resolved header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMap {
    columns: [Option<usize>; FIELD_TOKENS.len()],
}

impl HeaderMap {
    fn from_row(cells: &[String]) -> Self {
        let lowered: Vec<String> = cells
            .iter()
            .map(|c| c.trim().to_lowercase())
            .collect();
        let mut columns = [None; FIELD_TOKENS.len()];
        for (slot, (_, token)) in columns.iter_mut().zip(FIELD_TOKENS) {
            *slot = lowered.iter().position(|c| c == token);
        }
        Self { columns }
    }

    /// Read `field` from a data row; an unmapped column or a short row
    /// reads as empty, never as an error.
    pub fn cell<'a>(&self, row: &'a [String], field: Field) -> &'a str {
        self.columns[field as usize]
            .and_then(|idx| row.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Scan top to bottom for the first row whose cells include both the
/// `category` and `title` tokens. Returns its index and the column map,
/// or `None` when the sheet has no locatable header.
pub fn resolve(rows: &[Vec<String>]) -> Option<(usize, HeaderMap)> {
    for (i, row) in rows.iter().enumerate() {
        let lowered: Vec<String> = row.iter().map(|c| c.trim().to_lowercase()).collect();
        if lowered.iter().any(|c| c == "category") && lowered.iter().any(|c| c == "title") {
            return Some((i, HeaderMap::from_row(row)));
        }
    }
    None
}
