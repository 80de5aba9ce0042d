// src/feed/csv.rs
//! Quote-aware CSV tokenizer for the published-sheet export.
//!
//! Deliberately simpler than RFC 4180: a `"` toggles quoting and is
//! never emitted into the cell, so doubled-quote escapes are not
//! supported. Cells are trimmed, which also strips the `\r` of CRLF
//! line endings.

/// Split raw CSV text into rows of trimmed cells.
///
/// An unbalanced quote consumes the rest of the document as one quoted
/// field; the scan still terminates and flushes the pending row.
pub fn tokenize(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut current_row: Vec<String> = Vec::new();
    let mut current_cell = String::new();
    let mut in_quotes = false;

    for ch in text.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                current_row.push(current_cell.trim().to_string());
                current_cell.clear();
            }
            '\n' if !in_quotes => {
                current_row.push(current_cell.trim().to_string());
                current_cell.clear();
                rows.push(std::mem::take(&mut current_row));
            }
            _ => current_cell.push(ch),
        }
    }

    // Flush a trailing partial row; a file ending in '\n' leaves nothing
    // pending, so no spurious empty row is produced.
    if !current_cell.is_empty() || !current_row.is_empty() {
        current_row.push(current_cell.trim().to_string());
        rows.push(current_row);
    }

    rows
}
