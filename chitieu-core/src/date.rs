//! Date-cell normalization for aggregation.
//!
//! Stored timestamps are display strings in day-first order
//! ("15/05/2025, 10:30:00"), but spreadsheet-style backends may hand back
//! native dates instead. Both shapes normalize to a (month, year) pair.

use chrono::{Datelike, NaiveDate};

use crate::ledger::Cell;

/// Extract the calendar month and year from a stored date cell.
///
/// Text cells are split on "/", "," and whitespace; the first three fields
/// are read as day, month, year. Returns None for anything that does not
/// form a valid calendar date, so the caller can skip the row.
pub fn cell_month_year(cell: &Cell) -> Option<(u32, i32)> {
    match cell {
        Cell::Date(dt) => Some((dt.month(), dt.year())),
        Cell::Text(s) => text_month_year(s),
        Cell::Number(_) | Cell::Empty => None,
    }
}

fn text_month_year(s: &str) -> Option<(u32, i32)> {
    let mut parts = s
        .split(|c: char| c == '/' || c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty());

    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;

    // The display convention is day-first; swap back and validate against
    // the real calendar before trusting the fields.
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some((date.month(), date.year()))
}
