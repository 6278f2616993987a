//! Monthly totals over the raw ledger.

use tracing::warn;

use crate::date::cell_month_year;
use crate::ledger::{Cell, EntryKind, RawRow};

/// Income and expense for one calendar month. Derived on demand, never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyTotals {
    pub income: f64,
    pub expense: f64,
}

impl MonthlyTotals {
    /// Aggregate both kinds for one month. Each kind is summed in its own
    /// pass over the rows; there is no shared accumulator.
    pub fn for_month(rows: &[RawRow], month: u32, year: i32) -> Self {
        Self {
            income: monthly_total(rows, EntryKind::Income, month, year),
            expense: monthly_total(rows, EntryKind::Expense, month, year),
        }
    }

    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}

/// Sum one amount column over the rows falling in the given month/year.
///
/// Rows whose date cell cannot be normalized are skipped and logged;
/// malformed amount cells count as 0. A bad row never aborts the scan.
pub fn monthly_total(rows: &[RawRow], kind: EntryKind, month: u32, year: i32) -> f64 {
    let mut sum = 0.0;
    for (idx, row) in rows.iter().enumerate() {
        let Some((row_month, row_year)) = cell_month_year(&row.date) else {
            warn!(row = idx, "skipping row with unreadable date cell");
            continue;
        };
        if row_month != month || row_year != year {
            continue;
        }
        sum += clean_amount(row.amount_cell(kind));
    }
    sum
}

/// Parse an amount cell into a number, tolerating display formatting.
///
/// Text cells keep only digits, comma, dot and minus (the ₫ glyph and any
/// other decoration are dropped), then thousands-separator commas are
/// removed. Unparseable cells yield 0. Cleaning an already-clean numeric
/// string is a no-op.
pub fn clean_amount(cell: &Cell) -> f64 {
    match cell {
        Cell::Number(n) => *n,
        Cell::Text(s) => {
            let kept: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
                .collect();
            kept.replace(',', "").parse().unwrap_or(0.0)
        }
        Cell::Date(_) | Cell::Empty => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn text_row(date: &str, expense: Cell, income: Cell) -> RawRow {
        RawRow {
            date: Cell::Text(date.to_string()),
            label: Cell::Text("x".to_string()),
            expense,
            income,
        }
    }

    fn native_row(y: i32, m: u32, d: u32, expense: Cell, income: Cell) -> RawRow {
        let dt = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        RawRow {
            date: Cell::Date(dt),
            label: Cell::Text("x".to_string()),
            expense,
            income,
        }
    }

    #[test]
    fn test_mixed_cell_shapes_and_malformed_rows() {
        let rows = vec![
            // In range, text date, numeric expense
            text_row("15/05/2025, 10:30:00", Cell::Number(50_000.0), Cell::Empty),
            // In range, native date, income
            native_row(2025, 5, 3, Cell::Empty, Cell::Number(2_000_000.0)),
            // In range, currency-formatted text amount
            text_row(
                "20/05/2025",
                Cell::Text("1,234,567 ₫".to_string()),
                Cell::Empty,
            ),
            // Out of range month
            text_row("15/06/2025, 10:30:00", Cell::Number(999.0), Cell::Empty),
            // Out of range year
            native_row(2024, 5, 3, Cell::Empty, Cell::Number(999.0)),
            // Malformed date: contributes nothing, must not abort
            text_row("not a date", Cell::Number(777.0), Cell::Number(777.0)),
            // In range but malformed amount: counts as 0
            text_row("21/05/2025", Cell::Text("abc".to_string()), Cell::Empty),
        ];

        let expense = monthly_total(&rows, EntryKind::Expense, 5, 2025);
        let income = monthly_total(&rows, EntryKind::Income, 5, 2025);
        assert_eq!(expense, 50_000.0 + 1_234_567.0);
        assert_eq!(income, 2_000_000.0);

        let totals = MonthlyTotals::for_month(&rows, 5, 2025);
        assert_eq!(totals.expense, expense);
        assert_eq!(totals.income, income);
        assert_eq!(totals.balance(), income - expense);
    }

    #[test]
    fn test_empty_ledger_totals_are_zero() {
        let totals = MonthlyTotals::for_month(&[], 1, 2025);
        assert_eq!(totals.income, 0.0);
        assert_eq!(totals.expense, 0.0);
        assert_eq!(totals.balance(), 0.0);
    }

    #[test]
    fn test_clean_amount_strips_decoration() {
        assert_eq!(clean_amount(&Cell::Text("1,234,567 ₫".into())), 1_234_567.0);
        assert_eq!(clean_amount(&Cell::Text("50000".into())), 50_000.0);
        assert_eq!(clean_amount(&Cell::Text("-2,500".into())), -2_500.0);
        assert_eq!(clean_amount(&Cell::Number(42.0)), 42.0);
    }

    #[test]
    fn test_clean_amount_malformed_is_zero() {
        assert_eq!(clean_amount(&Cell::Text("abc".into())), 0.0);
        assert_eq!(clean_amount(&Cell::Text(String::new())), 0.0);
        assert_eq!(clean_amount(&Cell::Empty), 0.0);
        // Multiple dots survive the character filter but fail the parse.
        assert_eq!(clean_amount(&Cell::Text("1.2.3".into())), 0.0);
    }

    #[test]
    fn test_clean_amount_idempotent() {
        let first = clean_amount(&Cell::Text("1,234,567 ₫".into()));
        let second = clean_amount(&Cell::Text(format!("{first}")));
        assert_eq!(first, second);
    }
}
