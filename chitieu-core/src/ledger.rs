//! Ledger row types and the row store boundary.

use anyhow::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Expense,
    Income,
}

/// A single stored cell as handed back by a row store.
///
/// Spreadsheet-style backends return native dates and numbers; file-backed
/// stores return text. Aggregation has to cope with all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Date(NaiveDateTime),
    Number(f64),
    Text(String),
    Empty,
}

/// A raw stored row: capture timestamp, label, expense cell, income cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub date: Cell,
    pub label: Cell,
    pub expense: Cell,
    pub income: Cell,
}

impl RawRow {
    pub fn amount_cell(&self, kind: EntryKind) -> &Cell {
        match kind {
            EntryKind::Expense => &self.expense,
            EntryKind::Income => &self.income,
        }
    }
}

/// A new ledger entry to append.
///
/// Exactly one of the two amount columns is populated; the constructors
/// enforce that. Rows are append-only and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Capture time, display-formatted day-first. Aggregation reads this
    /// same column back as the transaction date.
    pub timestamp: String,
    pub label: String,
    pub expense: Option<i64>,
    pub income: Option<i64>,
}

impl LedgerRow {
    pub fn expense(timestamp: impl Into<String>, label: impl Into<String>, amount: i64) -> Self {
        Self {
            timestamp: timestamp.into(),
            label: label.into(),
            expense: Some(amount),
            income: None,
        }
    }

    pub fn income(timestamp: impl Into<String>, label: impl Into<String>, amount: i64) -> Self {
        Self {
            timestamp: timestamp.into(),
            label: label.into(),
            expense: None,
            income: Some(amount),
        }
    }

    pub fn kind(&self) -> EntryKind {
        if self.income.is_some() {
            EntryKind::Income
        } else {
            EntryKind::Expense
        }
    }

    pub fn amount(&self) -> i64 {
        self.income.or(self.expense).unwrap_or(0)
    }
}

/// The storage seam. One appender at a time; `read_all_rows` returns data
/// rows in insertion order with the header already excluded.
pub trait RowStore {
    fn append_row(&mut self, row: LedgerRow) -> Result<()>;
    fn read_all_rows(&self) -> Result<Vec<RawRow>>;
}

/// In-memory store: the reference implementation and the test fake.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Vec<RawRow>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    /// Seed a raw row directly, bypassing the append path. Lets tests set
    /// up native-date and malformed cells a real append never produces.
    pub fn push_raw(&mut self, row: RawRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }
}

impl RowStore for MemoryStore {
    fn append_row(&mut self, row: LedgerRow) -> Result<()> {
        let amount_cell = |a: Option<i64>| match a {
            Some(v) => Cell::Number(v as f64),
            None => Cell::Empty,
        };
        self.rows.push(RawRow {
            date: Cell::Text(row.timestamp.clone()),
            label: Cell::Text(row.label.clone()),
            expense: amount_cell(row.expense),
            income: amount_cell(row.income),
        });
        Ok(())
    }

    fn read_all_rows(&self) -> Result<Vec<RawRow>> {
        Ok(self.rows.clone())
    }
}
