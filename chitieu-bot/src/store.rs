//! CSV-backed row store.
//!
//! The ledger is a plain CSV file with a fixed header row, columns
//! Date/Description/Expense/Income. Rows are only ever appended.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chitieu_core::{Cell, LedgerRow, RawRow, RowStore};

const HEADER: [&str; 4] = ["Date", "Description", "Expense", "Income"];

#[derive(Debug)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Open the ledger file, creating it with a header row if missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            if let Some(dir) = path.parent() {
                if !dir.as_os_str().is_empty() {
                    std::fs::create_dir_all(dir)
                        .with_context(|| format!("create {}", dir.display()))?;
                }
            }
            let mut writer =
                csv::Writer::from_path(&path).with_context(|| format!("create {}", path.display()))?;
            writer.write_record(HEADER)?;
            writer.flush()?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse_cell(field: &str) -> Cell {
    if field.is_empty() {
        Cell::Empty
    } else if let Ok(n) = field.parse::<f64>() {
        Cell::Number(n)
    } else {
        Cell::Text(field.to_string())
    }
}

impl RowStore for CsvStore {
    fn append_row(&mut self, row: LedgerRow) -> Result<()> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open {} for append", self.path.display()))?;
        let mut writer = csv::Writer::from_writer(file);

        let amount = |a: Option<i64>| a.map(|v| v.to_string()).unwrap_or_default();
        writer.write_record([
            row.timestamp.clone(),
            row.label.clone(),
            amount(row.expense),
            amount(row.income),
        ])?;
        writer
            .flush()
            .with_context(|| format!("flush {}", self.path.display()))?;
        Ok(())
    }

    fn read_all_rows(&self) -> Result<Vec<RawRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_path(&self.path)
            .with_context(|| format!("open {}", self.path.display()))?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(RawRow {
                date: parse_cell(record.get(0).unwrap_or("")),
                label: parse_cell(record.get(1).unwrap_or("")),
                expense: parse_cell(record.get(2).unwrap_or("")),
                income: parse_cell(record.get(3).unwrap_or("")),
            });
        }
        Ok(rows)
    }
}
