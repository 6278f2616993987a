//! Message processing: one inbound text, exactly one reply, at most one
//! append.

use anyhow::Result;
use chrono::NaiveDateTime;
use tracing::info;

use crate::aggregate::MonthlyTotals;
use crate::command::{Command, parse_command};
use crate::ledger::{EntryKind, LedgerRow, RowStore};
use crate::reply;
use crate::unit;

/// Outbound reply channel. Fire-and-forget: the engine never consumes a
/// delivery confirmation.
pub trait Messenger {
    fn send_reply(&mut self, text: &str) -> Result<()>;
}

/// Interpret one inbound message, apply its side effect and send the reply.
///
/// `now` is the capture time recorded on appended rows. Reports and invalid
/// commands never append; out-of-range reports warn without touching the
/// store (month is checked before year).
pub fn process_message<S: RowStore, M: Messenger>(
    store: &mut S,
    messenger: &mut M,
    text: &str,
    now: NaiveDateTime,
) -> Result<()> {
    match parse_command(text) {
        Command::Report { month, year } => {
            if !(1..=12).contains(&month) {
                return messenger.send_reply(reply::INVALID_MONTH);
            }
            if !(1930..=2201).contains(&year) {
                return messenger.send_reply(reply::INVALID_YEAR);
            }
            let (month, year) = (month as u32, year as i32);
            let rows = store.read_all_rows()?;
            let totals = MonthlyTotals::for_month(&rows, month, year);
            info!(month, year, rows = rows.len(), "report computed");
            messenger.send_reply(&reply::report(month, year, &totals))
        }
        Command::Entry {
            kind,
            label,
            digits,
            unit: unit_text,
        } => {
            let amount = digits.saturating_mul(unit::multiplier(&unit_text));
            let timestamp = reply::timestamp_display(now);
            let row = match kind {
                EntryKind::Expense => LedgerRow::expense(timestamp, label.as_str(), amount),
                EntryKind::Income => LedgerRow::income(timestamp, label.as_str(), amount),
            };
            store.append_row(row)?;
            info!(?kind, %label, amount, "entry recorded");
            messenger.send_reply(&reply::entry_done(&label, digits, &unit_text))
        }
        Command::Invalid => messenger.send_reply(reply::INVALID_COMMAND),
    }
}
