//! chitieu-core: message interpretation and ledger aggregation for the
//! chitieu ledger bot.
//!
//! The engine is synchronous and storage-agnostic: transport and storage
//! are injected through the [`Messenger`] and [`RowStore`] traits.

pub mod aggregate;
pub mod command;
pub mod date;
pub mod engine;
pub mod ledger;
pub mod reply;
pub mod unit;

pub use aggregate::{MonthlyTotals, clean_amount, monthly_total};
pub use command::{Command, parse_command};
pub use date::cell_month_year;
pub use engine::{Messenger, process_message};
pub use ledger::{Cell, EntryKind, LedgerRow, MemoryStore, RawRow, RowStore};
pub use unit::multiplier;
