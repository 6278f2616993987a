//! Free-text command classification.
//!
//! Messages are matched against an ordered list of matchers; the first
//! match wins. The entry patterns are permissive supersets of the report
//! pattern, so the report matcher has to run first.

use regex::Regex;

use crate::ledger::EntryKind;

/// The classified form of one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// "Report tháng M năm Y". Range validation happens in the engine so
    /// out-of-range values get their own warning reply.
    Report { month: i64, year: i64 },
    /// "label 50k" / "label +50k". `digits` is the typed number before the
    /// unit is applied; `unit` is the trailing token, kept verbatim.
    Entry {
        kind: EntryKind,
        label: String,
        digits: i64,
        unit: String,
    },
    Invalid,
}

type Matcher = fn(&str) -> Option<Command>;

/// Ordered by priority: report, income (explicit plus), expense.
const MATCHERS: &[Matcher] = &[match_report, match_income, match_expense];

/// Classify one message. Deterministic: the first matching pattern wins,
/// everything else is Invalid.
pub fn parse_command(text: &str) -> Command {
    for matcher in MATCHERS {
        if let Some(cmd) = matcher(text) {
            return cmd;
        }
    }
    Command::Invalid
}

// Digit runs too long for i64 saturate instead of failing the match, so an
// absurd number still classifies as the pattern it was typed as.
fn parse_digits(s: &str) -> i64 {
    s.parse().unwrap_or(i64::MAX)
}

fn match_report(text: &str) -> Option<Command> {
    let re = Regex::new(r"(?i)^Report tháng ([0-9]+) năm ([0-9]+)$").ok()?;
    let caps = re.captures(text)?;
    Some(Command::Report {
        month: parse_digits(&caps[1]),
        year: parse_digits(&caps[2]),
    })
}

fn match_income(text: &str) -> Option<Command> {
    let re = Regex::new(r"^(.*) \+([0-9]+)(.*)$").ok()?;
    let caps = re.captures(text)?;
    Some(Command::Entry {
        kind: EntryKind::Income,
        label: caps[1].trim().to_string(),
        digits: parse_digits(&caps[2]),
        unit: caps[3].to_string(),
    })
}

fn match_expense(text: &str) -> Option<Command> {
    let re = Regex::new(r"^(.*) ([0-9]+)(.*)$").ok()?;
    let caps = re.captures(text)?;
    Some(Command::Entry {
        kind: EntryKind::Expense,
        label: caps[1].trim().to_string(),
        digits: parse_digits(&caps[2]),
        unit: caps[3].to_string(),
    })
}
