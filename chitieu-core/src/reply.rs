//! Reply texts and vi-VN display formatting.
//!
//! Everything locale-shaped on the output side lives here, so the parsing
//! and aggregation layers only ever see canonical numeric values.

use chrono::NaiveDateTime;

use crate::aggregate::MonthlyTotals;

pub const INVALID_MONTH: &str = "⚠️ Tháng không hợp lệ! Vui lòng nhập tháng từ 1 - 12.";
pub const INVALID_YEAR: &str = "⚠️ Năm không hợp lệ!";
pub const INVALID_COMMAND: &str = "⚠️ Lệnh không hợp lệ! Vui lòng nhập đúng định dạng.";

/// Capture-time display format, day first: "15/05/2025, 10:30:00".
/// This string is what the date normalizer later reads back.
pub fn timestamp_display(now: NaiveDateTime) -> String {
    now.format("%d/%m/%Y, %H:%M:%S").to_string()
}

/// Format an amount as VND: dot thousands separators, ₫ suffix, no minor
/// units ("1.234.567 ₫").
pub fn format_vnd(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let grouped: String = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(".");
    if rounded < 0 {
        format!("-{grouped} ₫")
    } else {
        format!("{grouped} ₫")
    }
}

/// Confirmation for a recorded entry, echoing the typed digits and unit
/// rather than the multiplied amount.
pub fn entry_done(label: &str, digits: i64, unit: &str) -> String {
    format!("✅ Done! {label} {digits}{unit}")
}

/// Monthly report: header plus income, expense and balance lines.
pub fn report(month: u32, year: i32, totals: &MonthlyTotals) -> String {
    format!(
        "📊 Report tháng {month}/{year}\n💰 Thu nhập: {}\n💸 Chi tiêu: {}\n💵 Còn lại: {}",
        format_vnd(totals.income),
        format_vnd(totals.expense),
        format_vnd(totals.balance()),
    )
}
