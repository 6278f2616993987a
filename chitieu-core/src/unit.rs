//! Trailing-unit currency multipliers.

/// Multiplier for a trailing unit token typed after the digits.
///
/// Matching is case-insensitive. Unknown or empty tokens leave the
/// amount untouched.
pub fn multiplier(unit: &str) -> i64 {
    match unit.to_lowercase().as_str() {
        "k" | "nghìn" | "ng" | "ngàn" => 1_000,
        "xị" | "lít" | "trăm" => 100_000,
        "củ" | "tr" | "m" | "triệu" => 1_000_000,
        _ => 1,
    }
}
