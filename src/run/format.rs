use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Thousand separators, 2 decimal places, no currency symbol.
/// e.g. `-1234567.891` → `"-1,234,567.89"`
pub(crate) fn amount(val: Decimal) -> String {
    let rounded = budgetlens::aggregate::round_money(val);
    let formatted = format!("{:.2}", rounded.abs());
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if rounded < Decimal::ZERO {
        format!("-{with_commas}.{dec_part}")
    } else {
        format!("{with_commas}.{dec_part}")
    }
}

/// One decimal place with a trailing `%`.
pub(crate) fn percent(val: Decimal) -> String {
    format!("{:.1}%", val.round_dp(1))
}

/// Signed percentage for change columns, e.g. `+12.5%`.
pub(crate) fn signed_percent(val: Decimal) -> String {
    if val > Decimal::ZERO {
        format!("+{}", percent(val))
    } else {
        percent(val)
    }
}

/// Ten-cell usage bar; anything past 100% fills the bar.
pub(crate) fn bar(percentage: Decimal) -> String {
    let clamped = percentage.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let filled = (clamped / Decimal::TEN).round().to_usize().unwrap_or(0).min(10);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(10 - filled))
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

pub(crate) fn rule(width: usize) -> String {
    "─".repeat(width)
}
