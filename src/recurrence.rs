//! Cadence normalization and activity windows for recurring items.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Cadence, Schedule, Transaction};
use crate::period::DateWindow;

/// Average weeks per month.
pub const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(433, 0, 0, false, 2);

/// What one occurrence of `amount` at `cadence` contributes to a single month.
/// Unrounded.
pub fn monthly_equivalent(amount: Decimal, cadence: Cadence) -> Decimal {
    monthly_equivalent_with(amount, cadence, WEEKS_PER_MONTH)
}

pub fn monthly_equivalent_with(amount: Decimal, cadence: Cadence, weekly_factor: Decimal) -> Decimal {
    match cadence {
        Cadence::Monthly => amount,
        Cadence::Weekly => amount * weekly_factor,
        Cadence::Yearly => amount / Decimal::from(12),
    }
}

/// A recurring item is active iff `start <= window.end` and
/// `end (or forever) >= window.start`.
pub fn is_active_in_window(start: NaiveDate, end: Option<NaiveDate>, window: &DateWindow) -> bool {
    let end = end.unwrap_or(NaiveDate::MAX);
    start <= window.end && end >= window.start
}

/// The amount `txn` contributes to `window`, or `None` if it does not fall in it.
/// Recurring items contribute their monthly equivalent; one-time items their
/// face amount when dated inside the window.
pub fn contribution_in_window(
    txn: &Transaction,
    window: &DateWindow,
    weekly_factor: Decimal,
) -> Option<Decimal> {
    match txn.schedule {
        Schedule::Recurring {
            cadence,
            start,
            end,
        } => is_active_in_window(start, end, window)
            .then(|| monthly_equivalent_with(txn.amount, cadence, weekly_factor)),
        Schedule::OneTime { date } => window.contains(date).then_some(txn.amount),
    }
}
