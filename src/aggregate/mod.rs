//! Sums transactions over a date window, grouped by category.
//!
//! Works on the tagged [`Transaction`] union, so recurring and one-time
//! records of either flow share one code path. Expenses whose category is
//! missing or no longer exists are collected under "Uncategorized" so that
//! the per-category totals always add up to [`Aggregator::total`].

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::HashMap;

use crate::config::AnalyticsConfig;
use crate::models::{Category, Flow, Transaction, NEUTRAL_COLOR, UNCATEGORIZED};
use crate::period::DateWindow;
use crate::recurrence::contribution_in_window;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    /// `None` for the uncategorized bucket.
    pub category_id: Option<i64>,
    pub category_name: String,
    pub value: Decimal,
    pub color: String,
}

/// Per-category transaction statistics for one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStats {
    pub category_id: Option<i64>,
    pub category_name: String,
    pub count: usize,
    pub total: Decimal,
    pub average: Decimal,
    pub largest: Decimal,
}

/// Round to cents, halves away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `numerator / denominator * 100`, or zero when the denominator is zero.
pub fn percentage(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator * Decimal::ONE_HUNDRED
    }
}

pub struct Aggregator<'a> {
    categories: &'a [Category],
    index: HashMap<i64, usize>,
    weekly_factor: Decimal,
    keep_zero_totals: bool,
}

impl<'a> Aggregator<'a> {
    pub fn new(categories: &'a [Category], config: &AnalyticsConfig) -> Self {
        let mut index = HashMap::with_capacity(categories.len());
        for (i, cat) in categories.iter().enumerate() {
            index.entry(cat.id).or_insert(i);
        }
        Self {
            categories,
            index,
            weekly_factor: config.weekly_factor,
            keep_zero_totals: config.keep_zero_totals,
        }
    }

    pub fn categories(&self) -> &'a [Category] {
        self.categories
    }

    /// Bucket position for an expense; the last slot is "Uncategorized".
    fn bucket(&self, category_id: Option<i64>) -> usize {
        match category_id.and_then(|id| self.index.get(&id)) {
            Some(&i) => i,
            None => {
                if let Some(id) = category_id {
                    tracing::debug!(category_id = id, "Expense references unknown category");
                }
                self.categories.len()
            }
        }
    }

    fn bucket_identity(&self, slot: usize) -> (Option<i64>, String, String) {
        match self.categories.get(slot) {
            Some(cat) => (Some(cat.id), cat.name.clone(), cat.color.clone()),
            None => (None, UNCATEGORIZED.to_string(), NEUTRAL_COLOR.to_string()),
        }
    }

    /// Unrounded expense sum per bucket, indexed like `bucket`.
    fn bucket_sums(&self, transactions: &[Transaction], window: &DateWindow) -> Vec<Decimal> {
        let mut sums = vec![Decimal::ZERO; self.categories.len() + 1];
        for txn in transactions.iter().filter(|t| t.is_expense()) {
            if let Some(amount) = contribution_in_window(txn, window, self.weekly_factor) {
                sums[self.bucket(txn.category_id)] += amount;
            }
        }
        sums
    }

    /// Expense totals per category for `window`, in category order with
    /// "Uncategorized" last. Zero totals are dropped unless the config keeps
    /// them (the uncategorized bucket is only emitted when non-zero).
    pub fn by_category(&self, transactions: &[Transaction], window: &DateWindow) -> Vec<CategoryTotal> {
        let uncategorized = self.categories.len();
        self.bucket_sums(transactions, window)
            .into_iter()
            .enumerate()
            .filter_map(|(slot, sum)| {
                let value = round_money(sum);
                let keep = !value.is_zero() || (self.keep_zero_totals && slot != uncategorized);
                if !keep {
                    return None;
                }
                let (category_id, category_name, color) = self.bucket_identity(slot);
                Some(CategoryTotal {
                    category_id,
                    category_name,
                    value,
                    color,
                })
            })
            .collect()
    }

    /// Total of every `flow` record in `window`. Expenses are the sum of the
    /// per-category cents reported by [`Aggregator::by_category`]; income is
    /// ungrouped and rounded once.
    pub fn total(&self, transactions: &[Transaction], flow: Flow, window: &DateWindow) -> Decimal {
        match flow {
            Flow::Expense => self
                .bucket_sums(transactions, window)
                .into_iter()
                .map(round_money)
                .sum(),
            Flow::Income => round_money(
                transactions
                    .iter()
                    .filter(|t| t.is_income())
                    .filter_map(|t| contribution_in_window(t, window, self.weekly_factor))
                    .sum(),
            ),
        }
    }

    /// Count, average and largest contribution per expense category.
    pub fn transaction_stats(
        &self,
        transactions: &[Transaction],
        window: &DateWindow,
    ) -> Vec<TransactionStats> {
        let mut buckets: Vec<(usize, Decimal, Decimal)> =
            vec![(0, Decimal::ZERO, Decimal::ZERO); self.categories.len() + 1];
        for txn in transactions.iter().filter(|t| t.is_expense()) {
            if let Some(amount) = contribution_in_window(txn, window, self.weekly_factor) {
                let entry = &mut buckets[self.bucket(txn.category_id)];
                entry.0 += 1;
                entry.1 += amount;
                entry.2 = entry.2.max(amount);
            }
        }

        buckets
            .into_iter()
            .enumerate()
            .filter(|(_, (count, _, _))| *count > 0)
            .map(|(slot, (count, total, largest))| {
                let (category_id, category_name, _) = self.bucket_identity(slot);
                TransactionStats {
                    category_id,
                    category_name,
                    count,
                    total: round_money(total),
                    average: round_money(total / Decimal::from(count)),
                    largest: round_money(largest),
                }
            })
            .collect()
    }
}

/// Expense totals per category with the default configuration.
pub fn aggregate_by_category(
    transactions: &[Transaction],
    categories: &[Category],
    window: &DateWindow,
) -> Vec<CategoryTotal> {
    Aggregator::new(categories, &AnalyticsConfig::default()).by_category(transactions, window)
}

/// Income or expense total with the default configuration, consistent with
/// [`aggregate_by_category`] over the same categories.
pub fn total_for_window(
    transactions: &[Transaction],
    categories: &[Category],
    flow: Flow,
    window: &DateWindow,
) -> Decimal {
    Aggregator::new(categories, &AnalyticsConfig::default()).total(transactions, flow, window)
}
