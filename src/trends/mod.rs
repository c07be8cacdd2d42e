//! Historical comparisons per category: month-over-month change, rolling
//! averages, spend ranking and same-month-last-year seasonality.
//!
//! Each comparison re-runs the [`Aggregator`] over a calendar month relative
//! to the analyzed window. Per-window results are memoized for the duration
//! of one [`TrendAnalyzer::analyze`] call, since the same transaction set is
//! scanned for up to eight windows.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::aggregate::{percentage, round_money, Aggregator, CategoryTotal, TransactionStats};
use crate::config::AnalyticsConfig;
use crate::models::{Category, Flow, Transaction};
use crate::period::DateWindow;

pub const SHORT_AVERAGE_MONTHS: u32 = 3;
pub const LONG_AVERAGE_MONTHS: u32 = 6;
pub const SEASONAL_LOOKBACK_MONTHS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AverageComparison {
    Above,
    Below,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub amount: Decimal,
    /// Zero when the previous value is zero.
    pub percentage: Decimal,
    pub trend: Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Seasonal {
    pub same_month_last_year: Decimal,
    pub deviation: Decimal,
    pub is_typical: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTrend {
    pub category_id: Option<i64>,
    pub category_name: String,
    pub color: String,
    pub current: Decimal,
    pub previous: Decimal,
    pub change: Change,
    pub three_month_average: Decimal,
    pub six_month_average: Decimal,
    pub average_comparison: AverageComparison,
    /// 1-based spend rank; `None` when nothing was spent in the window.
    pub rank: Option<usize>,
    pub previous_rank: Option<usize>,
    /// `previous_rank - rank`; positive means the category climbed.
    pub ranking_change: Option<i64>,
    pub seasonal: Seasonal,
    pub transaction_count: usize,
    pub average_transaction: Decimal,
    pub largest_transaction: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallTrend {
    pub current_expenses: Decimal,
    pub previous_expenses: Decimal,
    pub expense_change: Change,
    pub current_income: Decimal,
    pub previous_income: Decimal,
    pub income_change: Change,
    pub three_month_average: Decimal,
    pub six_month_average: Decimal,
    pub average_comparison: AverageComparison,
    pub seasonal: Seasonal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub window: DateWindow,
    /// Ranked by current spend; categories with no current spend last.
    pub categories: Vec<CategoryTrend>,
    pub overall: OverallTrend,
}

impl TrendReport {
    pub fn category(&self, category_id: i64) -> Option<&CategoryTrend> {
        self.categories.iter().find(|c| c.category_id == Some(category_id))
    }
}

/// Period-over-period change; "stable" inside the band.
pub fn change(current: Decimal, previous: Decimal, stable_band_pct: Decimal) -> Change {
    let amount = current - previous;
    let pct = percentage(amount, previous);
    let trend = if pct.abs() < stable_band_pct {
        Trend::Stable
    } else if pct > Decimal::ZERO {
        Trend::Up
    } else {
        Trend::Down
    };
    Change {
        amount,
        percentage: round_money(pct),
        trend,
    }
}

pub fn compare_to_average(current: Decimal, average: Decimal, band: Decimal) -> AverageComparison {
    if current > average * (Decimal::ONE + band) {
        AverageComparison::Above
    } else if current < average * (Decimal::ONE - band) {
        AverageComparison::Below
    } else {
        AverageComparison::Normal
    }
}

pub fn seasonal(current: Decimal, last_year: Decimal, typical_pct: Decimal) -> Seasonal {
    let deviation = percentage((current - last_year).abs(), last_year);
    Seasonal {
        same_month_last_year: last_year,
        deviation: round_money(deviation),
        is_typical: deviation < typical_pct,
    }
}

/// 1-based ranks by descending value; ties keep input order.
pub fn rank_by_value(totals: &[CategoryTotal]) -> HashMap<Option<i64>, usize> {
    let mut ordered: Vec<&CategoryTotal> = totals.iter().filter(|t| t.value > Decimal::ZERO).collect();
    ordered.sort_by(|a, b| b.value.cmp(&a.value));
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, t)| (t.category_id, i + 1))
        .collect()
}

fn value_of(totals: &[CategoryTotal], category_id: Option<i64>) -> Decimal {
    totals
        .iter()
        .find(|t| t.category_id == category_id)
        .map_or(Decimal::ZERO, |t| t.value)
}

/// Memoized per-window aggregates for one analysis run.
struct WindowCache<'a, 'b> {
    aggregator: &'b Aggregator<'a>,
    transactions: &'a [Transaction],
    by_category: HashMap<DateWindow, Vec<CategoryTotal>>,
}

impl<'a, 'b> WindowCache<'a, 'b> {
    fn totals(&mut self, window: DateWindow) -> &[CategoryTotal] {
        let aggregator = self.aggregator;
        let transactions = self.transactions;
        self.by_category.entry(window).or_insert_with(|| {
            tracing::debug!(window = %window, "Aggregating window");
            aggregator.by_category(transactions, &window)
        })
    }
}

pub struct TrendAnalyzer<'a> {
    aggregator: Aggregator<'a>,
    transactions: &'a [Transaction],
    config: &'a AnalyticsConfig,
}

impl<'a> TrendAnalyzer<'a> {
    pub fn new(
        categories: &'a [Category],
        transactions: &'a [Transaction],
        config: &'a AnalyticsConfig,
    ) -> Self {
        Self {
            aggregator: Aggregator::new(categories, config),
            transactions,
            config,
        }
    }

    fn average(&self, cache: &mut WindowCache<'a, '_>, window: &DateWindow, months: u32, id: Option<i64>) -> Decimal {
        let sum: Decimal = (1..=months)
            .map(|back| value_of(cache.totals(window.months_back(back)), id))
            .sum();
        round_money(sum / Decimal::from(months))
    }

    fn overall_average(&self, window: &DateWindow, months: u32) -> Decimal {
        let sum: Decimal = (1..=months)
            .map(|back| {
                self.aggregator
                    .total(self.transactions, Flow::Expense, &window.months_back(back))
            })
            .sum();
        round_money(sum / Decimal::from(months))
    }

    pub fn analyze(&self, window: &DateWindow) -> TrendReport {
        let cfg = self.config;
        let mut cache = WindowCache {
            aggregator: &self.aggregator,
            transactions: self.transactions,
            by_category: HashMap::new(),
        };

        let previous_window = window.months_back(1);
        let last_year_window = window.months_back(SEASONAL_LOOKBACK_MONTHS);

        let current = cache.totals(*window).to_vec();
        let previous = cache.totals(previous_window).to_vec();
        let last_year = cache.totals(last_year_window).to_vec();
        let current_ranks = rank_by_value(&current);
        let previous_ranks = rank_by_value(&previous);
        let stats: Vec<TransactionStats> = self.aggregator.transaction_stats(self.transactions, window);

        // Every category seen in the current or any trailing month.
        let mut seen: Vec<(Option<i64>, String, String)> = Vec::new();
        let mut history = vec![*window, last_year_window];
        history.extend((1..=LONG_AVERAGE_MONTHS).map(|back| window.months_back(back)));
        for w in history {
            for t in cache.totals(w) {
                if !seen.iter().any(|(id, _, _)| *id == t.category_id) {
                    seen.push((t.category_id, t.category_name.clone(), t.color.clone()));
                }
            }
        }

        let mut categories: Vec<CategoryTrend> = seen
            .into_iter()
            .map(|(id, name, color)| {
                let cur = value_of(&current, id);
                let prev = value_of(&previous, id);
                let three = self.average(&mut cache, window, SHORT_AVERAGE_MONTHS, id);
                let six = self.average(&mut cache, window, LONG_AVERAGE_MONTHS, id);
                let rank = current_ranks.get(&id).copied();
                let previous_rank = previous_ranks.get(&id).copied();
                let ranking_change = match (previous_rank, rank) {
                    (Some(p), Some(c)) => Some(p as i64 - c as i64),
                    _ => None,
                };
                let stat = stats.iter().find(|s| s.category_id == id);

                CategoryTrend {
                    category_id: id,
                    category_name: name,
                    color,
                    current: cur,
                    previous: prev,
                    change: change(cur, prev, cfg.stable_band_pct),
                    three_month_average: three,
                    six_month_average: six,
                    average_comparison: compare_to_average(cur, three, cfg.average_band),
                    rank,
                    previous_rank,
                    ranking_change,
                    seasonal: seasonal(cur, value_of(&last_year, id), cfg.seasonal_typical_pct),
                    transaction_count: stat.map_or(0, |s| s.count),
                    average_transaction: stat.map_or(Decimal::ZERO, |s| s.average),
                    largest_transaction: stat.map_or(Decimal::ZERO, |s| s.largest),
                }
            })
            .collect();

        categories.sort_by(|a, b| match (a.rank, b.rank) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => b.previous.cmp(&a.previous),
        });

        let agg = &self.aggregator;
        let txns = self.transactions;
        let current_expenses = agg.total(txns, Flow::Expense, window);
        let previous_expenses = agg.total(txns, Flow::Expense, &previous_window);
        let current_income = agg.total(txns, Flow::Income, window);
        let previous_income = agg.total(txns, Flow::Income, &previous_window);
        let three_month_average = self.overall_average(window, SHORT_AVERAGE_MONTHS);
        let last_year_expenses = agg.total(txns, Flow::Expense, &last_year_window);

        let overall = OverallTrend {
            current_expenses,
            previous_expenses,
            expense_change: change(current_expenses, previous_expenses, cfg.stable_band_pct),
            current_income,
            previous_income,
            income_change: change(current_income, previous_income, cfg.stable_band_pct),
            three_month_average,
            six_month_average: self.overall_average(window, LONG_AVERAGE_MONTHS),
            average_comparison: compare_to_average(current_expenses, three_month_average, cfg.average_band),
            seasonal: seasonal(current_expenses, last_year_expenses, cfg.seasonal_typical_pct),
        };

        tracing::debug!(
            window = %window,
            categories = categories.len(),
            windows_scanned = cache.by_category.len(),
            "Trend analysis complete"
        );

        TrendReport {
            window: *window,
            categories,
            overall,
        }
    }
}

/// Trend report with the default configuration.
pub fn analyze_trends(
    categories: &[Category],
    transactions: &[Transaction],
    window: &DateWindow,
) -> TrendReport {
    let config = AnalyticsConfig::default();
    TrendAnalyzer::new(categories, transactions, &config).analyze(window)
}

#[cfg(test)]
mod tests;
