//! Budget progress per category and a portfolio-level summary.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;

use crate::aggregate::{percentage, Aggregator};
use crate::config::AnalyticsConfig;
use crate::models::{Category, CategoryBudget, Transaction, NEUTRAL_COLOR, UNKNOWN_CATEGORY};
use crate::period::DateWindow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub budget_id: i64,
    pub category_id: i64,
    pub category_name: String,
    pub color: String,
    pub monthly_limit: Decimal,
    pub alert_threshold: Decimal,
    pub spent: Decimal,
    /// Negative once over budget.
    pub remaining_budget: Decimal,
    /// Unclamped `spent / limit`; zero when the limit is not positive.
    pub progress_ratio: Decimal,
    /// `min(100, ratio * 100)` for display.
    pub progress_percentage: Decimal,
    pub is_over_budget: bool,
    /// Independent of `is_over_budget`: over-budget categories alert too.
    pub should_alert: bool,
}

impl BudgetProgress {
    /// Alert-worthy but still within the limit.
    pub fn is_near_limit(&self) -> bool {
        self.should_alert && !self.is_over_budget
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub tracked_count: usize,
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub total_remaining: Decimal,
    pub overall_ratio: Decimal,
    pub overall_percentage: Decimal,
    pub over_budget_count: usize,
    pub near_limit_count: usize,
}

/// Progress for a single budget given what was spent in its category.
pub fn evaluate_budget(budget: &CategoryBudget, category: Option<&Category>, spent: Decimal) -> BudgetProgress {
    let limit = budget.monthly_limit;
    let progress_ratio = if limit > Decimal::ZERO {
        spent / limit
    } else {
        Decimal::ZERO
    };
    let progress_percentage = (progress_ratio * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED);

    let (category_name, color) = match category {
        Some(cat) => (cat.name.clone(), cat.color.clone()),
        None => (UNKNOWN_CATEGORY.to_string(), NEUTRAL_COLOR.to_string()),
    };

    BudgetProgress {
        budget_id: budget.id,
        category_id: budget.category_id,
        category_name,
        color,
        monthly_limit: limit,
        alert_threshold: budget.alert_threshold,
        spent,
        remaining_budget: limit - spent,
        progress_ratio,
        progress_percentage,
        is_over_budget: spent > limit,
        should_alert: progress_ratio >= budget.alert_threshold,
    }
}

/// Keep the first active budget per category; later duplicates are skipped.
pub fn active_budgets(budgets: &[CategoryBudget]) -> Vec<&CategoryBudget> {
    let mut seen = HashSet::new();
    budgets
        .iter()
        .filter(|b| b.is_active)
        .filter(|b| {
            let first = seen.insert(b.category_id);
            if !first {
                tracing::warn!(
                    budget_id = b.id,
                    category_id = b.category_id,
                    "Ignoring duplicate active budget for category"
                );
            }
            first
        })
        .collect()
}

/// Progress for every active budget over `window`, highest utilization first.
pub fn compute_budget_progress_with(
    aggregator: &Aggregator<'_>,
    budgets: &[CategoryBudget],
    transactions: &[Transaction],
    window: &DateWindow,
) -> Vec<BudgetProgress> {
    let totals = aggregator.by_category(transactions, window);
    let categories = aggregator.categories();

    let mut progress: Vec<BudgetProgress> = active_budgets(budgets)
        .into_iter()
        .map(|budget| {
            let spent = totals
                .iter()
                .find(|t| t.category_id == Some(budget.category_id))
                .map_or(Decimal::ZERO, |t| t.value);
            let category = Category::find_by_id(categories, budget.category_id);
            if category.is_none() {
                tracing::warn!(
                    budget_id = budget.id,
                    category_id = budget.category_id,
                    "Budget references a missing category"
                );
            }
            evaluate_budget(budget, category, spent)
        })
        .collect();

    progress.sort_by(|a, b| b.progress_percentage.cmp(&a.progress_percentage));
    progress
}

pub fn compute_budget_progress(
    budgets: &[CategoryBudget],
    categories: &[Category],
    transactions: &[Transaction],
    window: &DateWindow,
) -> Vec<BudgetProgress> {
    let aggregator = Aggregator::new(categories, &AnalyticsConfig::default());
    compute_budget_progress_with(&aggregator, budgets, transactions, window)
}

pub fn summarize_portfolio(progress: &[BudgetProgress]) -> PortfolioSummary {
    let total_budget: Decimal = progress.iter().map(|p| p.monthly_limit).sum();
    let total_spent: Decimal = progress.iter().map(|p| p.spent).sum();
    let overall_ratio = if total_budget > Decimal::ZERO {
        total_spent / total_budget
    } else {
        Decimal::ZERO
    };

    PortfolioSummary {
        tracked_count: progress.len(),
        total_budget,
        total_spent,
        total_remaining: total_budget - total_spent,
        overall_ratio,
        overall_percentage: percentage(total_spent, total_budget),
        over_budget_count: progress.iter().filter(|p| p.is_over_budget).count(),
        near_limit_count: progress.iter().filter(|p| p.is_near_limit()).count(),
    }
}
