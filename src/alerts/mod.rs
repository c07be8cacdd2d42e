//! Alerts (severity-ranked, actionable) and insights (commentary, in
//! generation order) derived from tracker and analyzer output.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::{percentage, round_money};
use crate::budget::{BudgetProgress, PortfolioSummary};
use crate::config::AnalyticsConfig;
use crate::models::{AlertType, BudgetAlertSetting, SavingsGoal};
use crate::trends::{Trend, TrendReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Self::Success => 1,
            Self::Warning => 2,
            Self::Danger => 3,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub alert_type: AlertType,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub category_id: Option<i64>,
    pub goal_id: Option<i64>,
    /// Percent of the limit used (unclamped), or the milestone reached.
    pub utilization: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    SpendingChange,
    IncomeChange,
    CategorySwing,
    SavingsRate,
    DominantCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub kind: InsightKind,
    pub tone: Tone,
    pub title: String,
    pub message: String,
    pub category_id: Option<i64>,
    pub value: Decimal,
}

/// Danger before warning before success, then highest utilization first.
pub fn sort_alerts(alerts: &mut [Alert]) {
    alerts.sort_by(|a, b| {
        b.severity
            .priority()
            .cmp(&a.severity.priority())
            .then(b.utilization.cmp(&a.utilization))
    });
}

pub fn budget_alerts(progress: &[BudgetProgress]) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = progress
        .iter()
        .filter_map(|p| {
            let used = round_money(p.progress_ratio * Decimal::ONE_HUNDRED);
            if p.is_over_budget {
                let overage = round_money(p.spent - p.monthly_limit);
                Some(Alert {
                    alert_type: AlertType::BudgetExceeded,
                    severity: Severity::Danger,
                    title: format!("{} is over budget", p.category_name),
                    message: format!(
                        "You have spent {:.2} of {:.2}, {:.2} over the limit.",
                        p.spent, p.monthly_limit, overage
                    ),
                    category_id: Some(p.category_id),
                    goal_id: None,
                    utilization: used,
                })
            } else if p.should_alert {
                Some(Alert {
                    alert_type: AlertType::BudgetWarning,
                    severity: Severity::Warning,
                    title: format!("{} is nearing its limit", p.category_name),
                    message: format!(
                        "{used:.0}% of the {:.2} budget used, {:.2} left.",
                        p.monthly_limit, p.remaining_budget
                    ),
                    category_id: Some(p.category_id),
                    goal_id: None,
                    utilization: used,
                })
            } else {
                None
            }
        })
        .collect();
    sort_alerts(&mut alerts);
    alerts
}

/// One success alert per newly crossed milestone threshold.
pub fn goal_alerts(goal: &SavingsGoal, new_thresholds: &[Decimal]) -> Vec<Alert> {
    new_thresholds
        .iter()
        .map(|&threshold| {
            let pct = round_money(threshold * Decimal::ONE_HUNDRED);
            let (title, message) = if threshold >= Decimal::ONE {
                (
                    format!("Goal reached: {}", goal.name),
                    format!("You saved the full {:.2}. Congratulations!", goal.target_amount),
                )
            } else {
                (
                    format!("{} is {pct:.0}% funded", goal.name),
                    format!(
                        "{:.2} saved toward {:.2}. Keep going!",
                        goal.current_amount, goal.target_amount
                    ),
                )
            };
            Alert {
                alert_type: AlertType::GoalMilestone,
                severity: Severity::Success,
                title,
                message,
                category_id: None,
                goal_id: Some(goal.id),
                utilization: pct,
            }
        })
        .collect()
}

pub fn portfolio_alert(summary: &PortfolioSummary, config: &AnalyticsConfig) -> Option<Alert> {
    if summary.overall_ratio <= config.portfolio_warning_ratio {
        return None;
    }
    let used = round_money(summary.overall_percentage);
    let title = if summary.overall_ratio > Decimal::ONE {
        "Overall budget exceeded"
    } else {
        "Overall budget almost used"
    };
    Some(Alert {
        alert_type: AlertType::PortfolioWarning,
        severity: Severity::Warning,
        title: title.to_string(),
        message: format!(
            "{used:.0}% of your total budget ({:.2} of {:.2}) is spent across {} categories.",
            summary.total_spent, summary.total_budget, summary.tracked_count
        ),
        category_id: None,
        goal_id: None,
        utilization: used,
    })
}

/// Every enabled alert, severity-sorted.
pub fn generate_alerts(
    progress: &[BudgetProgress],
    summary: &PortfolioSummary,
    goal_milestones: &[(SavingsGoal, Vec<Decimal>)],
    settings: &[BudgetAlertSetting],
    config: &AnalyticsConfig,
) -> Vec<Alert> {
    let mut alerts = budget_alerts(progress);
    alerts.extend(portfolio_alert(summary, config));
    for (goal, thresholds) in goal_milestones {
        alerts.extend(goal_alerts(goal, thresholds));
    }
    alerts.retain(|a| BudgetAlertSetting::is_enabled(settings, a.alert_type));
    sort_alerts(&mut alerts);
    alerts
}

fn direction_word(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "up",
        Trend::Down => "down",
        Trend::Stable => "flat",
    }
}

/// Commentary for the analyzed window, capped to `config.max_insights` in
/// generation order.
pub fn generate_insights(report: &TrendReport, config: &AnalyticsConfig) -> Vec<Insight> {
    let mut insights = Vec::new();
    let overall = &report.overall;

    let spend = overall.expense_change;
    if spend.percentage.abs() > config.overall_change_pct {
        insights.push(Insight {
            kind: InsightKind::SpendingChange,
            tone: if spend.amount > Decimal::ZERO { Tone::Negative } else { Tone::Positive },
            title: format!("Spending {} {:.0}%", direction_word(spend.trend), spend.percentage.abs()),
            message: format!(
                "Total expenses are {:.2} compared with {:.2} last month.",
                overall.current_expenses, overall.previous_expenses
            ),
            category_id: None,
            value: spend.percentage,
        });
    }

    let income = overall.income_change;
    if income.percentage.abs() > config.overall_change_pct {
        insights.push(Insight {
            kind: InsightKind::IncomeChange,
            tone: if income.amount > Decimal::ZERO { Tone::Positive } else { Tone::Negative },
            title: format!("Income {} {:.0}%", direction_word(income.trend), income.percentage.abs()),
            message: format!(
                "Income is {:.2} compared with {:.2} last month.",
                overall.current_income, overall.previous_income
            ),
            category_id: None,
            value: income.percentage,
        });
    }

    for cat in &report.categories {
        let c = cat.change;
        if c.percentage.abs() > config.category_change_pct && cat.current > config.category_noise_floor {
            insights.push(Insight {
                kind: InsightKind::CategorySwing,
                tone: if c.amount > Decimal::ZERO { Tone::Negative } else { Tone::Positive },
                title: format!("{} {} {:.0}%", cat.category_name, direction_word(c.trend), c.percentage.abs()),
                message: format!(
                    "{:.2} this month versus {:.2} last month.",
                    cat.current, cat.previous
                ),
                category_id: cat.category_id,
                value: c.percentage,
            });
        }
    }

    if let Some(insight) = savings_rate_insight(overall.current_income, overall.current_expenses, config) {
        insights.push(insight);
    }

    if overall.current_expenses > Decimal::ZERO {
        let dominant = report.categories.iter().find(|c| {
            percentage(c.current, overall.current_expenses) > config.dominant_category_pct
        });
        if let Some(cat) = dominant {
            let share = round_money(percentage(cat.current, overall.current_expenses));
            insights.push(Insight {
                kind: InsightKind::DominantCategory,
                tone: Tone::Neutral,
                title: format!("{} dominates spending", cat.category_name),
                message: format!("{share:.0}% of this month's expenses went to {}.", cat.category_name),
                category_id: cat.category_id,
                value: share,
            });
        }
    }

    insights.truncate(config.max_insights);
    insights
}

fn savings_rate_insight(income: Decimal, expenses: Decimal, config: &AnalyticsConfig) -> Option<Insight> {
    if income <= Decimal::ZERO {
        return (expenses > Decimal::ZERO).then(|| Insight {
            kind: InsightKind::SavingsRate,
            tone: Tone::Negative,
            title: "Spending without income".to_string(),
            message: format!("{expenses:.2} spent with no income recorded this month."),
            category_id: None,
            value: Decimal::ZERO,
        });
    }

    let rate = round_money(percentage(income - expenses, income));
    let (tone, title, message) = if rate < Decimal::ZERO {
        (
            Tone::Negative,
            "Expenses exceed income".to_string(),
            format!("You spent {:.2} more than you earned.", expenses - income),
        )
    } else if rate < config.savings_rate_low_pct {
        (
            Tone::Negative,
            format!("Low savings rate: {rate:.0}%"),
            format!(
                "Less than {:.0}% of income is left after expenses.",
                config.savings_rate_low_pct
            ),
        )
    } else if rate > config.savings_rate_good_pct {
        (
            Tone::Positive,
            format!("Great savings rate: {rate:.0}%"),
            format!("You kept {:.2} of {:.2} earned.", income - expenses, income),
        )
    } else {
        return None;
    };

    Some(Insight {
        kind: InsightKind::SavingsRate,
        tone,
        title,
        message,
        category_id: None,
        value: rate,
    })
}
