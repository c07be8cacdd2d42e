//! BudgetLens analytics engine
//!
//! Pure computations that turn raw finance records into:
//! - monthly aggregates per category (recurring items normalized by cadence)
//! - budget progress, overage and alert-worthiness, plus a portfolio summary
//! - savings goal progress, projections, on-track status and milestones
//! - historical trends: month-over-month change, rolling averages, ranking
//!   and seasonality
//! - severity-ranked alerts and generation-ordered insights
//!
//! Every function takes immutable snapshots and returns new values, so the
//! engine is safe to call from any number of threads.

pub mod aggregate;
pub mod alerts;
pub mod budget;
pub mod config;
pub mod error;
pub mod goals;
pub mod ledger;
pub mod models;
pub mod period;
pub mod recurrence;
pub mod trends;

pub use aggregate::{aggregate_by_category, total_for_window, Aggregator, CategoryTotal, TransactionStats};
pub use alerts::{generate_alerts, generate_insights, Alert, Insight, Severity};
pub use budget::{compute_budget_progress, summarize_portfolio, BudgetProgress, PortfolioSummary};
pub use config::AnalyticsConfig;
pub use error::{Error, Result};
pub use goals::{
    apply_contribution, check_new_milestones, compute_goal_progress, verify_ledger, GoalProgress,
    GoalUpdate, MILESTONE_THRESHOLDS,
};
pub use ledger::Ledger;
pub use period::DateWindow;
pub use recurrence::{is_active_in_window, monthly_equivalent};
pub use trends::{analyze_trends, TrendAnalyzer, TrendReport};
