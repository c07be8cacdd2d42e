//! Savings goal progress, projections and milestone detection.
//!
//! The tracker never mutates a goal. [`apply_contribution`] returns a
//! [`GoalUpdate`] describing what the caller must persist in one step: the
//! new running total, the milestone records and the completion flag.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::{percentage, round_money};
use crate::config::AnalyticsConfig;
use crate::models::{GoalContribution, GoalMilestone, SavingsGoal};
use crate::period::{months_between, shift_months};

/// Fixed milestone checkpoints, ascending.
pub const MILESTONE_THRESHOLDS: [Decimal; 4] = [
    Decimal::from_parts(25, 0, 0, false, 2),
    Decimal::from_parts(50, 0, 0, false, 2),
    Decimal::from_parts(75, 0, 0, false, 2),
    Decimal::from_parts(100, 0, 0, false, 2),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal_id: i64,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    /// `min(100, current / target * 100)`.
    pub progress_percentage: Decimal,
    pub remaining_amount: Decimal,
    pub months_remaining: Option<i64>,
    pub monthly_target_contribution: Option<Decimal>,
    /// Progress expected by now given elapsed time since creation.
    pub expected_progress: Option<Decimal>,
    pub is_on_track: bool,
    pub achieved_milestones: Vec<Decimal>,
    pub next_milestone: Option<Decimal>,
    /// Trailing window, newest first.
    pub recent_contributions: Vec<GoalContribution>,
}

/// Everything the caller must persist after a contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub goal: SavingsGoal,
    pub new_milestones: Vec<GoalMilestone>,
    /// True only for the contribution that first reaches the target.
    pub completed_now: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerCheck {
    pub goal_id: i64,
    pub recorded: Decimal,
    pub contributed: Decimal,
    pub is_consistent: bool,
}

fn progress_ratio(goal: &SavingsGoal) -> Decimal {
    if goal.target_amount > Decimal::ZERO {
        goal.current_amount / goal.target_amount
    } else {
        Decimal::ZERO
    }
}

fn is_recorded(existing: &[GoalMilestone], goal_id: i64, threshold: Decimal) -> bool {
    existing
        .iter()
        .any(|m| m.goal_id == goal_id && m.milestone_percentage == threshold)
}

/// Thresholds the goal has reached that have no milestone record yet,
/// ascending. Several may be reported at once after a lump sum.
pub fn check_new_milestones(goal: &SavingsGoal, existing: &[GoalMilestone]) -> Vec<Decimal> {
    let ratio = progress_ratio(goal);
    MILESTONE_THRESHOLDS
        .iter()
        .copied()
        .filter(|&threshold| ratio >= threshold && !is_recorded(existing, goal.id, threshold))
        .collect()
}

pub fn compute_goal_progress(
    goal: &SavingsGoal,
    milestones: &[GoalMilestone],
    contributions: &[GoalContribution],
    today: NaiveDate,
) -> GoalProgress {
    compute_goal_progress_with(&AnalyticsConfig::default(), goal, milestones, contributions, today)
}

pub fn compute_goal_progress_with(
    config: &AnalyticsConfig,
    goal: &SavingsGoal,
    milestones: &[GoalMilestone],
    contributions: &[GoalContribution],
    today: NaiveDate,
) -> GoalProgress {
    let progress_percentage = (progress_ratio(goal) * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED);
    let remaining_amount = (goal.target_amount - goal.current_amount).max(Decimal::ZERO);

    let mut months_remaining = None;
    let mut monthly_target_contribution = None;
    let mut expected_progress = None;
    let mut is_on_track = true;

    if let (Some(target_date), false) = (goal.target_date, goal.is_completed) {
        let months = months_between(today, target_date).max(1);
        months_remaining = Some(months);
        monthly_target_contribution = Some(round_money(remaining_amount / Decimal::from(months)));

        let total = months_between(goal.created_at, target_date).max(0);
        let elapsed = months_between(goal.created_at, today).max(0);
        let expected = percentage(Decimal::from(elapsed), Decimal::from(total));
        is_on_track = progress_percentage >= expected * config.on_track_tolerance;
        expected_progress = Some(expected);
    }

    let achieved_milestones: Vec<Decimal> = MILESTONE_THRESHOLDS
        .iter()
        .copied()
        .filter(|&t| is_recorded(milestones, goal.id, t))
        .collect();
    let next_milestone = MILESTONE_THRESHOLDS
        .iter()
        .copied()
        .find(|t| !achieved_milestones.contains(t));

    let cutoff = shift_months(today, -(config.recent_contribution_months as i32));
    let mut recent_contributions: Vec<GoalContribution> = contributions
        .iter()
        .filter(|c| c.goal_id == goal.id && c.date >= cutoff)
        .cloned()
        .collect();
    recent_contributions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    GoalProgress {
        goal_id: goal.id,
        name: goal.name.clone(),
        target_amount: goal.target_amount,
        current_amount: goal.current_amount,
        progress_percentage,
        remaining_amount,
        months_remaining,
        monthly_target_contribution,
        expected_progress,
        is_on_track,
        achieved_milestones,
        next_milestone,
        recent_contributions,
    }
}

/// Apply `contribution` to `goal` and report the side effects to persist.
pub fn apply_contribution(
    goal: &SavingsGoal,
    existing: &[GoalMilestone],
    contribution: &GoalContribution,
    now: DateTime<Utc>,
) -> GoalUpdate {
    let mut updated = goal.clone();
    updated.current_amount += contribution.amount;

    let new_milestones: Vec<GoalMilestone> = check_new_milestones(&updated, existing)
        .into_iter()
        .map(|threshold| GoalMilestone {
            id: None,
            goal_id: goal.id,
            milestone_percentage: threshold,
            achieved_at: now,
            amount_at_achievement: updated.current_amount,
        })
        .collect();

    let reached = updated.target_amount > Decimal::ZERO && updated.current_amount >= updated.target_amount;
    let completed_now = reached && !goal.is_completed;
    if completed_now {
        updated.is_completed = true;
        updated.completed_at = Some(now);
        tracing::debug!(goal_id = goal.id, "Goal completed");
    }

    GoalUpdate {
        goal: updated,
        new_milestones,
        completed_now,
    }
}

/// Compare the goal's running total with the sum of its contributions.
pub fn verify_ledger(goal: &SavingsGoal, contributions: &[GoalContribution]) -> LedgerCheck {
    let contributed: Decimal = contributions
        .iter()
        .filter(|c| c.goal_id == goal.id)
        .map(|c| c.amount)
        .sum();
    let is_consistent = contributed == goal.current_amount;
    if !is_consistent {
        tracing::warn!(
            goal_id = goal.id,
            recorded = %goal.current_amount,
            contributed = %contributed,
            "Goal total does not match its contributions"
        );
    }
    LedgerCheck {
        goal_id: goal.id,
        recorded: goal.current_amount,
        contributed,
        is_consistent,
    }
}
