use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: i64,
    pub name: String,
    pub target_amount: Decimal,
    /// Running total of contributions, maintained by the caller.
    pub current_amount: Decimal,
    pub target_date: Option<NaiveDate>,
    pub priority: Priority,
    pub created_at: NaiveDate,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl SavingsGoal {
    pub fn new(id: i64, name: impl Into<String>, target_amount: Decimal, created_at: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            target_amount,
            current_amount: Decimal::ZERO,
            target_date: None,
            priority: Priority::Medium,
            created_at,
            is_completed: false,
            completed_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalContribution {
    pub id: i64,
    pub goal_id: i64,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
}

/// At most one record exists per (goal, threshold).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalMilestone {
    pub id: Option<i64>,
    pub goal_id: i64,
    pub milestone_percentage: Decimal,
    pub achieved_at: DateTime<Utc>,
    pub amount_at_achievement: Decimal,
}
