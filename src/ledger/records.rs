use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::models::{
    AlertType, BudgetAlertSetting, Cadence, Category, CategoryBudget, Flow, GoalContribution,
    GoalMilestone, Priority, SavingsGoal, Schedule, Transaction, NEUTRAL_COLOR,
};
use crate::period::parse_date;

/// Parse a money value, accepting `$`, thousands separators and
/// accounting-style parentheses for negatives.
pub(crate) fn parse_decimal(s: &str) -> Result<Decimal> {
    let cleaned = s
        .replace(['$', ','], "")
        .replace('(', "-")
        .replace(')', "")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        return Err(Error::InvalidAmount("empty value".to_string()));
    }
    Decimal::from_str(&cleaned).map_err(|_| Error::InvalidAmount(s.to_string()))
}

pub(crate) fn parse_bool(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => Err(Error::InvalidValue(format!("expected true/false, got '{s}'"))),
    }
}

/// An optional flag column; empty cells take `default`.
fn optional_bool(s: Option<String>, default: bool) -> Result<bool> {
    non_empty(s).map_or(Ok(default), |v| parse_bool(&v))
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

fn optional_date(s: Option<String>) -> Result<Option<NaiveDate>> {
    non_empty(s).map(|v| parse_date(&v)).transpose()
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s.trim()) {
        return Ok(ts.with_timezone(&Utc));
    }
    // Bare dates are taken as midnight UTC.
    let date = parse_date(s)?;
    Ok(date.and_time(NaiveTime::default()).and_utc())
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryRecord {
    id: i64,
    name: String,
    color: Option<String>,
}

impl CategoryRecord {
    pub(crate) fn into_model(self) -> Result<Category> {
        let color = non_empty(self.color).unwrap_or_else(|| NEUTRAL_COLOR.to_string());
        Ok(Category::new(self.id, self.name, color))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransactionRecord {
    id: i64,
    name: String,
    flow: String,
    amount: String,
    cadence: Option<String>,
    date: String,
    end_date: Option<String>,
    category_id: Option<i64>,
}

impl TransactionRecord {
    pub(crate) fn into_model(self) -> Result<Transaction> {
        let flow = Flow::parse(&self.flow)
            .ok_or_else(|| Error::InvalidValue(format!("unknown flow '{}'", self.flow)))?;
        let amount = parse_decimal(&self.amount)?;
        let date = parse_date(&self.date)?;

        let schedule = match non_empty(self.cadence) {
            Some(raw) => Schedule::Recurring {
                cadence: Cadence::parse(&raw)
                    .ok_or_else(|| Error::InvalidValue(format!("unknown cadence '{raw}'")))?,
                start: date,
                end: optional_date(self.end_date)?,
            },
            None => Schedule::OneTime { date },
        };

        Ok(Transaction {
            id: self.id,
            name: self.name,
            amount,
            flow,
            schedule,
            category_id: match flow {
                Flow::Expense => self.category_id,
                Flow::Income => None,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BudgetRecord {
    id: i64,
    category_id: i64,
    monthly_limit: String,
    alert_threshold: Option<String>,
    is_active: Option<String>,
}

impl BudgetRecord {
    pub(crate) fn into_model(self) -> Result<CategoryBudget> {
        let threshold = match non_empty(self.alert_threshold) {
            Some(raw) => parse_decimal(&raw)?,
            None => Decimal::new(8, 1),
        };
        Ok(CategoryBudget {
            id: self.id,
            category_id: self.category_id,
            monthly_limit: parse_decimal(&self.monthly_limit)?,
            alert_threshold: threshold,
            is_active: optional_bool(self.is_active, true)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoalRecord {
    id: i64,
    name: String,
    target_amount: String,
    current_amount: Option<String>,
    target_date: Option<String>,
    priority: Option<String>,
    created_at: String,
    is_completed: Option<String>,
    completed_at: Option<String>,
}

impl GoalRecord {
    pub(crate) fn into_model(self) -> Result<SavingsGoal> {
        let current_amount = match non_empty(self.current_amount) {
            Some(raw) => parse_decimal(&raw)?,
            None => Decimal::ZERO,
        };
        let priority = match non_empty(self.priority) {
            Some(raw) => Priority::parse(&raw)
                .ok_or_else(|| Error::InvalidValue(format!("unknown priority '{raw}'")))?,
            None => Priority::Medium,
        };
        let completed_at = non_empty(self.completed_at)
            .map(|v| parse_timestamp(&v))
            .transpose()?;
        Ok(SavingsGoal {
            id: self.id,
            name: self.name,
            target_amount: parse_decimal(&self.target_amount)?,
            current_amount,
            target_date: optional_date(self.target_date)?,
            priority,
            created_at: parse_date(&self.created_at)?,
            is_completed: optional_bool(self.is_completed, false)?,
            completed_at,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContributionRecord {
    id: i64,
    goal_id: i64,
    amount: String,
    date: String,
    description: Option<String>,
}

impl ContributionRecord {
    pub(crate) fn into_model(self) -> Result<GoalContribution> {
        Ok(GoalContribution {
            id: self.id,
            goal_id: self.goal_id,
            amount: parse_decimal(&self.amount)?,
            date: parse_date(&self.date)?,
            description: non_empty(self.description),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MilestoneRecord {
    id: Option<i64>,
    goal_id: i64,
    milestone_percentage: String,
    achieved_at: String,
    amount_at_achievement: String,
}

impl MilestoneRecord {
    pub(crate) fn into_model(self) -> Result<GoalMilestone> {
        Ok(GoalMilestone {
            id: self.id,
            goal_id: self.goal_id,
            milestone_percentage: parse_decimal(&self.milestone_percentage)?,
            achieved_at: parse_timestamp(&self.achieved_at)?,
            amount_at_achievement: parse_decimal(&self.amount_at_achievement)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AlertSettingRecord {
    alert_type: String,
    is_enabled: String,
}

impl AlertSettingRecord {
    pub(crate) fn into_model(self) -> Result<BudgetAlertSetting> {
        let alert_type = AlertType::parse(&self.alert_type)
            .ok_or_else(|| Error::InvalidValue(format!("unknown alert type '{}'", self.alert_type)))?;
        Ok(BudgetAlertSetting {
            alert_type,
            is_enabled: parse_bool(&self.is_enabled)?,
        })
    }
}
