//! Read-only snapshot of a finance ledger stored as a directory of CSV files.
//!
//! | file                | columns                                                                 |
//! |---------------------|-------------------------------------------------------------------------|
//! | `categories.csv`    | id, name, color                                                         |
//! | `transactions.csv`  | id, name, flow, amount, cadence, date, end_date, category_id            |
//! | `budgets.csv`       | id, category_id, monthly_limit, alert_threshold, is_active              |
//! | `goals.csv`         | id, name, target_amount, current_amount, target_date, priority, created_at, is_completed, completed_at |
//! | `contributions.csv` | id, goal_id, amount, date, description                                  |
//! | `milestones.csv`    | id, goal_id, milestone_percentage, achieved_at, amount_at_achievement   |
//! | `alert_settings.csv`| alert_type, is_enabled                                                  |
//!
//! A transaction with an empty `cadence` is one-time on `date`; otherwise it
//! recurs from `date` until `end_date` (or forever). Missing files load as
//! empty collections.

mod records;

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{
    BudgetAlertSetting, Category, CategoryBudget, GoalContribution, GoalMilestone, SavingsGoal,
    Transaction,
};

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<CategoryBudget>,
    pub goals: Vec<SavingsGoal>,
    pub contributions: Vec<GoalContribution>,
    pub milestones: Vec<GoalMilestone>,
    pub alert_settings: Vec<BudgetAlertSetting>,
}

impl Ledger {
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Ledger directory not found: {}", dir.display()),
            )));
        }

        let ledger = Self {
            categories: load_file(dir, "categories.csv", records::CategoryRecord::into_model)?,
            transactions: load_file(dir, "transactions.csv", records::TransactionRecord::into_model)?,
            budgets: load_file(dir, "budgets.csv", records::BudgetRecord::into_model)?,
            goals: load_file(dir, "goals.csv", records::GoalRecord::into_model)?,
            contributions: load_file(dir, "contributions.csv", records::ContributionRecord::into_model)?,
            milestones: load_file(dir, "milestones.csv", records::MilestoneRecord::into_model)?,
            alert_settings: load_file(dir, "alert_settings.csv", records::AlertSettingRecord::into_model)?,
        };

        tracing::info!(
            dir = %dir.display(),
            categories = ledger.categories.len(),
            transactions = ledger.transactions.len(),
            recurring = ledger.transactions.iter().filter(|t| t.is_recurring()).count(),
            budgets = ledger.budgets.len(),
            goals = ledger.goals.len(),
            "Loaded ledger snapshot"
        );
        Ok(ledger)
    }

    pub fn contributions_for(&self, goal_id: i64) -> Vec<GoalContribution> {
        self.contributions
            .iter()
            .filter(|c| c.goal_id == goal_id)
            .cloned()
            .collect()
    }

    pub fn milestones_for(&self, goal_id: i64) -> Vec<GoalMilestone> {
        self.milestones
            .iter()
            .filter(|m| m.goal_id == goal_id)
            .cloned()
            .collect()
    }
}

/// Deserialize every row of `file` and convert it, tagging failures with the
/// file name and 1-based data row.
fn load_file<R, T>(dir: &Path, file: &str, convert: fn(R) -> Result<T>) -> Result<Vec<T>>
where
    R: DeserializeOwned,
{
    let path = dir.join(file);
    if !path.exists() {
        tracing::debug!(file, "Ledger file missing, treating as empty");
        return Ok(Vec::new());
    }

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(&path)?;

    let mut out = Vec::new();
    for (i, result) in rdr.deserialize::<R>().enumerate() {
        let row = i + 1;
        let record = result.map_err(|e| Error::InvalidRecord {
            file: file.to_string(),
            row,
            message: e.to_string(),
        })?;
        let model = convert(record).map_err(|e| Error::InvalidRecord {
            file: file.to_string(),
            row,
            message: e.to_string(),
        })?;
        out.push(model);
    }
    Ok(out)
}
