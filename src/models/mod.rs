mod budget;
mod category;
mod goal;
mod transaction;

pub use budget::{AlertType, BudgetAlertSetting, CategoryBudget};
pub use category::{Category, NEUTRAL_COLOR, UNCATEGORIZED, UNKNOWN_CATEGORY};
pub use goal::{GoalContribution, GoalMilestone, Priority, SavingsGoal};
pub use transaction::{Cadence, Flow, Schedule, Transaction};

#[cfg(test)]
mod tests;
