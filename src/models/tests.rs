#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Transaction ───────────────────────────────────────────────

#[test]
fn test_income_constructors_drop_category() {
    let txn = Transaction::one_time_income(1, "Salary", dec!(3000), date(2024, 1, 31));
    assert!(txn.is_income());
    assert!(!txn.is_expense());
    assert!(txn.category_id.is_none());

    let txn = Transaction::recurring_income(2, "Rent in", dec!(800), Cadence::Monthly, date(2024, 1, 1), None);
    assert!(txn.is_income());
    assert!(txn.is_recurring());
    assert!(txn.category_id.is_none());
}

#[test]
fn test_expense_constructors_keep_category() {
    let txn = Transaction::one_time_expense(1, "Coffee", dec!(4.50), date(2024, 1, 15), Some(3));
    assert!(txn.is_expense());
    assert!(!txn.is_recurring());
    assert_eq!(txn.category_id, Some(3));

    let txn = Transaction::recurring_expense(
        2,
        "Gym",
        dec!(30),
        Cadence::Monthly,
        date(2024, 1, 1),
        Some(date(2024, 12, 31)),
        Some(4),
    );
    assert!(txn.is_recurring());
    assert_eq!(
        txn.schedule,
        Schedule::Recurring {
            cadence: Cadence::Monthly,
            start: date(2024, 1, 1),
            end: Some(date(2024, 12, 31)),
        }
    );
}

// ── Cadence / Flow ────────────────────────────────────────────

#[test]
fn test_cadence_parse() {
    assert_eq!(Cadence::parse("weekly"), Some(Cadence::Weekly));
    assert_eq!(Cadence::parse("MONTHLY"), Some(Cadence::Monthly));
    assert_eq!(Cadence::parse(" yearly "), Some(Cadence::Yearly));
    assert_eq!(Cadence::parse("annual"), Some(Cadence::Yearly));
    assert_eq!(Cadence::parse("daily"), None);
}

#[test]
fn test_cadence_roundtrip() {
    for c in [Cadence::Weekly, Cadence::Monthly, Cadence::Yearly] {
        assert_eq!(Cadence::parse(c.as_str()), Some(c), "Roundtrip failed for {c}");
    }
}

#[test]
fn test_flow_parse() {
    assert_eq!(Flow::parse("Income"), Some(Flow::Income));
    assert_eq!(Flow::parse("expense"), Some(Flow::Expense));
    assert_eq!(Flow::parse("transfer"), None);
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_find() {
    let cats = vec![Category::new(1, "Food", "#f00"), Category::new(2, "Rent", "#0f0")];
    assert_eq!(Category::find_by_id(&cats, 2).unwrap().name, "Rent");
    assert!(Category::find_by_id(&cats, 9).is_none());
}

#[test]
fn test_category_display() {
    let cat = Category::new(1, "Groceries", "#fff");
    assert_eq!(format!("{cat}"), "Groceries");
}

// ── Budget / alert settings ───────────────────────────────────

#[test]
fn test_budget_new_is_active() {
    let budget = CategoryBudget::new(1, 5, dec!(200), dec!(0.8));
    assert!(budget.is_active);
    assert_eq!(budget.category_id, 5);
    assert_eq!(budget.monthly_limit, dec!(200));
}

#[test]
fn test_alert_type_roundtrip() {
    for t in AlertType::all() {
        assert_eq!(AlertType::parse(t.as_str()), Some(*t));
    }
    assert_eq!(AlertType::parse("nope"), None);
}

#[test]
fn test_alert_setting_defaults_to_enabled() {
    let settings = vec![BudgetAlertSetting {
        alert_type: AlertType::BudgetWarning,
        is_enabled: false,
    }];
    assert!(!BudgetAlertSetting::is_enabled(&settings, AlertType::BudgetWarning));
    assert!(BudgetAlertSetting::is_enabled(&settings, AlertType::BudgetExceeded));
    assert!(BudgetAlertSetting::is_enabled(&[], AlertType::GoalMilestone));
}

// ── Goals ─────────────────────────────────────────────────────

#[test]
fn test_goal_new_defaults() {
    let goal = SavingsGoal::new(1, "Trip", dec!(1000), date(2024, 1, 1));
    assert_eq!(goal.current_amount, dec!(0));
    assert_eq!(goal.priority, Priority::Medium);
    assert!(!goal.is_completed);
    assert!(goal.completed_at.is_none());
    assert!(goal.target_date.is_none());
}

#[test]
fn test_priority_parse_and_order() {
    assert_eq!(Priority::parse("HIGH"), Some(Priority::High));
    assert_eq!(Priority::parse("low"), Some(Priority::Low));
    assert_eq!(Priority::parse(" Medium "), Some(Priority::Medium));
    assert_eq!(Priority::parse("whatever"), None);
    assert!(Priority::High > Priority::Low);
}
