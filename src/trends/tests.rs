#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::models::Cadence;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn categories() -> Vec<Category> {
    vec![
        Category::new(1, "Groceries", "#22c55e"),
        Category::new(2, "Dining", "#f97316"),
        Category::new(3, "Travel", "#3b82f6"),
    ]
}

fn expense(id: i64, amount: Decimal, on: NaiveDate, category_id: i64) -> Transaction {
    Transaction::one_time_expense(id, "Spend", amount, on, Some(category_id))
}

fn history() -> Vec<Transaction> {
    vec![
        // Groceries
        expense(1, dec!(70), date(2024, 3, 2), 1),
        expense(2, dec!(50), date(2024, 3, 20), 1),
        expense(3, dec!(100), date(2024, 2, 10), 1),
        expense(4, dec!(100), date(2024, 1, 10), 1),
        expense(5, dec!(100), date(2023, 12, 10), 1),
        expense(6, dec!(100), date(2023, 3, 15), 1),
        // Dining
        expense(7, dec!(50), date(2024, 3, 5), 2),
        expense(8, dec!(200), date(2024, 2, 5), 2),
        // Travel
        expense(9, dec!(600), date(2024, 1, 20), 3),
        Transaction::recurring_income(10, "Salary", dec!(3000), Cadence::Monthly, date(2023, 1, 1), None),
    ]
}

fn report() -> TrendReport {
    analyze_trends(&categories(), &history(), &DateWindow::month_of(date(2024, 3, 1)))
}

// ── change / comparisons ──────────────────────────────────────

#[test]
fn test_change_up() {
    let c = change(dec!(120), dec!(100), dec!(5));
    assert_eq!(c.amount, dec!(20));
    assert_eq!(c.percentage, dec!(20.0));
    assert_eq!(c.trend, Trend::Up);
}

#[test]
fn test_change_down_and_stable() {
    assert_eq!(change(dec!(80), dec!(100), dec!(5)).trend, Trend::Down);
    assert_eq!(change(dec!(104.99), dec!(100), dec!(5)).trend, Trend::Stable);
    assert_eq!(change(dec!(95), dec!(100), dec!(5)).trend, Trend::Down);
}

#[test]
fn test_change_from_zero_previous() {
    let c = change(dec!(50), dec!(0), dec!(5));
    assert_eq!(c.amount, dec!(50));
    assert_eq!(c.percentage, dec!(0));
    assert_eq!(c.trend, Trend::Stable);
}

#[test]
fn test_compare_to_average_band() {
    let band = dec!(0.1);
    assert_eq!(compare_to_average(dec!(111), dec!(100), band), AverageComparison::Above);
    assert_eq!(compare_to_average(dec!(110), dec!(100), band), AverageComparison::Normal);
    assert_eq!(compare_to_average(dec!(90), dec!(100), band), AverageComparison::Normal);
    assert_eq!(compare_to_average(dec!(89), dec!(100), band), AverageComparison::Below);
    assert_eq!(compare_to_average(dec!(0), dec!(0), band), AverageComparison::Normal);
}

#[test]
fn test_seasonal() {
    let s = seasonal(dec!(130), dec!(100), dec!(25));
    assert_eq!(s.deviation, dec!(30));
    assert!(!s.is_typical);
    assert!(seasonal(dec!(76), dec!(100), dec!(25)).is_typical);
    let none = seasonal(dec!(50), dec!(0), dec!(25));
    assert_eq!(none.deviation, dec!(0));
    assert!(none.is_typical);
}

#[test]
fn test_rank_by_value_skips_zero() {
    let totals = vec![
        CategoryTotal { category_id: Some(1), category_name: "A".into(), value: dec!(10), color: String::new() },
        CategoryTotal { category_id: Some(2), category_name: "B".into(), value: dec!(0), color: String::new() },
        CategoryTotal { category_id: Some(3), category_name: "C".into(), value: dec!(30), color: String::new() },
    ];
    let ranks = rank_by_value(&totals);
    assert_eq!(ranks.get(&Some(3)), Some(&1));
    assert_eq!(ranks.get(&Some(1)), Some(&2));
    assert!(!ranks.contains_key(&Some(2)));
}

// ── analyze ───────────────────────────────────────────────────

#[test]
fn test_category_month_over_month() {
    let r = report();
    let groceries = r.category(1).unwrap();
    assert_eq!(groceries.current, dec!(120));
    assert_eq!(groceries.previous, dec!(100));
    assert_eq!(groceries.change.amount, dec!(20));
    assert_eq!(groceries.change.percentage, dec!(20));
    assert_eq!(groceries.change.trend, Trend::Up);

    let dining = r.category(2).unwrap();
    assert_eq!(dining.change.percentage, dec!(-75));
    assert_eq!(dining.change.trend, Trend::Down);
}

#[test]
fn test_rolling_averages() {
    let r = report();
    let groceries = r.category(1).unwrap();
    assert_eq!(groceries.three_month_average, dec!(100));
    assert_eq!(groceries.six_month_average, dec!(50));
    assert_eq!(groceries.average_comparison, AverageComparison::Above);

    let travel = r.category(3).unwrap();
    assert_eq!(travel.three_month_average, dec!(200));
    assert_eq!(travel.average_comparison, AverageComparison::Below);
}

#[test]
fn test_ranking_change() {
    let r = report();
    let groceries = r.category(1).unwrap();
    assert_eq!(groceries.rank, Some(1));
    assert_eq!(groceries.previous_rank, Some(2));
    assert_eq!(groceries.ranking_change, Some(1));

    let dining = r.category(2).unwrap();
    assert_eq!(dining.rank, Some(2));
    assert_eq!(dining.ranking_change, Some(-1));

    let travel = r.category(3).unwrap();
    assert_eq!(travel.rank, None);
    assert_eq!(travel.ranking_change, None);
}

#[test]
fn test_report_ordered_by_rank() {
    let ids: Vec<Option<i64>> = report().categories.iter().map(|c| c.category_id).collect();
    assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
}

#[test]
fn test_seasonal_against_last_year() {
    let r = report();
    let groceries = r.category(1).unwrap();
    assert_eq!(groceries.seasonal.same_month_last_year, dec!(100));
    assert_eq!(groceries.seasonal.deviation, dec!(20));
    assert!(groceries.seasonal.is_typical);

    let dining = r.category(2).unwrap();
    assert_eq!(dining.seasonal.deviation, dec!(0));
}

#[test]
fn test_transaction_stats_in_trend() {
    let r = report();
    let groceries = r.category(1).unwrap();
    assert_eq!(groceries.transaction_count, 2);
    assert_eq!(groceries.average_transaction, dec!(60));
    assert_eq!(groceries.largest_transaction, dec!(70));
    assert_eq!(r.category(3).unwrap().transaction_count, 0);
}

#[test]
fn test_overall_trend() {
    let r = report();
    assert_eq!(r.overall.current_expenses, dec!(170));
    assert_eq!(r.overall.previous_expenses, dec!(300));
    assert_eq!(r.overall.expense_change.amount, dec!(-130));
    assert_eq!(r.overall.expense_change.percentage, dec!(-43.33));
    assert_eq!(r.overall.expense_change.trend, Trend::Down);
    assert_eq!(r.overall.current_income, dec!(3000));
    assert_eq!(r.overall.income_change.trend, Trend::Stable);
    // (300 + 700 + 100) / 3
    assert_eq!(r.overall.three_month_average, dec!(366.67));
}

#[test]
fn test_empty_history() {
    let r = analyze_trends(&categories(), &[], &DateWindow::month_of(date(2024, 3, 1)));
    assert!(r.categories.is_empty());
    assert_eq!(r.overall.current_expenses, dec!(0));
    assert_eq!(r.overall.expense_change.trend, Trend::Stable);
}
