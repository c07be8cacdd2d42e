#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use budgetlens::AnalyticsConfig;

use super::cli::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn ledger_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path();
    fs::write(p.join("categories.csv"), "id,name,color\n1,Groceries,#22c55e\n2,Dining,#f97316\n").unwrap();
    fs::write(
        p.join("transactions.csv"),
        "id,name,flow,amount,cadence,date,end_date,category_id\n\
         1,Market,expense,180,,2024-03-03,,1\n\
         2,Bistro,expense,60,,2024-02-10,,2\n\
         3,Salary,income,3000,monthly,2023-01-01,,\n",
    )
    .unwrap();
    fs::write(
        p.join("budgets.csv"),
        "id,category_id,monthly_limit,alert_threshold,is_active\n1,1,200,0.8,true\n",
    )
    .unwrap();
    fs::write(
        p.join("goals.csv"),
        "id,name,target_amount,current_amount,target_date,priority,created_at,is_completed,completed_at\n\
         1,Trip,1000,300,2024-12-31,high,2024-01-01,false,\n",
    )
    .unwrap();
    dir
}

fn run(list: &[&str], ledger: &Path) -> anyhow::Result<()> {
    as_cli(&args(list), &AnalyticsConfig::default(), ledger)
}

// ── parse_options ─────────────────────────────────────────────

#[test]
fn test_parse_options_flags_and_positional() {
    let opts = parse_options(&args(&["trends", "2024-03", "--json", "--ledger", "/tmp/ledger"])).unwrap();
    assert!(opts.json);
    assert_eq!(opts.ledger.as_deref(), Some(Path::new("/tmp/ledger")));
    assert_eq!(opts.positional, vec!["trends", "2024-03"]);
}

#[test]
fn test_parse_options_today() {
    let opts = parse_options(&args(&["goals", "--today", "2024-07-01"])).unwrap();
    assert_eq!(opts.today, chrono::NaiveDate::from_ymd_opt(2024, 7, 1));
}

#[test]
fn test_parse_options_verbose_is_ignored() {
    let opts = parse_options(&args(&["--verbose", "summary"])).unwrap();
    assert_eq!(opts.positional, vec!["summary"]);
}

#[test]
fn test_parse_options_missing_value() {
    assert!(parse_options(&args(&["summary", "--ledger"])).is_err());
    assert!(parse_options(&args(&["goals", "--today"])).is_err());
}

#[test]
fn test_parse_options_bad_today() {
    assert!(parse_options(&args(&["goals", "--today", "07/01/2024"])).is_err());
}

#[test]
fn test_parse_options_unknown_flag() {
    assert!(parse_options(&args(&["summary", "--bogus"])).is_err());
}

// ── helpers ───────────────────────────────────────────────────

#[test]
fn test_command_aliases() {
    assert_eq!(Command::parse("summary"), Some(Command::Summary));
    assert_eq!(Command::parse("b"), Some(Command::Budgets));
    assert_eq!(Command::parse("alerts"), Some(Command::Alerts));
    assert_eq!(Command::parse("import"), None);
}

#[test]
fn test_month_window_explicit() {
    let w = month_window(&args(&["2024-02"])).unwrap();
    assert_eq!(w.label(), "2024-02");
    assert_eq!(w.end, chrono::NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
}

#[test]
fn test_month_window_invalid() {
    assert!(month_window(&args(&["March"])).is_err());
}

#[test]
fn test_shellexpand_home() {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    assert_eq!(shellexpand("~/ledger"), format!("{home}/ledger"));
    assert_eq!(shellexpand("/abs/path"), "/abs/path");
}

// ── as_cli ────────────────────────────────────────────────────

#[test]
fn test_every_command_runs_against_ledger() {
    let dir = ledger_dir();
    let p = dir.path().to_str().unwrap();
    for cmd in ["summary", "budgets", "trends", "alerts"] {
        run(&["budgetlens", cmd, "2024-03", "--ledger", p], Path::new("/nonexistent")).unwrap();
        run(&["budgetlens", cmd, "2024-03", "--json", "--ledger", p], Path::new("/nonexistent")).unwrap();
    }
    run(&["budgetlens", "goals", "--today", "2024-07-01"], dir.path()).unwrap();
    run(&["budgetlens", "goals", "--json", "--today", "2024-07-01"], dir.path()).unwrap();
}

#[test]
fn test_help_and_version_skip_ledger() {
    let missing = Path::new("/nonexistent/ledger");
    run(&["budgetlens", "help"], missing).unwrap();
    run(&["budgetlens", "--version"], missing).unwrap();
}

#[test]
fn test_unknown_command_fails_before_loading() {
    let err = run(&["budgetlens", "import"], Path::new("/nonexistent")).unwrap_err();
    assert!(err.to_string().contains("Unknown command"));
}

#[test]
fn test_missing_ledger_is_error() {
    let err = run(&["budgetlens", "summary"], Path::new("/nonexistent/ledger")).unwrap_err();
    assert!(err.to_string().contains("Failed to load ledger"));
}
