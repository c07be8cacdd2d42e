#![allow(clippy::unwrap_used)]

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_parse_date_valid() {
    assert_eq!(parse_date("2024-03-15").unwrap(), date(2024, 3, 15));
    assert_eq!(parse_date(" 2024-03-15 ").unwrap(), date(2024, 3, 15));
}

#[test]
fn test_parse_date_malformed_is_error() {
    assert!(matches!(parse_date("03/15/2024"), Err(Error::InvalidDate(_))));
    assert!(matches!(parse_date("2024-02-30"), Err(Error::InvalidDate(_))));
    assert!(matches!(parse_date(""), Err(Error::InvalidDate(_))));
}

#[test]
fn test_window_parse() {
    let w = DateWindow::parse("2024-03-01", "2024-03-31").unwrap();
    assert_eq!(w.start, date(2024, 3, 1));
    assert_eq!(w.end, date(2024, 3, 31));
}

#[test]
fn test_window_reversed_is_error() {
    let err = DateWindow::parse("2024-03-31", "2024-03-01").unwrap_err();
    assert!(matches!(err, Error::InvalidWindow { .. }));
}

#[test]
fn test_window_contains_is_inclusive() {
    let w = DateWindow::month_of(date(2024, 3, 10));
    assert!(w.contains(date(2024, 3, 1)));
    assert!(w.contains(date(2024, 3, 31)));
    assert!(!w.contains(date(2024, 4, 1)));
    assert!(!w.contains(date(2024, 2, 29)));
}

#[test]
fn test_month_of_leap_february() {
    let w = DateWindow::month_of(date(2024, 2, 10));
    assert_eq!(w.start, date(2024, 2, 1));
    assert_eq!(w.end, date(2024, 2, 29));
}

#[test]
fn test_parse_month() {
    let w = DateWindow::parse_month("2023-12").unwrap();
    assert_eq!(w.start, date(2023, 12, 1));
    assert_eq!(w.end, date(2023, 12, 31));
    assert_eq!(w.label(), "2023-12");
    assert!(matches!(DateWindow::parse_month("2023-13"), Err(Error::InvalidMonth(_))));
}

#[test]
fn test_months_back_crosses_year() {
    let w = DateWindow::month_of(date(2024, 1, 15));
    assert_eq!(w.months_back(1), DateWindow::month_of(date(2023, 12, 1)));
    assert_eq!(w.months_back(12), DateWindow::month_of(date(2023, 1, 1)));
}

#[test]
fn test_shift_months_clamps_day() {
    assert_eq!(shift_months(date(2024, 3, 31), -1), date(2024, 2, 29));
    assert_eq!(shift_months(date(2024, 1, 31), 1), date(2024, 2, 29));
    assert_eq!(shift_months(date(2024, 5, 15), 0), date(2024, 5, 15));
}

#[test]
fn test_months_between() {
    assert_eq!(months_between(date(2024, 1, 15), date(2024, 7, 15)), 6);
    assert_eq!(months_between(date(2024, 1, 15), date(2024, 7, 14)), 5);
    assert_eq!(months_between(date(2024, 1, 31), date(2024, 2, 28)), 0);
    assert_eq!(months_between(date(2024, 7, 15), date(2024, 1, 15)), -6);
    assert_eq!(months_between(date(2024, 1, 1), date(2024, 1, 1)), 0);
}
