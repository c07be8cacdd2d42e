use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Reverse;
use std::path::{Path, PathBuf};

use budgetlens::aggregate::{percentage, round_money, Aggregator, CategoryTotal, TransactionStats};
use budgetlens::alerts::{generate_alerts, generate_insights, Alert, Insight, Severity, Tone};
use budgetlens::budget::{compute_budget_progress_with, summarize_portfolio, BudgetProgress, PortfolioSummary};
use budgetlens::goals::{check_new_milestones, compute_goal_progress_with, verify_ledger, GoalProgress, LedgerCheck};
use budgetlens::models::{Flow, Priority, SavingsGoal};
use budgetlens::period::{parse_date, DateWindow};
use budgetlens::trends::{AverageComparison, Trend, TrendAnalyzer, TrendReport};
use budgetlens::{AnalyticsConfig, Ledger};

use super::format;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    Summary,
    Budgets,
    Goals,
    Trends,
    Alerts,
}

impl Command {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s {
            "summary" | "s" => Some(Self::Summary),
            "budgets" | "b" => Some(Self::Budgets),
            "goals" | "g" => Some(Self::Goals),
            "trends" | "t" => Some(Self::Trends),
            "alerts" | "a" => Some(Self::Alerts),
            _ => None,
        }
    }
}

/// Flags accepted by every command; anything else is positional.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Options {
    pub ledger: Option<PathBuf>,
    pub today: Option<NaiveDate>,
    pub json: bool,
    pub positional: Vec<String>,
}

pub(crate) fn parse_options(args: &[String]) -> Result<Options> {
    let mut opts = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--ledger" | "-l" => {
                let dir = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--ledger requires a directory"))?;
                opts.ledger = Some(PathBuf::from(shellexpand(dir)));
            }
            "--today" => {
                let day = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--today requires a date (YYYY-MM-DD)"))?;
                opts.today = Some(parse_date(day)?);
            }
            "--json" => opts.json = true,
            // Consumed by logging setup in main
            "--verbose" | "-v" => {}
            flag if flag.starts_with("--") => anyhow::bail!("Unknown flag: {flag}"),
            _ => opts.positional.push(arg.clone()),
        }
    }
    Ok(opts)
}

pub(crate) fn as_cli(args: &[String], config: &AnalyticsConfig, default_ledger: &Path) -> Result<()> {
    match args[1].as_str() {
        "--help" | "-h" | "help" => {
            print_usage();
            return Ok(());
        }
        "--version" | "-V" | "version" => {
            println!("budgetlens {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    let opts = parse_options(&args[1..])?;
    let Some((name, rest)) = opts.positional.split_first() else {
        print_usage();
        return Ok(());
    };
    let Some(command) = Command::parse(name) else {
        print_usage();
        anyhow::bail!("Unknown command: {name}");
    };

    let ledger_dir = opts.ledger.as_deref().unwrap_or(default_ledger);
    let ledger = Ledger::load(ledger_dir)
        .with_context(|| format!("Failed to load ledger: {}", ledger_dir.display()))?;

    let session = Session {
        ledger: &ledger,
        config,
        json: opts.json,
    };
    match command {
        Command::Summary => session.summary(&month_window(rest)?),
        Command::Budgets => session.budgets(&month_window(rest)?),
        Command::Goals => session.goals(opts.today.unwrap_or_else(local_today)),
        Command::Trends => session.trends(&month_window(rest)?),
        Command::Alerts => session.alerts(&month_window(rest)?),
    }
}

pub(crate) fn print_usage() {
    println!("BudgetLens: personal finance analytics over a CSV ledger");
    println!();
    println!("Usage: budgetlens <command> [options]");
    println!();
    println!("Commands:");
    println!("  summary [YYYY-MM]             Income, expenses and spending by category");
    println!("  budgets [YYYY-MM]             Budget progress and portfolio summary");
    println!("  goals                         Savings goal progress and milestones");
    println!("    --today <YYYY-MM-DD>        Reference date (default: today)");
    println!("  trends [YYYY-MM]              Month-over-month trends per category");
    println!("  alerts [YYYY-MM]              Alerts and insights");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Options:");
    println!("  --ledger <dir>                Ledger directory (default: platform data dir)");
    println!("  --json                        Print JSON instead of text");
    println!("  --verbose, -v                 Debug logging to stderr");
}

/// The month named by the first positional argument, or the current month.
pub(crate) fn month_window(args: &[String]) -> Result<DateWindow> {
    let month = args
        .first()
        .cloned()
        .unwrap_or_else(|| chrono::Local::now().format("%Y-%m").to_string());
    Ok(DateWindow::parse_month(&month)?)
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MonthSummary {
    window: DateWindow,
    income: Decimal,
    expenses: Decimal,
    net: Decimal,
    savings_rate: Decimal,
    categories: Vec<CategoryTotal>,
    stats: Vec<TransactionStats>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BudgetReport {
    window: DateWindow,
    budgets: Vec<BudgetProgress>,
    portfolio: PortfolioSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GoalReport {
    progress: GoalProgress,
    priority: Priority,
    pending_milestones: Vec<Decimal>,
    ledger: LedgerCheck,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AlertReport {
    window: DateWindow,
    alerts: Vec<Alert>,
    insights: Vec<Insight>,
}

struct Session<'a> {
    ledger: &'a Ledger,
    config: &'a AnalyticsConfig,
    json: bool,
}

impl Session<'_> {
    fn aggregator(&self) -> Aggregator<'_> {
        Aggregator::new(&self.ledger.categories, self.config)
    }

    fn budget_report(&self, window: &DateWindow) -> BudgetReport {
        let budgets = compute_budget_progress_with(
            &self.aggregator(),
            &self.ledger.budgets,
            &self.ledger.transactions,
            window,
        );
        let portfolio = summarize_portfolio(&budgets);
        BudgetReport {
            window: *window,
            budgets,
            portfolio,
        }
    }

    fn trend_report(&self, window: &DateWindow) -> TrendReport {
        TrendAnalyzer::new(&self.ledger.categories, &self.ledger.transactions, self.config).analyze(window)
    }

    fn summary(&self, window: &DateWindow) -> Result<()> {
        let aggregator = self.aggregator();
        let txns = &self.ledger.transactions;
        let income = aggregator.total(txns, Flow::Income, window);
        let expenses = aggregator.total(txns, Flow::Expense, window);
        let net = income - expenses;
        let summary = MonthSummary {
            window: *window,
            income,
            expenses,
            net,
            savings_rate: round_money(percentage(net, income)),
            categories: aggregator.by_category(txns, window),
            stats: aggregator.transaction_stats(txns, window),
        };

        if self.json {
            return print_json(&summary);
        }

        println!("BudgetLens {}", window.label());
        println!("{}", format::rule(40));
        println!("  Income:     {}", format::amount(summary.income));
        println!("  Expenses:   {}", format::amount(summary.expenses));
        println!("  Net:        {}", format::amount(summary.net));
        println!("  Savings:    {}", format::percent(summary.savings_rate));

        if !summary.categories.is_empty() {
            println!();
            println!("Spending by Category:");
            for total in &summary.categories {
                let count = summary
                    .stats
                    .iter()
                    .find(|s| s.category_id == total.category_id)
                    .map_or(0, |s| s.count);
                println!(
                    "  {:<24} {:>12}  {count} txns",
                    format::truncate(&total.category_name, 24),
                    format::amount(total.value),
                );
            }
        }
        Ok(())
    }

    fn budgets(&self, window: &DateWindow) -> Result<()> {
        let report = self.budget_report(window);
        if self.json {
            return print_json(&report);
        }

        println!("Budgets {}", window.label());
        if report.budgets.is_empty() {
            println!("No active budgets");
            return Ok(());
        }
        println!("{:<20} {:>12} {:>12} {:>8}", "Category", "Spent", "Limit", "Used");
        println!("{}", format::rule(70));
        for p in &report.budgets {
            let flag = if p.is_over_budget {
                "over"
            } else if p.should_alert {
                "near"
            } else {
                ""
            };
            println!(
                "{:<20} {:>12} {:>12} {:>8} {} {flag}",
                format::truncate(&p.category_name, 20),
                format::amount(p.spent),
                format::amount(p.monthly_limit),
                format::percent(p.progress_ratio * Decimal::ONE_HUNDRED),
                format::bar(p.progress_percentage),
            );
        }

        let s = &report.portfolio;
        println!();
        println!(
            "Portfolio: {} of {} spent ({}), {} remaining",
            format::amount(s.total_spent),
            format::amount(s.total_budget),
            format::percent(s.overall_percentage),
            format::amount(s.total_remaining),
        );
        println!(
            "  {} tracked, {} over budget, {} near limit",
            s.tracked_count, s.over_budget_count, s.near_limit_count
        );
        Ok(())
    }

    fn goals(&self, today: NaiveDate) -> Result<()> {
        let mut goals: Vec<&SavingsGoal> = self.ledger.goals.iter().collect();
        goals.sort_by_key(|g| (g.is_completed, Reverse(g.priority)));

        let reports: Vec<GoalReport> = goals
            .into_iter()
            .map(|goal| {
                let milestones = self.ledger.milestones_for(goal.id);
                let contributions = self.ledger.contributions_for(goal.id);
                GoalReport {
                    progress: compute_goal_progress_with(self.config, goal, &milestones, &contributions, today),
                    priority: goal.priority,
                    pending_milestones: check_new_milestones(goal, &milestones),
                    ledger: verify_ledger(goal, &contributions),
                }
            })
            .collect();

        if self.json {
            return print_json(&reports);
        }
        if reports.is_empty() {
            println!("No savings goals");
            return Ok(());
        }

        for r in &reports {
            let p = &r.progress;
            println!("{} ({})", p.name, r.priority);
            println!(
                "  {} {} of {} ({})",
                format::bar(p.progress_percentage),
                format::amount(p.current_amount),
                format::amount(p.target_amount),
                format::percent(p.progress_percentage),
            );
            match (p.monthly_target_contribution, p.months_remaining) {
                (Some(monthly), Some(months)) => println!(
                    "  {} per month for {months} month(s), {}",
                    format::amount(monthly),
                    if p.is_on_track { "on track" } else { "behind" },
                ),
                _ if p.remaining_amount.is_zero() => println!("  Complete"),
                _ => println!("  {} to go, no target date", format::amount(p.remaining_amount)),
            }
            if let Some(next) = p.next_milestone {
                println!("  Next milestone: {}", format::percent(next * Decimal::ONE_HUNDRED));
            }
            if !r.pending_milestones.is_empty() {
                let pending: Vec<String> = r
                    .pending_milestones
                    .iter()
                    .map(|t| format::percent(*t * Decimal::ONE_HUNDRED))
                    .collect();
                println!("  Unrecorded milestones: {}", pending.join(", "));
            }
            if !r.ledger.is_consistent {
                println!(
                    "  Ledger mismatch: recorded {}, contributions sum to {}",
                    format::amount(r.ledger.recorded),
                    format::amount(r.ledger.contributed),
                );
            }
            println!();
        }
        Ok(())
    }

    fn trends(&self, window: &DateWindow) -> Result<()> {
        let report = self.trend_report(window);
        if self.json {
            return print_json(&report);
        }

        let o = &report.overall;
        println!("Trends {}", window.label());
        println!("{}", format::rule(40));
        println!(
            "  Expenses:   {} ({} {})",
            format::amount(o.current_expenses),
            trend_arrow(o.expense_change.trend),
            format::signed_percent(o.expense_change.percentage),
        );
        println!(
            "  Income:     {} ({} {})",
            format::amount(o.current_income),
            trend_arrow(o.income_change.trend),
            format::signed_percent(o.income_change.percentage),
        );
        println!(
            "  3-mo avg:   {} ({})",
            format::amount(o.three_month_average),
            comparison_word(o.average_comparison),
        );
        println!("  6-mo avg:   {}", format::amount(o.six_month_average));

        if report.categories.is_empty() {
            return Ok(());
        }
        println!();
        println!(
            "{:<4} {:<20} {:>12} {:>12} {:>9} {:>12}",
            "Rank", "Category", "Current", "Previous", "Change", "3-mo avg"
        );
        println!("{}", format::rule(74));
        for c in &report.categories {
            let rank = c.rank.map_or_else(|| "-".to_string(), |r| r.to_string());
            let moved = match c.ranking_change {
                Some(d) if d > 0 => format!(" ↑{d}"),
                Some(d) if d < 0 => format!(" ↓{}", -d),
                _ => String::new(),
            };
            println!(
                "{:<4} {:<20} {:>12} {:>12} {:>9} {:>12}{moved}",
                rank,
                format::truncate(&c.category_name, 20),
                format::amount(c.current),
                format::amount(c.previous),
                format::signed_percent(c.change.percentage),
                format::amount(c.three_month_average),
            );
        }
        Ok(())
    }

    fn alerts(&self, window: &DateWindow) -> Result<()> {
        let budgets = self.budget_report(window);
        let goal_milestones: Vec<(SavingsGoal, Vec<Decimal>)> = self
            .ledger
            .goals
            .iter()
            .map(|g| (g.clone(), check_new_milestones(g, &self.ledger.milestones)))
            .filter(|(_, thresholds)| !thresholds.is_empty())
            .collect();

        let report = AlertReport {
            window: *window,
            alerts: generate_alerts(
                &budgets.budgets,
                &budgets.portfolio,
                &goal_milestones,
                &self.ledger.alert_settings,
                self.config,
            ),
            insights: generate_insights(&self.trend_report(window), self.config),
        };

        if self.json {
            return print_json(&report);
        }

        println!("Alerts {}", window.label());
        println!("{}", format::rule(40));
        if report.alerts.is_empty() {
            println!("  Nothing needs attention");
        }
        for a in &report.alerts {
            println!("  {} {}", severity_tag(a.severity), a.title);
            println!("      {}", a.message);
        }

        if !report.insights.is_empty() {
            println!();
            println!("Insights");
            println!("{}", format::rule(40));
            for i in &report.insights {
                println!("  {} {}", tone_mark(i.tone), i.title);
                println!("      {}", i.message);
            }
        }
        Ok(())
    }
}

fn trend_arrow(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "↑",
        Trend::Down => "↓",
        Trend::Stable => "→",
    }
}

fn comparison_word(cmp: AverageComparison) -> &'static str {
    match cmp {
        AverageComparison::Above => "above average",
        AverageComparison::Below => "below average",
        AverageComparison::Normal => "normal",
    }
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Danger => "[!!]",
        Severity::Warning => "[! ]",
        Severity::Success => "[ok]",
    }
}

fn tone_mark(tone: Tone) -> &'static str {
    match tone {
        Tone::Positive => "+",
        Tone::Neutral => "·",
        Tone::Negative => "-",
    }
}
