mod run;

use anyhow::{Context, Result};
use budgetlens::AnalyticsConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    init_logging(args.iter().any(|a| a == "--verbose" || a == "-v"));

    let dirs = project_dirs()?;
    let config_path = dirs.config_dir().join("config.toml");
    let config = AnalyticsConfig::load(&config_path)
        .with_context(|| format!("Failed to load config: {}", config_path.display()))?;

    if args.len() < 2 {
        run::print_usage();
        return Ok(());
    }
    run::as_cli(&args, &config, &dirs.data_dir().join("ledger"))
}

/// Priority: RUST_LOG env var > --verbose flag > default (warn)
fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "budgetlens", "BudgetLens")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
}
