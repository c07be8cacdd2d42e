mod cli;
mod format;

#[cfg(test)]
mod cli_tests;

pub(crate) use cli::{as_cli, print_usage};
