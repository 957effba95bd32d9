//! Utility functions for CLI operations.
//!
//! Data directory resolution, configuration loading, database access and
//! the small parsing and formatting helpers shared by the commands.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, SystemTime};

use rust_decimal::Decimal;

use crate::error::CliError;
use rentbnb::database::DATABASE_FILE;
use rentbnb::{Actor, Config, ConfigBuilder, Database, DatabaseConfig, DateRange, GuestId};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // verbose only reaches the logger, set up in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Resolve the data directory: `--data-dir` (or `RENTBNB_DATA_DIR`), else
/// `~/.rentbnb`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => rentbnb::database::resolve_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. `rentbnb.local.yaml` / `rentbnb.yaml` found from the working directory
/// 3. `config.yaml` in the data directory
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;

    ConfigBuilder::new()
        .with_data_dir(&data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is
/// disabled by flag or configuration.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE);
    let autoinit_disabled = global.disable_autoinit || config.disable_autoinit.unwrap_or(false);

    if !db_path.exists() && autoinit_disabled {
        return Err(CliError::NoDataDirectory);
    }

    let busy_timeout = global
        .busy_timeout
        .map_or_else(|| config.lock_wait_seconds(), u64::from);
    let db_config =
        DatabaseConfig::new(db_path).with_busy_timeout(Duration::from_secs(busy_timeout));

    Database::open(db_config).map_err(CliError::from)
}

/// Parse `--from` / `--to` into a stay.
pub fn parse_range(from: &str, to: &str) -> Result<DateRange, CliError> {
    DateRange::parse(from, to).map_err(CliError::from)
}

/// Parse a money amount such as `125` or `99.50`.
pub fn parse_amount(field: &str, value: &str) -> Result<Decimal, CliError> {
    Decimal::from_str(value.trim())
        .map_err(|_| CliError::InvalidArguments(format!("{field}: '{value}' is not an amount")))
}

/// The actor for commands that accept `--guest G` or `--operator`.
pub fn actor(guest: Option<i64>, operator: bool) -> Result<Actor, CliError> {
    match (guest, operator) {
        (Some(guest), false) => Ok(Actor::Guest(GuestId::new(guest))),
        (None, true) => Ok(Actor::Operator),
        _ => Err(CliError::InvalidArguments(
            "specify exactly one of --guest or --operator".to_string(),
        )),
    }
}

/// Format an amount with the configured currency label.
pub fn format_money(amount: Decimal, config: &Config) -> String {
    format!("{amount} {}", config.currency())
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: SystemTime) -> String {
    use chrono::{DateTime, Utc};
    let dt: DateTime<Utc> = ts.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Print plan steps to stderr for `--dry-run`.
pub fn print_dry_run(plan: &rentbnb::OperationPlan, global: &GlobalOptions) {
    if global.quiet {
        return;
    }
    eprintln!("Dry run - would perform the following actions:");
    for (i, action) in plan.actions.iter().enumerate() {
        eprintln!("  {}. {}", i + 1, action.description());
    }
    if !plan.warnings.is_empty() {
        eprintln!("Warnings:");
        for warning in &plan.warnings {
            eprintln!("  - {warning}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_requires_exactly_one() {
        assert_eq!(actor(Some(4), false).unwrap(), Actor::Guest(GuestId::new(4)));
        assert_eq!(actor(None, true).unwrap(), Actor::Operator);
        assert!(actor(None, false).is_err());
        assert!(actor(Some(4), true).is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("price", " 99.50 ").unwrap(), Decimal::new(9950, 2));
        assert!(matches!(
            parse_amount("price", "cheap"),
            Err(CliError::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_parse_range_errors_are_invalid_input() {
        let err = parse_range("2030-01-05", "2030-01-01").unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_format_timestamp_epoch() {
        assert_eq!(format_timestamp(SystemTime::UNIX_EPOCH), "1970-01-01 00:00:00");
    }

    #[test]
    fn test_format_money_uses_currency() {
        let config = Config::default();
        assert_eq!(format_money(Decimal::new(12050, 2), &config), "120.50 USD");
    }
}
