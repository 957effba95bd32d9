//! Environment variable handling for configuration overrides.

use std::env;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};

/// Overrides the add-on rate per guest per night.
pub const ENV_ADDON_RATE: &str = "RENTBNB_ADDON_RATE";
/// Overrides the currency label.
pub const ENV_CURRENCY: &str = "RENTBNB_CURRENCY";
/// Overrides the lock wait.
pub const ENV_LOCK_WAIT: &str = "RENTBNB_MAXIMUM_LOCK_WAIT_SECONDS";
/// Disables database auto-initialization.
pub const ENV_DISABLE_AUTOINIT: &str = "RENTBNB_DISABLE_AUTOINIT";
/// Overrides the list output format.
pub const ENV_OUTPUT_FORMAT: &str = "RENTBNB_OUTPUT_FORMAT";

/// Handles `RENTBNB_*` environment variable overrides.
///
/// # Examples
///
/// ```no_run
/// use rentbnb::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the variable if a value cannot
    /// be parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(rate) = env::var(ENV_ADDON_RATE) {
            let rate = Decimal::from_str(rate.trim()).map_err(|_| Error::Validation {
                field: ENV_ADDON_RATE.into(),
                message: format!("Invalid decimal amount: '{rate}'"),
            })?;
            config
                .pricing
                .get_or_insert_with(Default::default)
                .addon_rate_per_guest_per_night = Some(rate);
        }

        if let Ok(currency) = env::var(ENV_CURRENCY) {
            config.pricing.get_or_insert_with(Default::default).currency = Some(currency);
        }

        if let Ok(seconds) = env::var(ENV_LOCK_WAIT) {
            config.maximum_lock_wait_seconds =
                Some(seconds.trim().parse().map_err(|_| Error::Validation {
                    field: ENV_LOCK_WAIT.into(),
                    message: "Must be a positive integer".into(),
                })?);
        }

        if let Ok(val) = env::var(ENV_DISABLE_AUTOINIT) {
            config.disable_autoinit = Some(Self::parse_bool(ENV_DISABLE_AUTOINIT, &val)?);
        }

        if let Ok(format) = env::var(ENV_OUTPUT_FORMAT) {
            config.output_format = Some(OutputFormat::from_str(&format).map_err(|message| {
                Error::Validation {
                    field: ENV_OUTPUT_FORMAT.into(),
                    message,
                }
            })?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
