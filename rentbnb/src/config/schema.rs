//! Configuration schema definitions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::DEFAULT_ADDON_RATE;

/// Currency label used when none is configured.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Lock wait used when none is configured, in seconds.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that partial files can be layered; the
/// accessor methods apply the built-in defaults.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rentbnb::config::{Config, PricingConfig};
///
/// let config = Config {
///     pricing: Some(PricingConfig {
///         addon_rate_per_guest_per_night: Some(Decimal::new(20, 0)),
///         currency: None,
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.addon_rate(), Decimal::new(20, 0));
/// assert_eq!(config.currency(), "USD");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Pricing settings.
    pub pricing: Option<PricingConfig>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Add-on (breakfast) rate per guest per night.
    #[must_use]
    pub fn addon_rate(&self) -> Decimal {
        self.pricing
            .as_ref()
            .and_then(|p| p.addon_rate_per_guest_per_night)
            .unwrap_or(DEFAULT_ADDON_RATE)
    }

    /// Currency label for printed amounts.
    #[must_use]
    pub fn currency(&self) -> &str {
        self.pricing
            .as_ref()
            .and_then(|p| p.currency.as_deref())
            .unwrap_or(DEFAULT_CURRENCY)
    }

    /// Lock wait in seconds.
    #[must_use]
    pub fn lock_wait_seconds(&self) -> u64 {
        self.maximum_lock_wait_seconds
            .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS)
    }
}

/// Pricing configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Breakfast price per guest per night.
    pub addon_rate_per_guest_per_night: Option<Decimal>,

    /// Currency label shown next to amounts. Amounts are never converted.
    pub currency: Option<String>,
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use rentbnb::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
    /// Human-readable table format.
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
            Self::Table => write!(f, "table"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "table" => Ok(Self::Table),
            _ => Err(format!("invalid output format: {s}")),
        }
    }
}
