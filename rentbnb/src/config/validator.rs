//! Configuration validation.

use rust_decimal::Decimal;

use crate::config::schema::{Config, PricingConfig};
use crate::error::{Error, Result};

/// Longest accepted currency label.
const MAX_CURRENCY_LEN: usize = 8;

/// Validates merged or single-file configuration.
///
/// # Examples
///
/// ```
/// use rentbnb::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a negative add-on rate, a blank or
    /// overlong currency label, or a zero lock wait.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref pricing) = config.pricing {
            Self::validate_pricing(pricing)?;
        }

        if config.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::Validation {
                field: "maximum_lock_wait_seconds".into(),
                message: "Timeout must be greater than 0".into(),
            });
        }

        Ok(())
    }

    fn validate_pricing(pricing: &PricingConfig) -> Result<()> {
        if let Some(rate) = pricing.addon_rate_per_guest_per_night {
            if rate < Decimal::ZERO {
                return Err(Error::Validation {
                    field: "pricing.addon_rate_per_guest_per_night".into(),
                    message: format!("Rate cannot be negative (got {rate})"),
                });
            }
        }

        if let Some(ref currency) = pricing.currency {
            let trimmed = currency.trim();
            if trimmed.is_empty() {
                return Err(Error::Validation {
                    field: "pricing.currency".into(),
                    message: "Currency cannot be empty".into(),
                });
            }
            if trimmed.chars().count() > MAX_CURRENCY_LEN
                || trimmed.chars().any(char::is_whitespace)
            {
                return Err(Error::Validation {
                    field: "pricing.currency".into(),
                    message: format!(
                        "Currency must be a single word of at most {MAX_CURRENCY_LEN} characters"
                    ),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_pricing(rate: Option<Decimal>, currency: Option<&str>) -> Config {
        Config {
            pricing: Some(PricingConfig {
                addon_rate_per_guest_per_night: rate,
                currency: currency.map(String::from),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_empty_config() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let config = with_pricing(Some(Decimal::new(-5, 0)), None);
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field.contains("addon_rate")));
    }

    #[test]
    fn test_zero_rate_allowed() {
        assert!(ConfigValidator::validate(&with_pricing(Some(Decimal::ZERO), None)).is_ok());
    }

    #[test]
    fn test_currency_rules() {
        assert!(ConfigValidator::validate(&with_pricing(None, Some("EUR"))).is_ok());
        assert!(ConfigValidator::validate(&with_pricing(None, Some("  "))).is_err());
        assert!(ConfigValidator::validate(&with_pricing(None, Some("US D"))).is_err());
        assert!(ConfigValidator::validate(&with_pricing(None, Some("DOLLARSSS"))).is_err());
    }

    #[test]
    fn test_zero_lock_wait_rejected() {
        let config = Config {
            maximum_lock_wait_seconds: Some(0),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
