//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, PricingConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use rentbnb::config::{Config, ConfigMerger};
///
/// let low = Config { maximum_lock_wait_seconds: Some(2), ..Default::default() };
/// let high = Config { maximum_lock_wait_seconds: Some(8), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.maximum_lock_wait_seconds, Some(8));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources, given from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge `source` into `target`; fields set in `source` win.
    ///
    /// The pricing section is merged field by field, so one file may set the
    /// rate and another the currency.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_pricing) = source.pricing {
            target.pricing = Some(match &target.pricing {
                Some(target_pricing) => Self::merge_pricing(target_pricing, source_pricing),
                None => source_pricing.clone(),
            });
        }
    }

    fn merge_pricing(target: &PricingConfig, source: &PricingConfig) -> PricingConfig {
        PricingConfig {
            addon_rate_per_guest_per_night: source
                .addon_rate_per_guest_per_night
                .or(target.addon_rate_per_guest_per_night),
            currency: source.currency.clone().or_else(|| target.currency.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use rust_decimal::Decimal;
    use std::path::PathBuf;

    fn source(precedence: u8, config: Config) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from(format!("/config/{precedence}.yaml")),
            precedence,
            config,
        }
    }

    #[test]
    fn test_merge_empty() {
        assert_eq!(ConfigMerger::merge(Vec::new()), Config::default());
    }

    #[test]
    fn test_higher_precedence_wins() {
        let low = Config {
            output_format: Some(OutputFormat::Csv),
            disable_autoinit: Some(true),
            ..Default::default()
        };
        let high = Config {
            output_format: Some(OutputFormat::Json),
            ..Default::default()
        };

        let merged = ConfigMerger::merge(vec![source(1, low), source(2, high)]);
        assert_eq!(merged.output_format, Some(OutputFormat::Json));
        assert_eq!(merged.disable_autoinit, Some(true));
    }

    #[test]
    fn test_pricing_merges_field_by_field() {
        let low = Config {
            pricing: Some(PricingConfig {
                addon_rate_per_guest_per_night: Some(Decimal::new(10, 0)),
                currency: Some("EUR".into()),
            }),
            ..Default::default()
        };
        let high = Config {
            pricing: Some(PricingConfig {
                addon_rate_per_guest_per_night: Some(Decimal::new(12, 0)),
                currency: None,
            }),
            ..Default::default()
        };

        let merged = ConfigMerger::merge(vec![source(1, low), source(3, high)]);
        assert_eq!(merged.addon_rate(), Decimal::new(12, 0));
        assert_eq!(merged.currency(), "EUR");
    }
}
