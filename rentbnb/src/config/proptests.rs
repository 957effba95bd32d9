//! Property-based tests for configuration merging and validation.

use super::{Config, ConfigMerger, ConfigValidator, OutputFormat, PricingConfig};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn pricing_strategy() -> impl Strategy<Value = Option<PricingConfig>> {
    prop::option::of(
        (
            prop::option::of((0i64..100_000).prop_map(|c| Decimal::new(c, 2))),
            prop::option::of("[A-Z]{3}"),
        )
            .prop_map(|(rate, currency)| PricingConfig {
                addon_rate_per_guest_per_night: rate,
                currency,
            }),
    )
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        pricing_strategy(),
        prop::option::of(any::<bool>()),
        prop::option::of(1u64..600),
        prop::option::of(prop::sample::select(vec![
            OutputFormat::Json,
            OutputFormat::Csv,
            OutputFormat::Tsv,
            OutputFormat::Table,
        ])),
    )
        .prop_map(
            |(pricing, disable_autoinit, maximum_lock_wait_seconds, output_format)| Config {
                pricing,
                disable_autoinit,
                maximum_lock_wait_seconds,
                output_format,
            },
        )
}

proptest! {
    // Merging into a default config yields the source unchanged
    #[test]
    fn merge_into_default_is_identity(config in config_strategy()) {
        let mut target = Config::default();
        ConfigMerger::merge_into(&mut target, &config);
        prop_assert_eq!(target, config);
    }

    // Merging a config with itself changes nothing
    #[test]
    fn merge_is_idempotent(config in config_strategy()) {
        let mut target = config.clone();
        ConfigMerger::merge_into(&mut target, &config);
        prop_assert_eq!(target, config);
    }

    // A set field in the higher source always wins
    #[test]
    fn higher_source_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);
        if high.maximum_lock_wait_seconds.is_some() {
            prop_assert_eq!(merged.maximum_lock_wait_seconds, high.maximum_lock_wait_seconds);
        } else {
            prop_assert_eq!(merged.maximum_lock_wait_seconds, low.maximum_lock_wait_seconds);
        }
        if high.output_format.is_some() {
            prop_assert_eq!(merged.output_format, high.output_format);
        }
    }

    // Generated configs are all valid
    #[test]
    fn generated_configs_validate(config in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&config).is_ok());
    }
}
