//! Property-based tests for stay pricing.

use super::{price, PricingPolicy};
use crate::cabin::{Cabin, CabinDetails, CabinId};
use crate::date_range::DateRange;
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

// Rates in cents up to 10,000.00
fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // The total always follows the closed-form formula
    #[test]
    fn total_matches_formula(
        rate in rate_strategy(),
        addon_rate in rate_strategy(),
        nights in 1u32..365,
        guests in 1u32..20,
        addon in any::<bool>(),
    ) {
        let total = price(rate, nights, guests, addon, addon_rate).unwrap();
        let mut expected = rate * Decimal::from(nights);
        if addon {
            expected += addon_rate * Decimal::from(nights) * Decimal::from(guests);
        }
        prop_assert_eq!(total, expected);
    }

    // Adding breakfast never lowers the price
    #[test]
    fn addon_never_decreases_total(
        rate in rate_strategy(),
        addon_rate in rate_strategy(),
        nights in 1u32..365,
        guests in 1u32..20,
    ) {
        let without = price(rate, nights, guests, false, addon_rate).unwrap();
        let with = price(rate, nights, guests, true, addon_rate).unwrap();
        prop_assert!(with >= without);
    }

    // Without the add-on, guest count does not affect price
    #[test]
    fn guests_only_matter_with_addon(
        rate in rate_strategy(),
        nights in 1u32..365,
        g1 in 1u32..20,
        g2 in 1u32..20,
    ) {
        prop_assert_eq!(
            price(rate, nights, g1, false, Decimal::ONE).unwrap(),
            price(rate, nights, g2, false, Decimal::ONE).unwrap()
        );
    }

    // A quote's parts add up to the standalone price
    #[test]
    fn quote_agrees_with_price(
        rate in rate_strategy(),
        nights in 1i64..60,
        guests in 1u32..8,
        addon in any::<bool>(),
    ) {
        let cabin = Cabin::new(
            CabinId::new(1),
            CabinDetails::builder("Fir", "010", 8, rate).build().unwrap(),
        );
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let range = DateRange::new(start, start + Duration::days(nights)).unwrap();
        let policy = PricingPolicy::default();

        let quote = policy.quote(&cabin, &range, guests, addon).unwrap();
        prop_assert_eq!(quote.lodging + quote.addon, quote.total);
        prop_assert_eq!(
            quote.total,
            price(rate, range.nights(), guests, addon, policy.addon_rate()).unwrap()
        );
    }
}
