//! Property-based tests for `DateRange`.

use super::DateRange;
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

// Dates within a few years of a fixed epoch keep the arithmetic in range.
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..2000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset)
    })
}

fn range_strategy() -> impl Strategy<Value = DateRange> {
    (date_strategy(), 1i64..60)
        .prop_map(|(start, len)| DateRange::new(start, start + Duration::days(len)).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Construction succeeds exactly when end is after start
    #[test]
    fn new_accepts_iff_end_after_start(a in date_strategy(), b in date_strategy()) {
        prop_assert_eq!(DateRange::new(a, b).is_ok(), a < b);
    }

    // Night count equals the day difference
    #[test]
    fn nights_match_day_difference(start in date_strategy(), len in 1i64..400) {
        let range = DateRange::new(start, start + Duration::days(len)).unwrap();
        prop_assert_eq!(i64::from(range.nights()), len);
    }

    // Overlap is symmetric and reflexive
    #[test]
    fn overlap_is_symmetric(a in range_strategy(), b in range_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        prop_assert!(a.overlaps(&a));
    }

    // Two ranges overlap iff some night lies in both
    #[test]
    fn overlap_matches_shared_night(a in range_strategy(), b in range_strategy()) {
        let shared = a.start().iter_days()
            .take_while(|d| *d < a.end())
            .any(|d| b.contains(d));
        prop_assert_eq!(a.overlaps(&b), shared);
    }

    // A range ending where another starts never overlaps it
    #[test]
    fn back_to_back_ranges_never_overlap(start in date_strategy(), l1 in 1i64..30, l2 in 1i64..30) {
        let mid = start + Duration::days(l1);
        let first = DateRange::new(start, mid).unwrap();
        let second = DateRange::new(mid, mid + Duration::days(l2)).unwrap();
        prop_assert!(!first.overlaps(&second));
    }

    // Display round-trips through parse
    #[test]
    fn display_parses_back(range in range_strategy()) {
        let text = range.to_string();
        let (start, end) = text.split_once("..").unwrap();
        prop_assert_eq!(DateRange::parse(start, end).unwrap(), range);
    }
}
