//! Property-based tests for availability checks.

use super::{conflicts, is_available, AvailabilityIndex};
use crate::cabin::CabinId;
use crate::date_range::DateRange;
use crate::reservation::{GuestId, NewReservation, Reservation, ReservationId, ReservationStatus};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

fn range_strategy() -> impl Strategy<Value = DateRange> {
    (0i64..120, 1i64..14).prop_map(|(offset, len)| {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset);
        DateRange::new(start, start + Duration::days(len)).unwrap()
    })
}

fn status_strategy() -> impl Strategy<Value = ReservationStatus> {
    prop::sample::select(ReservationStatus::ALL.to_vec())
}

fn reservations_strategy() -> impl Strategy<Value = Vec<Reservation>> {
    prop::collection::vec((1i64..4, range_strategy(), status_strategy()), 0..25).prop_map(
        |stays| {
            stays
                .into_iter()
                .enumerate()
                .map(|(i, (cabin, range, status))| {
                    NewReservation::builder(CabinId::new(cabin), GuestId::new(1), range)
                        .build()
                        .unwrap()
                        .into_reservation(ReservationId::new(i as i64 + 1))
                        .with_status(status)
                })
                .collect()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Availability is exactly "no blocking overlap on the same cabin"
    #[test]
    fn availability_matches_definition(
        existing in reservations_strategy(),
        cabin in 1i64..4,
        candidate in range_strategy(),
    ) {
        let cabin = CabinId::new(cabin);
        let expected = !existing.iter().any(|r| {
            r.cabin_id() == cabin && r.status().is_blocking() && r.range().overlaps(&candidate)
        });
        prop_assert_eq!(is_available(cabin, &candidate, &existing), expected);
        prop_assert_eq!(conflicts(cabin, &candidate, &existing).is_empty(), expected);
    }

    // The sorted index agrees with the linear scan
    #[test]
    fn index_agrees_with_scan(
        existing in reservations_strategy(),
        cabin in 1i64..4,
        candidate in range_strategy(),
    ) {
        let cabin = CabinId::new(cabin);
        let index = AvailabilityIndex::new(cabin, &existing);
        prop_assert_eq!(index.is_available(&candidate), is_available(cabin, &candidate, &existing));

        let mut from_index: Vec<_> = index.conflicts(&candidate).iter().map(|r| r.id()).collect();
        let mut from_scan = conflicts(cabin, &candidate, &existing);
        from_index.sort();
        from_scan.sort();
        prop_assert_eq!(from_index, from_scan);
    }

    // Reservations for other cabins never change the answer
    #[test]
    fn other_cabins_are_irrelevant(
        existing in reservations_strategy(),
        candidate in range_strategy(),
    ) {
        let cabin = CabinId::new(1);
        let same_cabin: Vec<Reservation> = existing
            .iter()
            .filter(|r| r.cabin_id() == cabin)
            .cloned()
            .collect();
        prop_assert_eq!(
            is_available(cabin, &candidate, &existing),
            is_available(cabin, &candidate, &same_cabin)
        );
    }
}
