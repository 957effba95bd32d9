//! Shared fixtures for database unit tests.

use rust_decimal::Decimal;
use tempfile::tempdir;

use crate::cabin::{Cabin, CabinDetails, CabinId};
use crate::database::{Database, DatabaseConfig};
use crate::date_range::DateRange;
use crate::reservation::{GuestId, NewReservation, Reservation};

/// Guest used by [`insert_test_reservation`].
pub const TEST_GUEST: GuestId = GuestId::new(7);

/// Creates a database in a temporary directory that outlives the test.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let config = DatabaseConfig::new(dir.path().join("test.db"));
    let db = Database::open(config).unwrap();

    // Keep the directory alive for the lifetime of the connection
    std::mem::forget(dir);

    db
}

/// Adds a cabin priced at 100 per night.
///
/// # Panics
///
/// Panics if the cabin cannot be stored.
pub fn create_test_cabin(db: &mut Database, cabin_number: &str, capacity: u32) -> Cabin {
    let details = CabinDetails::builder(
        format!("Cabin {cabin_number}"),
        cabin_number,
        capacity,
        Decimal::new(100, 0),
    )
    .build()
    .unwrap();
    db.insert_cabin(&details).unwrap()
}

/// Books `cabin` for [`TEST_GUEST`] with two guests and no add-on.
///
/// # Panics
///
/// Panics if the dates are invalid or the booking is rejected.
pub fn insert_test_reservation(
    db: &mut Database,
    cabin: CabinId,
    start: &str,
    end: &str,
) -> Reservation {
    let range = DateRange::parse(start, end).unwrap();
    let booking = NewReservation::builder(cabin, TEST_GUEST, range)
        .guests(2)
        .total_price(Decimal::new(100, 0) * Decimal::from(range.nights()))
        .build()
        .unwrap();
    db.insert_reservation(&booking).unwrap()
}
