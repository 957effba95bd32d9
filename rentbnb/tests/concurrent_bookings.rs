//! Concurrency tests: independent connections racing on one database file.
//!
//! Each thread opens its own `Database`, the way separate processes would.
//! A barrier releases them together so planning overlaps as much as
//! possible; only the write-time re-checks keep the results consistent.

mod common;

use std::sync::{Arc, Barrier};
use std::thread;

use common::{add_cabin, isolated_config, range, TestDb};
use rentbnb::database::{Database, ReservationFilter};
use rentbnb::operations::BookingService;
use rentbnb::{Actor, BookingRequest, Error, GuestId, ReservationStatus};

const THREADS: usize = 8;

#[test]
fn test_overlapping_creates_at_most_one_wins() {
    let env = Arc::new(TestDb::new());
    let cabin = add_cabin(&mut env.open(), "001", 4, 100).id();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let env = Arc::clone(&env);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut db = env.open();
                let config = isolated_config();
                let guest = GuestId::new(i64::try_from(i).unwrap() + 1);
                // Every request overlaps every other on 2031-06-03
                let stay = range("2031-06-01", "2031-06-04");
                barrier.wait();
                BookingService::new(&mut db, &config)
                    .create(BookingRequest::new(cabin, guest, stay, 2))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "exactly one overlapping booking must succeed");
    for result in &results {
        if let Err(e) = result {
            assert!(
                matches!(e, Error::Unavailable { .. }),
                "losers must see Unavailable, got {e:?}"
            );
        }
    }

    let db = env.open();
    let stored = Database::list_reservations(
        db.connection(),
        &ReservationFilter::new().with_cabin(cabin),
    )
    .unwrap();
    assert_eq!(stored.len(), 1);
}

#[test]
fn test_disjoint_creates_all_succeed() {
    let env = Arc::new(TestDb::new());
    let cabin = add_cabin(&mut env.open(), "001", 4, 100).id();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let env = Arc::clone(&env);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut db = env.open();
                let config = isolated_config();
                // Back-to-back weeks in July: day 1-3, 3-5, 5-7, ...
                let start = 1 + 2 * i;
                let stay = range(
                    &format!("2031-07-{start:02}"),
                    &format!("2031-07-{:02}", start + 2),
                );
                barrier.wait();
                BookingService::new(&mut db, &config)
                    .create(BookingRequest::new(cabin, GuestId::new(1), stay, 1))
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    let db = env.open();
    assert_eq!(
        Database::blocking_reservations(db.connection(), cabin)
            .unwrap()
            .len(),
        THREADS
    );
}

#[test]
fn test_racing_transitions_apply_once() {
    let env = Arc::new(TestDb::new());
    let booked = {
        let mut db = env.open();
        let cabin = add_cabin(&mut db, "001", 4, 100);
        let config = isolated_config();
        BookingService::new(&mut db, &config)
            .create(BookingRequest::new(cabin.id(), GuestId::new(1), range("2031-08-01", "2031-08-03"), 1))
            .unwrap()
    };
    let barrier = Arc::new(Barrier::new(THREADS));

    // Half the threads check in, half cancel; all start from `unconfirmed`
    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let env = Arc::clone(&env);
            let barrier = Arc::clone(&barrier);
            let id = booked.id();
            thread::spawn(move || {
                let mut db = env.open();
                let config = isolated_config();
                barrier.wait();
                let mut service = BookingService::new(&mut db, &config);
                if i % 2 == 0 {
                    service.check_in(id)
                } else {
                    service.cancel(id, Actor::Operator)
                }
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let applied: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();

    // A check-in followed by a cancel is a legal sequence; anything else
    // must have been rejected.
    assert!(!applied.is_empty() && applied.len() <= 2);
    for result in &results {
        if let Err(e) = result {
            assert!(
                matches!(e, Error::InvalidTransition { .. }),
                "losers must see InvalidTransition, got {e:?}"
            );
        }
    }

    let db = env.open();
    let final_status = Database::get_reservation(db.connection(), booked.id())
        .unwrap()
        .unwrap()
        .status();
    let last_applied = applied
        .iter()
        .map(|r| r.status())
        .max_by_key(|s| ReservationStatus::ALL.iter().position(|x| x == s));
    assert_eq!(Some(final_status), last_applied);
}
