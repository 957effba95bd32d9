use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rust_decimal::Decimal;
use tempfile::TempDir;

use rentbnb::config::{Config, ConfigBuilder};
use rentbnb::database::{Database, DatabaseConfig, ReservationFilter};
use rentbnb::lifecycle::BookingRequest;
use rentbnb::operations::{BookPlan, BookingService, PlanExecutor};
use rentbnb::{
    AvailabilityIndex, Cabin, CabinDetails, CabinId, DateRange, GuestId, NewReservation,
    Reservation, ReservationId, ReservationStatus,
};

const INDEX_SIZES: &[usize] = &[10, 100, 1000, 10_000];
const STORED_SIZES: &[usize] = &[10, 100, 500];

fn benchmark_config() -> Config {
    ConfigBuilder::new()
        .skip_env()
        .skip_files()
        .build()
        .expect("failed to build benchmark configuration")
}

fn setup_database() -> (TempDir, Database, Cabin) {
    let temp_dir = TempDir::new().expect("failed to create temporary directory");
    let mut db = Database::open(DatabaseConfig::new(temp_dir.path().join("rentbnb.db")))
        .expect("failed to open temporary database");
    let details = CabinDetails::builder("Bench", "001", 4, Decimal::new(120, 0))
        .build()
        .expect("failed to build cabin");
    let cabin = db.insert_cabin(&details).expect("failed to insert cabin");
    (temp_dir, db, cabin)
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 1).expect("valid date")
}

/// Two-night stays with a free night between them.
fn stay(index: usize) -> DateRange {
    let offset = i64::try_from(index * 3).expect("offset fits");
    let start = base_date() + Duration::days(offset);
    DateRange::new(start, start + Duration::days(2)).expect("valid range")
}

fn in_memory_reservations(cabin_id: CabinId, count: usize) -> Vec<Reservation> {
    (0..count)
        .map(|index| {
            let booking = NewReservation::builder(cabin_id, GuestId::new(1), stay(index))
                .build()
                .expect("failed to build booking");
            let id = ReservationId::new(i64::try_from(index + 1).expect("id fits"));
            Reservation::from_parts(id, ReservationStatus::Unconfirmed, booking)
        })
        .collect()
}

fn populate(db: &mut Database, config: &Config, cabin_id: CabinId, count: usize) {
    let mut service = BookingService::new(db, config);
    for index in 0..count {
        service
            .create(BookingRequest::new(cabin_id, GuestId::new(1), stay(index), 2))
            .expect("failed to create booking");
    }
}

fn bench_availability_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("availability_index");
    let cabin_id = CabinId::new(1);

    for &size in INDEX_SIZES {
        let existing = in_memory_reservations(cabin_id, size);
        // The free night after the last stay.
        let gap = {
            let last = stay(size - 1);
            DateRange::new(last.end(), last.end() + Duration::days(1)).expect("valid range")
        };
        group.bench_with_input(BenchmarkId::from_parameter(size), &existing, |b, existing| {
            b.iter(|| {
                let index = AvailabilityIndex::new(cabin_id, existing);
                black_box(index.is_available(black_box(&gap)))
            });
        });
    }

    group.finish();
}

fn bench_book_single(c: &mut Criterion) {
    let config = benchmark_config();

    c.bench_function("book_single", |b| {
        b.iter_batched(
            setup_database,
            |(temp_dir, mut db, cabin)| {
                let _temp_dir = temp_dir;
                let request = BookingRequest::new(cabin.id(), GuestId::new(1), stay(0), 2);
                let plan = BookPlan::new(request, &config)
                    .expect("failed to configure pricing")
                    .build_plan(db.connection())
                    .expect("failed to plan booking");
                let result = PlanExecutor::new(&mut db)
                    .execute(&plan)
                    .expect("failed to execute booking");
                black_box(result.reservation);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_book_into_busy_calendar(c: &mut Criterion) {
    let config = benchmark_config();
    let mut group = c.benchmark_group("book_into_busy_calendar");

    for &size in STORED_SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &count| {
            b.iter_batched(
                || {
                    let (temp_dir, mut db, cabin) = setup_database();
                    populate(&mut db, &config, cabin.id(), count);
                    (temp_dir, db, cabin)
                },
                |(temp_dir, mut db, cabin)| {
                    let _temp_dir = temp_dir;
                    let booked = BookingService::new(&mut db, &config)
                        .create(BookingRequest::new(cabin.id(), GuestId::new(2), stay(count), 2))
                        .expect("failed to create booking");
                    black_box(booked);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_list_reservations(c: &mut Criterion) {
    let config = benchmark_config();
    let mut group = c.benchmark_group("list_reservations");

    for &size in STORED_SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &count| {
            b.iter_batched(
                || {
                    let (temp_dir, mut db, cabin) = setup_database();
                    populate(&mut db, &config, cabin.id(), count);
                    (temp_dir, db, cabin)
                },
                |(temp_dir, db, cabin)| {
                    let _temp_dir = temp_dir;
                    let filter = ReservationFilter::new().with_cabin(cabin.id());
                    let reservations = Database::list_reservations(db.connection(), &filter)
                        .expect("failed to list reservations");
                    black_box(reservations);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    booking_bench,
    bench_availability_index,
    bench_book_single,
    bench_book_into_busy_calendar,
    bench_list_reservations,
);
criterion_main!(booking_bench);
