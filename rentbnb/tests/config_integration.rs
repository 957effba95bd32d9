//! Configuration files and environment feeding into pricing.

mod common;

use std::env;
use std::fs;

use rust_decimal::Decimal;
use serial_test::serial;
use tempfile::TempDir;

use common::{add_cabin, range, TestDb};
use rentbnb::config::environment::{ENV_ADDON_RATE, ENV_CURRENCY};
use rentbnb::config::ConfigBuilder;
use rentbnb::operations::BookingService;
use rentbnb::{BookingRequest, GuestId};

struct EnvGuard(&'static [&'static str]);

impl EnvGuard {
    fn clear(vars: &'static [&'static str]) -> Self {
        for var in vars {
            env::remove_var(var);
        }
        Self(vars)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for var in self.0 {
            env::remove_var(var);
        }
    }
}

#[test]
#[serial]
fn test_site_file_sets_breakfast_price() {
    let _guard = EnvGuard::clear(&[ENV_ADDON_RATE, ENV_CURRENCY]);
    let site = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    fs::write(
        site.path().join("rentbnb.yaml"),
        "pricing:\n  addon_rate_per_guest_per_night: 20\n",
    )
    .unwrap();
    let nested = site.path().join("a/b");
    fs::create_dir_all(&nested).unwrap();

    let config = ConfigBuilder::new()
        .with_working_dir(&nested)
        .with_data_dir(data.path())
        .build()
        .unwrap();
    assert_eq!(config.addon_rate(), Decimal::new(20, 0));

    let env_db = TestDb::new();
    let mut db = env_db.open();
    let cabin = add_cabin(&mut db, "001", 2, 100);
    let quote = BookingService::new(&mut db, &config)
        .quote(cabin.id(), &range("2031-01-01", "2031-01-03"), 2, true)
        .unwrap();
    // 2 * 100 + 2 nights * 2 guests * 20
    assert_eq!(quote.total, Decimal::new(280, 0));
}

#[test]
#[serial]
fn test_environment_beats_files() {
    let _guard = EnvGuard::clear(&[ENV_ADDON_RATE, ENV_CURRENCY]);
    let site = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    fs::write(
        site.path().join("rentbnb.yaml"),
        "pricing:\n  addon_rate_per_guest_per_night: 20\n  currency: EUR\n",
    )
    .unwrap();
    env::set_var(ENV_ADDON_RATE, "7.50");

    let config = ConfigBuilder::new()
        .with_working_dir(site.path())
        .with_data_dir(data.path())
        .build()
        .unwrap();
    assert_eq!(config.addon_rate(), Decimal::new(750, 2));
    assert_eq!(config.currency(), "EUR");

    let env_db = TestDb::new();
    let mut db = env_db.open();
    let cabin = add_cabin(&mut db, "001", 2, 100);
    let booked = BookingService::new(&mut db, &config)
        .create(
            BookingRequest::new(cabin.id(), GuestId::new(1), range("2031-01-01", "2031-01-02"), 2)
                .with_addon(true),
        )
        .unwrap();
    assert_eq!(booked.total_price(), Decimal::new(115, 0));
}

#[test]
#[serial]
fn test_invalid_files_and_values_are_rejected() {
    let _guard = EnvGuard::clear(&[ENV_ADDON_RATE, ENV_CURRENCY]);
    let site = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();

    fs::write(site.path().join("rentbnb.yaml"), "pricing: [not, a, map]\n").unwrap();
    assert!(ConfigBuilder::new()
        .with_working_dir(site.path())
        .with_data_dir(data.path())
        .build()
        .is_err());

    fs::write(
        site.path().join("rentbnb.yaml"),
        "pricing:\n  addon_rate_per_guest_per_night: -1\n",
    )
    .unwrap();
    assert!(ConfigBuilder::new()
        .with_working_dir(site.path())
        .with_data_dir(data.path())
        .build()
        .is_err());

    fs::write(site.path().join("rentbnb.yaml"), "").unwrap();
    env::set_var(ENV_ADDON_RATE, "lots");
    assert!(ConfigBuilder::new()
        .with_working_dir(site.path())
        .with_data_dir(data.path())
        .build()
        .is_err());
}
