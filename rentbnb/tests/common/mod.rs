//! Shared fixtures for rentbnb integration tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rust_decimal::Decimal;
use tempfile::TempDir;

use rentbnb::config::{Config, ConfigBuilder};
use rentbnb::database::{Database, DatabaseConfig};
use rentbnb::{Cabin, CabinDetails, DateRange};

/// A database file in a temporary directory. Each call to [`TestDb::open`]
/// makes an independent connection, like a separate process would.
pub struct TestDb {
    _dir: TempDir,
    path: PathBuf,
}

#[allow(dead_code)]
impl TestDb {
    /// Creates the directory and initializes the schema.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rentbnb.db");
        Database::open(DatabaseConfig::new(&path)).unwrap();
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn open(&self) -> Database {
        self.open_with_timeout(Duration::from_secs(10))
    }

    pub fn open_with_timeout(&self, timeout: Duration) -> Database {
        Database::open(DatabaseConfig::new(&self.path).with_busy_timeout(timeout)).unwrap()
    }
}

/// Adds a cabin with the given nightly price.
#[allow(dead_code)]
pub fn add_cabin(db: &mut Database, number: &str, capacity: u32, price: i64) -> Cabin {
    let details = CabinDetails::builder(format!("Cabin {number}"), number, capacity, Decimal::new(price, 0))
        .build()
        .unwrap();
    db.insert_cabin(&details).unwrap()
}

#[allow(dead_code)]
pub fn range(start: &str, end: &str) -> DateRange {
    DateRange::parse(start, end).unwrap()
}

/// Configuration with built-in defaults only, unaffected by the
/// environment or files on the machine running the tests.
#[allow(dead_code)]
pub fn isolated_config() -> Config {
    ConfigBuilder::new().skip_files().skip_env().build().unwrap()
}
