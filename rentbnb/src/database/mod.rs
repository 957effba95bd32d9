//! `SQLite` storage for cabins, reservations and reviews.
//!
//! Every booking decision that depends on stored state runs inside a write
//! transaction taken with `BEGIN IMMEDIATE`, so two processes booking the
//! same cabin are serialized by the database lock.
//!
//! # Examples
//!
//! ```no_run
//! use rust_decimal::Decimal;
//! use rentbnb::database::{Database, DatabaseConfig, ReservationFilter};
//! use rentbnb::CabinDetails;
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/rentbnb.db")).unwrap();
//! let details = CabinDetails::builder("Birch", "001", 4, Decimal::new(120, 0))
//!     .build()
//!     .unwrap();
//! let cabin = db.insert_cabin(&details).unwrap();
//!
//! let stays = Database::list_reservations(
//!     db.connection(),
//!     &ReservationFilter::new().with_cabin(cabin.id()),
//! )
//! .unwrap();
//! assert!(stays.is_empty());
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE,
    DATA_DIR_NAME, ENV_DATA_DIR,
};
pub use connection::Database;
pub use operations::ReservationFilter;

pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use schema::CURRENT_SCHEMA_VERSION;
