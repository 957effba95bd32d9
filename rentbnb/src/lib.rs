#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # rentbnb
//!
//! A booking engine for cabin rentals.
//!
//! Guests reserve cabins for date ranges; operators check them in and out;
//! guests review completed stays. The engine decides whether a range may be
//! booked, what it costs, and which status changes are allowed. Storage is
//! `SQLite`, with every check-then-write running under the database write
//! lock so concurrent processes cannot double-book a cabin.
//!
//! ## Core Types
//!
//! - [`DateRange`]: a validated half-open stay
//! - [`Cabin`], [`Reservation`], [`Review`]: the stored records
//! - [`PricingPolicy`] and [`PriceQuote`]: exact decimal pricing
//! - [`AvailabilityIndex`]: overlap checks against blocking stays
//! - [`Transition`] and the [`lifecycle`] functions: the state machine
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use rust_decimal::Decimal;
//! use rentbnb::pricing::price;
//! use rentbnb::DateRange;
//!
//! let stay = DateRange::parse("2024-07-10", "2024-07-13").unwrap();
//! let total = price(Decimal::new(80, 0), stay.nights(), 2, true, Decimal::new(15, 0)).unwrap();
//! assert_eq!(total, Decimal::new(330, 0));
//! ```

pub mod availability;
pub mod cabin;
pub mod config;
pub mod database;
pub mod date_range;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod operations;
pub mod pricing;
pub mod reservation;
pub mod review;

// Re-export key types at crate root for convenience
pub use availability::AvailabilityIndex;
pub use cabin::{Cabin, CabinDetails, CabinId};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use date_range::DateRange;
pub use error::{Error, Result};
pub use lifecycle::{BookingRequest, Transition};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{BookingService, ExecutionResult, OperationPlan, PlanAction, PlanExecutor};
pub use pricing::{PriceQuote, PricingPolicy};
pub use reservation::{Actor, GuestId, NewReservation, Reservation, ReservationId, ReservationStatus};
pub use review::{Rating, Review, ReviewId, ReviewSubmission};
