//! Booking operations using the plan-execute pattern.
//!
//! Planning reads the database, runs the pure engine and produces an
//! [`OperationPlan`]; nothing is written. Execution applies the plan inside
//! one write transaction and re-validates every decision under the lock.
//! Splitting the two gives dry runs for free.
//!
//! # Examples
//!
//! ```no_run
//! use rentbnb::database::{Database, DatabaseConfig};
//! use rentbnb::operations::{PlanExecutor, TransitionOptions, TransitionPlan};
//! use rentbnb::ReservationId;
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/rentbnb.db")).unwrap();
//!
//! let plan = TransitionPlan::new(TransitionOptions::check_in(ReservationId::new(1)))
//!     .build_plan(db.connection())
//!     .unwrap();
//! let result = PlanExecutor::new(&mut db).execute(&plan).unwrap();
//! assert!(result.success);
//! ```

pub mod book;
pub mod delete;
pub mod executor;
pub mod init;
pub mod plan;
pub mod query;
pub mod review;
pub mod service;
pub mod transition;

pub use book::BookPlan;
pub use delete::DeletePlan;
pub use executor::{ExecutionResult, PlanExecutor};
pub use init::{init_database, InitOptions, InitResult};
pub use plan::{OperationPlan, PlanAction};
pub use review::{ReviewOptions, ReviewPlan};
pub use service::BookingService;
pub use transition::{TransitionOptions, TransitionPlan};
