//! Plan execution engine.
//!
//! All actions of a plan run inside one write transaction; any failure
//! rolls the whole plan back.

use std::time::SystemTime;

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::lifecycle::Transition;
use crate::reservation::{Reservation, ReservationId, ReservationStatus};
use crate::review::Review;

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// The reservation as stored after the last action touching one.
    /// Always `None` for dry runs.
    pub reservation: Option<Reservation>,

    /// The stored review, for review plans.
    pub review: Option<Review>,
}

impl ExecutionResult {
    fn new(plan: &OperationPlan, dry_run: bool) -> Self {
        Self {
            success: true,
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            reservation: None,
            review: None,
        }
    }
}

/// Executes operation plans against the database.
///
/// # Examples
///
/// ```no_run
/// use rentbnb::config::ConfigBuilder;
/// use rentbnb::database::{Database, DatabaseConfig};
/// use rentbnb::lifecycle::BookingRequest;
/// use rentbnb::operations::{BookPlan, PlanExecutor};
/// use rentbnb::{CabinId, DateRange, GuestId};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/rentbnb.db")).unwrap();
/// let config = ConfigBuilder::new().skip_files().build().unwrap();
/// let range = DateRange::parse("2024-06-01", "2024-06-04").unwrap();
/// let request = BookingRequest::new(CabinId::new(1), GuestId::new(5), range, 2);
///
/// let plan = BookPlan::new(request, &config)
///     .unwrap()
///     .build_plan(db.connection())
///     .unwrap();
///
/// let preview = PlanExecutor::new(&mut db).dry_run().execute(&plan).unwrap();
/// assert!(preview.dry_run);
///
/// let result = PlanExecutor::new(&mut db).execute(&plan).unwrap();
/// println!("booked {}", result.reservation.unwrap().id());
/// ```
pub struct PlanExecutor<'a> {
    db: &'a mut Database,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor.
    #[must_use]
    pub fn new(db: &'a mut Database) -> Self {
        Self { db, dry_run: false }
    }

    /// Sets the executor to dry-run mode: plans are reported, not applied.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// Decisions in the plan were made against a snapshot; each action
    /// re-validates them under the write lock, so a plan that went stale
    /// fails instead of overwriting a concurrent change.
    ///
    /// # Errors
    ///
    /// - [`Error::Unavailable`] if a concurrent booking took the dates
    /// - [`Error::InvalidTransition`] if a concurrent writer moved the
    ///   reservation
    /// - [`Error::NotFound`] if the reservation disappeared
    /// - [`Error::LockTimeout`] if the write lock could not be acquired
    pub fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        let mut result = ExecutionResult::new(plan, self.dry_run);
        if self.dry_run {
            log::debug!("dry run: {}", plan.description);
            return Ok(result);
        }

        let applied = (|| -> Result<()> {
            let tx = self.db.begin_write()?;
            for action in &plan.actions {
                log::debug!("executing: {}", action.description());
                Self::execute_action(&tx, action, &mut result)?;
            }
            tx.commit()?;
            Ok(())
        })();

        match applied {
            Ok(()) => {
                log::info!("{}", plan.description);
                Ok(result)
            }
            Err(e) => {
                log::debug!("rolled back '{}': {e}", plan.description);
                Err(self.db.translate_error(e))
            }
        }
    }

    fn execute_action(
        conn: &Connection,
        action: &PlanAction,
        result: &mut ExecutionResult,
    ) -> Result<()> {
        match action {
            PlanAction::CreateReservation(booking) => {
                result.reservation = Some(Database::insert_reservation_checked(conn, booking)?);
            }
            PlanAction::UpdateStatus {
                reservation,
                from,
                to,
                transition,
            } => {
                if !Database::compare_and_set_status(conn, *reservation, *from, *to)? {
                    return Err(stale_transition(conn, *reservation, *transition)?);
                }
                result.reservation = Some(load_reservation(conn, *reservation)?);
            }
            PlanAction::UpsertReview(submission) => {
                let current = load_reservation(conn, submission.reservation_id)?;
                if current.status() != ReservationStatus::CheckedOut {
                    return Err(Error::InvalidTransition {
                        reservation: current.id(),
                        from: current.status(),
                        operation: Transition::Review,
                    });
                }
                result.review = Some(Database::upsert_review(
                    conn,
                    submission,
                    SystemTime::now(),
                )?);
                result.reservation = Some(current);
            }
            PlanAction::DeleteReservation(id) => {
                if !Database::delete_reservation_simple(conn, *id)? {
                    return Err(reservation_not_found(*id));
                }
            }
        }
        Ok(())
    }
}

fn reservation_not_found(id: ReservationId) -> Error {
    Error::NotFound {
        resource: format!("reservation {id}"),
    }
}

fn load_reservation(conn: &Connection, id: ReservationId) -> Result<Reservation> {
    Database::get_reservation(conn, id)?.ok_or_else(|| reservation_not_found(id))
}

/// Explains why a compare-and-set matched no row.
fn stale_transition(
    conn: &Connection,
    id: ReservationId,
    transition: Transition,
) -> Result<Error> {
    let current = load_reservation(conn, id)?;
    Ok(Error::InvalidTransition {
        reservation: id,
        from: current.status(),
        operation: transition,
    })
}
