//! Review planning.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::lifecycle;
use crate::reservation::{Actor, ReservationId};
use crate::review::Rating;

use super::plan::{OperationPlan, PlanAction};

/// Options for submitting a review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOptions {
    /// The reviewed stay.
    pub reservation_id: ReservationId,
    /// Who is writing the review.
    pub actor: Actor,
    /// The rating.
    pub rating: Rating,
    /// Free-text comment.
    pub comment: String,
}

impl ReviewOptions {
    /// Creates review options with an empty comment.
    #[must_use]
    pub const fn new(reservation_id: ReservationId, actor: Actor, rating: Rating) -> Self {
        Self {
            reservation_id,
            actor,
            rating,
            comment: String::new(),
        }
    }

    /// Sets the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// Plans a review of a completed stay.
pub struct ReviewPlan {
    options: ReviewOptions,
}

impl ReviewPlan {
    /// Creates a planner for `options`.
    #[must_use]
    pub const fn new(options: ReviewOptions) -> Self {
        Self { options }
    }

    /// Builds the plan. Does not modify the database.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the reservation does not exist
    /// - [`Error::Forbidden`] unless the actor is the guest who stayed
    /// - [`Error::InvalidTransition`] unless the stay is checked out
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let options = &self.options;
        let reservation = Database::get_reservation(conn, options.reservation_id)?
            .ok_or_else(|| Error::NotFound {
                resource: format!("reservation {}", options.reservation_id),
            })?;

        let submission =
            lifecycle::submit_review(&reservation, options.actor, options.rating, &options.comment)?;

        let mut plan = OperationPlan::new(format!(
            "Review reservation {} of cabin {}",
            reservation.id(),
            reservation.cabin_id()
        ));
        if let Some(previous) = Database::get_review(conn, reservation.id())? {
            plan = plan.add_warning(format!(
                "replaces the existing {} review",
                previous.rating
            ));
        }

        Ok(plan.add_action(PlanAction::UpsertReview(submission)))
    }
}
