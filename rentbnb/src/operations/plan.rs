//! Plan types for booking operations.
//!
//! A plan is the validated outcome of an engine decision: the storage
//! writes to perform, described but not yet applied.

use crate::lifecycle::Transition;
use crate::reservation::{NewReservation, ReservationId, ReservationStatus};
use crate::review::ReviewSubmission;

/// A single storage write performed by the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Insert a priced booking, re-checking availability at write time.
    CreateReservation(NewReservation),

    /// Move a reservation from one status to another, provided nobody
    /// moved it first.
    UpdateStatus {
        /// The reservation to move.
        reservation: ReservationId,
        /// The status the decision was made against.
        from: ReservationStatus,
        /// The status to store.
        to: ReservationStatus,
        /// The operation that produced the move.
        transition: Transition,
    },

    /// Insert or replace the review of a checked-out stay.
    UpsertReview(ReviewSubmission),

    /// Remove a reservation and its review.
    DeleteReservation(ReservationId),
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateReservation(booking) => format!(
                "Book cabin {} for guest {} ({}, {} guest(s), total {})",
                booking.cabin_id(),
                booking.guest_id(),
                booking.range(),
                booking.guests(),
                booking.total_price()
            ),
            Self::UpdateStatus {
                reservation,
                from,
                to,
                transition,
            } => format!("{} reservation {reservation}: {from} -> {to}", capitalize(transition.verb())),
            Self::UpsertReview(submission) => format!(
                "Record {} review of reservation {}",
                submission.rating, submission.reservation_id
            ),
            Self::DeleteReservation(id) => format!("Delete reservation {id}"),
        }
    }
}

pub(super) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// A complete operation plan.
///
/// # Examples
///
/// ```
/// use rentbnb::operations::{OperationPlan, PlanAction};
/// use rentbnb::ReservationId;
///
/// let plan = OperationPlan::new("Delete reservation 3")
///     .add_action(PlanAction::DeleteReservation(ReservationId::new(3)))
///     .add_warning("its review is deleted too");
/// assert_eq!(plan.len(), 1);
/// assert_eq!(plan.warnings.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates an empty plan.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// The booking this plan creates, if any.
    ///
    /// Lets a dry run report the price without touching storage.
    #[must_use]
    pub fn booking(&self) -> Option<&NewReservation> {
        self.actions.iter().find_map(|action| match action {
            PlanAction::CreateReservation(booking) => Some(booking),
            _ => None,
        })
    }
}
