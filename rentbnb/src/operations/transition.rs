//! Planning for check-in, check-out and cancellation.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::lifecycle::{self, Transition};
use crate::reservation::{Actor, ReservationId};

use super::plan::{capitalize, OperationPlan, PlanAction};

/// Options for a status transition.
///
/// # Examples
///
/// ```
/// use rentbnb::operations::TransitionOptions;
/// use rentbnb::{Actor, GuestId, ReservationId, Transition};
///
/// let options = TransitionOptions::cancel(ReservationId::new(4), Actor::Guest(GuestId::new(2)));
/// assert_eq!(options.transition(), Transition::Cancel);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionOptions {
    reservation_id: ReservationId,
    transition: Transition,
    actor: Actor,
}

impl TransitionOptions {
    /// Check the guest in. Performed by the operator.
    #[must_use]
    pub const fn check_in(reservation_id: ReservationId) -> Self {
        Self {
            reservation_id,
            transition: Transition::CheckIn,
            actor: Actor::Operator,
        }
    }

    /// Check the guest out. Performed by the operator.
    #[must_use]
    pub const fn check_out(reservation_id: ReservationId) -> Self {
        Self {
            reservation_id,
            transition: Transition::CheckOut,
            actor: Actor::Operator,
        }
    }

    /// Cancel on behalf of `actor`.
    #[must_use]
    pub const fn cancel(reservation_id: ReservationId, actor: Actor) -> Self {
        Self {
            reservation_id,
            transition: Transition::Cancel,
            actor,
        }
    }

    /// The reservation to move.
    #[must_use]
    pub const fn reservation_id(&self) -> ReservationId {
        self.reservation_id
    }

    /// The requested operation.
    #[must_use]
    pub const fn transition(&self) -> Transition {
        self.transition
    }

    /// Who asked for it.
    #[must_use]
    pub const fn actor(&self) -> Actor {
        self.actor
    }
}

/// Plans a status transition against the stored reservation.
pub struct TransitionPlan {
    options: TransitionOptions,
}

impl TransitionPlan {
    /// Creates a planner for `options`.
    #[must_use]
    pub const fn new(options: TransitionOptions) -> Self {
        Self { options }
    }

    /// Builds the plan. Does not modify the database.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the reservation does not exist
    /// - [`Error::Forbidden`] if a guest cancels someone else's reservation
    /// - [`Error::InvalidTransition`] if the current status does not allow it
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let TransitionOptions {
            reservation_id,
            transition,
            actor,
        } = self.options;

        let reservation = Database::get_reservation(conn, reservation_id)?.ok_or_else(|| {
            Error::NotFound {
                resource: format!("reservation {reservation_id}"),
            }
        })?;

        let to = match transition {
            Transition::CheckIn => lifecycle::check_in(&reservation)?,
            Transition::CheckOut => lifecycle::check_out(&reservation)?,
            Transition::Cancel => lifecycle::cancel(&reservation, actor)?,
            // Reviews are written by `ReviewPlan` and never move the status
            Transition::Review => {
                return Err(Error::InvalidTransition {
                    reservation: reservation_id,
                    from: reservation.status(),
                    operation: transition,
                })
            }
        };
        log::debug!(
            "{actor} may {transition} reservation {reservation_id}: {} -> {to}",
            reservation.status()
        );

        let mut plan = OperationPlan::new(format!(
            "{} reservation {reservation_id}",
            capitalize(transition.verb())
        ));
        if transition == Transition::Cancel && reservation.status().is_blocking() {
            plan = plan.add_warning(format!(
                "cabin {} becomes available for {}",
                reservation.cabin_id(),
                reservation.range()
            ));
        }

        Ok(plan.add_action(PlanAction::UpdateStatus {
            reservation: reservation_id,
            from: reservation.status(),
            to,
            transition,
        }))
    }
}
