//! Administrative deletion of reservations.
//!
//! Cancellation is the normal way to end a booking. Deletion removes the
//! record and its review outright and is reserved for operators.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::reservation::{Actor, ReservationId};

use super::plan::{OperationPlan, PlanAction};

/// Plans the deletion of one reservation.
pub struct DeletePlan {
    reservation_id: ReservationId,
    actor: Actor,
}

impl DeletePlan {
    /// Creates a planner deleting `reservation_id` on behalf of `actor`.
    #[must_use]
    pub const fn new(reservation_id: ReservationId, actor: Actor) -> Self {
        Self {
            reservation_id,
            actor,
        }
    }

    /// Builds the plan. Does not modify the database.
    ///
    /// # Errors
    ///
    /// - [`Error::Forbidden`] unless the actor is an operator
    /// - [`Error::NotFound`] if the reservation does not exist
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let id = self.reservation_id;
        if self.actor != Actor::Operator {
            return Err(Error::Forbidden {
                details: format!("{} may not delete reservation {id}", self.actor),
            });
        }

        let reservation = Database::get_reservation(conn, id)?.ok_or_else(|| Error::NotFound {
            resource: format!("reservation {id}"),
        })?;

        let mut plan = OperationPlan::new(format!("Delete reservation {id}"));
        if reservation.status().is_blocking() {
            plan = plan.add_warning(format!(
                "reservation {id} is still {}; cancelling keeps its history",
                reservation.status()
            ));
        }
        if Database::get_review(conn, id)?.is_some() {
            plan = plan.add_warning(format!("the review of reservation {id} is deleted too"));
        }

        Ok(plan.add_action(PlanAction::DeleteReservation(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{
        create_test_cabin, create_test_database, insert_test_reservation, TEST_GUEST,
    };

    #[test]
    fn test_operator_delete_plan() {
        let mut db = create_test_database();
        let cabin = create_test_cabin(&mut db, "101", 4);
        let stay = insert_test_reservation(&mut db, cabin.id(), "2024-05-01", "2024-05-03");

        let plan = DeletePlan::new(stay.id(), Actor::Operator)
            .build_plan(db.connection())
            .unwrap();
        assert_eq!(plan.actions, vec![PlanAction::DeleteReservation(stay.id())]);
        assert_eq!(plan.warnings.len(), 1);
    }

    #[test]
    fn test_guest_cannot_delete() {
        let mut db = create_test_database();
        let cabin = create_test_cabin(&mut db, "101", 4);
        let stay = insert_test_reservation(&mut db, cabin.id(), "2024-05-01", "2024-05-03");

        let err = DeletePlan::new(stay.id(), Actor::Guest(TEST_GUEST))
            .build_plan(db.connection())
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden { .. }));
    }

    #[test]
    fn test_delete_missing() {
        let db = create_test_database();
        let err = DeletePlan::new(ReservationId::new(3), Actor::Operator)
            .build_plan(db.connection())
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
