//! One-call booking operations.
//!
//! [`BookingService`] bundles the database and configuration a request
//! needs and runs plan-then-execute for each operation.

use crate::cabin::CabinId;
use crate::config::Config;
use crate::database::Database;
use crate::date_range::DateRange;
use crate::error::{Error, Result};
use crate::lifecycle::BookingRequest;
use crate::pricing::{PriceQuote, PricingPolicy};
use crate::reservation::{Actor, Reservation, ReservationId};
use crate::review::{Rating, Review};

use super::book::BookPlan;
use super::delete::DeletePlan;
use super::executor::{ExecutionResult, PlanExecutor};
use super::plan::OperationPlan;
use super::query;
use super::review::{ReviewOptions, ReviewPlan};
use super::transition::{TransitionOptions, TransitionPlan};

/// Request-scoped access to the booking operations.
///
/// # Examples
///
/// ```no_run
/// use rentbnb::config::ConfigBuilder;
/// use rentbnb::database::{Database, DatabaseConfig};
/// use rentbnb::lifecycle::BookingRequest;
/// use rentbnb::operations::BookingService;
/// use rentbnb::{Actor, CabinId, DateRange, GuestId};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/rentbnb.db")).unwrap();
/// let config = ConfigBuilder::new().build().unwrap();
/// let mut service = BookingService::new(&mut db, &config);
///
/// let range = DateRange::parse("2024-06-01", "2024-06-04").unwrap();
/// let guest = GuestId::new(5);
/// let booked = service
///     .create(BookingRequest::new(CabinId::new(1), guest, range, 2))
///     .unwrap();
/// service.cancel(booked.id(), Actor::Guest(guest)).unwrap();
/// ```
pub struct BookingService<'a> {
    db: &'a mut Database,
    config: &'a Config,
}

impl<'a> BookingService<'a> {
    /// Creates a service over `db` configured by `config`.
    #[must_use]
    pub fn new(db: &'a mut Database, config: &'a Config) -> Self {
        Self { db, config }
    }

    fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        for warning in &plan.warnings {
            log::warn!("{warning}");
        }
        PlanExecutor::new(&mut *self.db).execute(plan)
    }

    fn stored_reservation(result: ExecutionResult, id: Option<ReservationId>) -> Result<Reservation> {
        result.reservation.ok_or_else(|| Error::NotFound {
            resource: id.map_or_else(|| "new reservation".to_string(), |id| format!("reservation {id}")),
        })
    }

    fn transition(&mut self, options: TransitionOptions) -> Result<Reservation> {
        let plan = TransitionPlan::new(options)
            .build_plan(self.db.connection())
            .map_err(|e| self.db.translate_error(e))?;
        let result = self.execute(&plan)?;
        Self::stored_reservation(result, Some(options.reservation_id()))
    }

    /// Books a stay. The new reservation is `unconfirmed`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the cabin does not exist
    /// - [`Error::InvalidInput`] if the guest count is out of range
    /// - [`Error::Unavailable`] if the dates are taken, including by a
    ///   booking that commits between planning and execution
    pub fn create(&mut self, request: BookingRequest) -> Result<Reservation> {
        let plan = BookPlan::new(request, self.config)?
            .build_plan(self.db.connection())
            .map_err(|e| self.db.translate_error(e))?;
        let result = self.execute(&plan)?;
        Self::stored_reservation(result, None)
    }

    /// Checks the guest in.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] or [`Error::InvalidTransition`].
    pub fn check_in(&mut self, id: ReservationId) -> Result<Reservation> {
        self.transition(TransitionOptions::check_in(id))
    }

    /// Checks the guest out.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] or [`Error::InvalidTransition`].
    pub fn check_out(&mut self, id: ReservationId) -> Result<Reservation> {
        self.transition(TransitionOptions::check_out(id))
    }

    /// Cancels on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`], [`Error::Forbidden`] or
    /// [`Error::InvalidTransition`].
    pub fn cancel(&mut self, id: ReservationId, actor: Actor) -> Result<Reservation> {
        self.transition(TransitionOptions::cancel(id, actor))
    }

    /// Records or replaces the review of a checked-out stay.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`], [`Error::Forbidden`] or
    /// [`Error::InvalidTransition`].
    pub fn submit_review(
        &mut self,
        id: ReservationId,
        actor: Actor,
        rating: Rating,
        comment: &str,
    ) -> Result<Review> {
        let options = ReviewOptions::new(id, actor, rating).with_comment(comment);
        let plan = ReviewPlan::new(options)
            .build_plan(self.db.connection())
            .map_err(|e| self.db.translate_error(e))?;
        self.execute(&plan)?.review.ok_or_else(|| Error::NotFound {
            resource: format!("review of reservation {id}"),
        })
    }

    /// Returns true if the cabin is free for `range`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the cabin does not exist.
    pub fn is_available(&self, cabin_id: CabinId, range: &DateRange) -> Result<bool> {
        query::is_available(self.db.connection(), cabin_id, range)
            .map_err(|e| self.db.translate_error(e))
    }

    /// Prices a prospective stay.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the cabin does not exist, or
    /// [`Error::InvalidInput`] for a zero guest count or negative rate.
    pub fn quote(
        &self,
        cabin_id: CabinId,
        range: &DateRange,
        guests: u32,
        addon_included: bool,
    ) -> Result<PriceQuote> {
        let pricing = PricingPolicy::from_config(self.config)?;
        query::quote(self.db.connection(), &pricing, cabin_id, range, guests, addon_included)
            .map_err(|e| self.db.translate_error(e))
    }

    /// Deletes a reservation and its review. Operators only.
    ///
    /// # Errors
    ///
    /// [`Error::Forbidden`] or [`Error::NotFound`].
    pub fn delete(&mut self, id: ReservationId, actor: Actor) -> Result<()> {
        let plan = DeletePlan::new(id, actor)
            .build_plan(self.db.connection())
            .map_err(|e| self.db.translate_error(e))?;
        self.execute(&plan).map(|_| ())
    }
}
