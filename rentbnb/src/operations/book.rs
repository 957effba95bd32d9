//! Booking planning.

use chrono::Local;
use rusqlite::Connection;
use std::time::SystemTime;

use crate::config::Config;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::lifecycle::{self, BookingRequest};
use crate::pricing::PricingPolicy;

use super::plan::{OperationPlan, PlanAction};

/// Plans a new booking: validates the request against the cabin, checks
/// availability and prices the stay.
#[derive(Debug, Clone)]
pub struct BookPlan {
    request: BookingRequest,
    pricing: PricingPolicy,
}

impl BookPlan {
    /// Creates a booking planner priced by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured add-on rate is negative.
    pub fn new(request: BookingRequest, config: &Config) -> Result<Self> {
        Ok(Self::with_pricing(request, PricingPolicy::from_config(config)?))
    }

    /// Creates a booking planner with an explicit pricing policy.
    #[must_use]
    pub const fn with_pricing(request: BookingRequest, pricing: PricingPolicy) -> Self {
        Self { request, pricing }
    }

    /// The request being planned.
    #[must_use]
    pub const fn request(&self) -> &BookingRequest {
        &self.request
    }

    /// Builds the booking plan. Does not modify the database.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the cabin does not exist
    /// - [`Error::InvalidInput`] if the guest count is out of range
    /// - [`Error::Unavailable`] if the dates are taken
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let request = &self.request;
        let cabin = Database::get_cabin(conn, request.cabin_id)?.ok_or_else(|| Error::NotFound {
            resource: format!("cabin {}", request.cabin_id),
        })?;
        let existing = Database::blocking_reservations(conn, cabin.id())?;

        let booking = lifecycle::create(request, &cabin, &existing, &self.pricing, SystemTime::now())?;
        log::debug!(
            "cabin {} is free for {}, total {}",
            cabin.cabin_number(),
            request.range,
            booking.total_price()
        );

        let mut plan = OperationPlan::new(format!(
            "Book cabin {} for guest {} ({})",
            cabin.cabin_number(),
            request.guest_id,
            request.range
        ));
        if request.range.start() < Local::now().date_naive() {
            plan = plan.add_warning(format!(
                "arrival date {} is in the past",
                request.range.start()
            ));
        }

        Ok(plan.add_action(PlanAction::CreateReservation(booking)))
    }
}
