//! The reservation state machine.
//!
//! ```text
//!                 check_in             check_out
//!   unconfirmed ───────────▶ checked_in ──────────▶ checked_out ◀─┐
//!        │                       │                       │        │ submit_review
//!        └──────── cancel ───────┴──▶ cancelled          └────────┘
//! ```
//!
//! Every function here is pure. Callers load the reservation, ask this module
//! what the next state is, and persist the answer with a compare-and-set so
//! that a concurrent change is detected rather than overwritten.

use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::availability;
use crate::cabin::{Cabin, CabinId};
use crate::date_range::DateRange;
use crate::error::{Error, Result};
use crate::pricing::PricingPolicy;
use crate::reservation::{Actor, GuestId, NewReservation, Reservation, ReservationStatus};
use crate::review::{Rating, ReviewSubmission};

/// A lifecycle operation on an existing reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Guest arrives.
    CheckIn,
    /// Guest leaves.
    CheckOut,
    /// Reservation is called off before check-out.
    Cancel,
    /// Guest rates the completed stay.
    Review,
}

impl Transition {
    /// Returns the state `from` moves to, or `None` if the operation is
    /// not allowed there.
    ///
    /// # Examples
    ///
    /// ```
    /// use rentbnb::{ReservationStatus, Transition};
    ///
    /// assert_eq!(
    ///     Transition::CheckIn.target(ReservationStatus::Unconfirmed),
    ///     Some(ReservationStatus::CheckedIn)
    /// );
    /// assert_eq!(Transition::CheckIn.target(ReservationStatus::Cancelled), None);
    /// ```
    #[must_use]
    pub const fn target(self, from: ReservationStatus) -> Option<ReservationStatus> {
        use crate::reservation::ReservationStatus::{Cancelled, CheckedIn, CheckedOut, Unconfirmed};

        match (self, from) {
            (Self::CheckIn, Unconfirmed) => Some(CheckedIn),
            (Self::CheckOut, CheckedIn) => Some(CheckedOut),
            (Self::Cancel, Unconfirmed | CheckedIn) => Some(Cancelled),
            (Self::Review, CheckedOut) => Some(CheckedOut),
            _ => None,
        }
    }

    /// Human-readable verb used in messages.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::CheckIn => "check in",
            Self::CheckOut => "check out",
            Self::Cancel => "cancel",
            Self::Review => "review",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Applies `transition` to `reservation`, returning the new status.
///
/// # Errors
///
/// Returns [`Error::InvalidTransition`] if the reservation's current state
/// does not allow the operation.
pub fn apply(reservation: &Reservation, transition: Transition) -> Result<ReservationStatus> {
    transition
        .target(reservation.status())
        .ok_or(Error::InvalidTransition {
            reservation: reservation.id(),
            from: reservation.status(),
            operation: transition,
        })
}

/// A guest's request for a stay, before any checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// Requested cabin.
    pub cabin_id: CabinId,
    /// Booking guest.
    pub guest_id: GuestId,
    /// Requested stay.
    pub range: DateRange,
    /// Number of guests staying.
    pub guests: u32,
    /// Whether breakfast is wanted.
    pub addon_included: bool,
    /// Free-text note.
    pub note: Option<String>,
}

impl BookingRequest {
    /// Creates a request for `guests` people without breakfast or note.
    #[must_use]
    pub const fn new(cabin_id: CabinId, guest_id: GuestId, range: DateRange, guests: u32) -> Self {
        Self {
            cabin_id,
            guest_id,
            range,
            guests,
            addon_included: false,
            note: None,
        }
    }

    /// Sets whether breakfast is included.
    #[must_use]
    pub fn with_addon(mut self, addon_included: bool) -> Self {
        self.addon_included = addon_included;
        self
    }

    /// Sets the guest's note.
    #[must_use]
    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }
}

/// Validates, checks and prices a booking.
///
/// `existing` must contain at least every blocking reservation of the cabin;
/// anything else in it is ignored.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if the request names a different cabin, or the
///   guest count is zero or above the cabin's capacity
/// - [`Error::Unavailable`] if a blocking reservation overlaps the range
///
/// # Examples
///
/// ```
/// use std::time::SystemTime;
/// use rust_decimal::Decimal;
/// use rentbnb::lifecycle::{create, BookingRequest};
/// use rentbnb::{Cabin, CabinDetails, CabinId, DateRange, GuestId, PricingPolicy};
///
/// let cabin = Cabin::new(
///     CabinId::new(1),
///     CabinDetails::builder("Aspen", "003", 2, Decimal::new(100, 0)).build().unwrap(),
/// );
/// let range = DateRange::parse("2024-06-01", "2024-06-04").unwrap();
/// let request = BookingRequest::new(cabin.id(), GuestId::new(5), range, 2).with_addon(true);
///
/// let booking = create(&request, &cabin, &[], &PricingPolicy::default(), SystemTime::now()).unwrap();
/// assert_eq!(booking.total_price(), Decimal::new(390, 0));
/// ```
pub fn create(
    request: &BookingRequest,
    cabin: &Cabin,
    existing: &[Reservation],
    pricing: &PricingPolicy,
    now: SystemTime,
) -> Result<NewReservation> {
    if request.cabin_id != cabin.id() {
        return Err(Error::invalid_input(
            "cabin",
            format!(
                "request is for cabin {} but cabin {} was supplied",
                request.cabin_id,
                cabin.id()
            ),
        ));
    }
    if request.guests == 0 {
        return Err(Error::invalid_input("guests", "must be at least 1"));
    }
    if request.guests > cabin.capacity() {
        return Err(Error::invalid_input(
            "guests",
            format!(
                "{} exceeds the capacity of cabin {} ({})",
                request.guests,
                cabin.cabin_number(),
                cabin.capacity()
            ),
        ));
    }

    let blocking = availability::conflicts(cabin.id(), &request.range, existing);
    if !blocking.is_empty() {
        return Err(Error::Unavailable {
            cabin: cabin.id(),
            range: request.range,
            conflicts: blocking,
        });
    }

    let quote = pricing.quote(cabin, &request.range, request.guests, request.addon_included)?;

    NewReservation::builder(cabin.id(), request.guest_id, request.range)
        .guests(request.guests)
        .addon_included(request.addon_included)
        .total_price(quote.total)
        .created_at(now)
        .note(request.note.clone())
        .build()
}

/// Moves an unconfirmed reservation to checked in.
///
/// # Errors
///
/// Returns [`Error::InvalidTransition`] unless the reservation is unconfirmed.
pub fn check_in(reservation: &Reservation) -> Result<ReservationStatus> {
    apply(reservation, Transition::CheckIn)
}

/// Moves a checked-in reservation to checked out.
///
/// # Errors
///
/// Returns [`Error::InvalidTransition`] unless the reservation is checked in.
pub fn check_out(reservation: &Reservation) -> Result<ReservationStatus> {
    apply(reservation, Transition::CheckOut)
}

/// Cancels a reservation on behalf of `actor`.
///
/// # Errors
///
/// - [`Error::Forbidden`] if `actor` is a guest other than the owner
/// - [`Error::InvalidTransition`] if the reservation is already checked out
///   or cancelled
pub fn cancel(reservation: &Reservation, actor: Actor) -> Result<ReservationStatus> {
    authorize(reservation, actor, Transition::Cancel)?;
    apply(reservation, Transition::Cancel)
}

/// Accepts a review of a completed stay from its guest.
///
/// Operators cannot write reviews on a guest's behalf.
///
/// # Errors
///
/// - [`Error::Forbidden`] if `actor` is not the owning guest
/// - [`Error::InvalidTransition`] unless the reservation is checked out
pub fn submit_review(
    reservation: &Reservation,
    actor: Actor,
    rating: Rating,
    comment: &str,
) -> Result<ReviewSubmission> {
    if actor == Actor::Operator {
        return Err(Error::Forbidden {
            details: format!(
                "only the guest who stayed may review reservation {}",
                reservation.id()
            ),
        });
    }
    authorize(reservation, actor, Transition::Review)?;
    apply(reservation, Transition::Review)?;

    Ok(ReviewSubmission {
        reservation_id: reservation.id(),
        guest_id: reservation.guest_id(),
        cabin_id: reservation.cabin_id(),
        rating,
        comment: comment.trim().to_string(),
    })
}

fn authorize(reservation: &Reservation, actor: Actor, transition: Transition) -> Result<()> {
    if actor.may_act_for(reservation.guest_id()) {
        return Ok(());
    }
    Err(Error::Forbidden {
        details: format!(
            "{actor} may not {transition} reservation {} of guest {}",
            reservation.id(),
            reservation.guest_id()
        ),
    })
}
