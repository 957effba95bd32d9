//! Reservation types.
//!
//! The booking engine produces a [`NewReservation`]; storage assigns a
//! [`ReservationId`] on insert and hands back a [`Reservation`]. Only the
//! status of a reservation changes after creation.

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cabin::CabinId;
use crate::date_range::DateRange;
use crate::error::{Error, Result};

/// Storage-assigned identifier of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of a guest. Guest accounts live outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(i64);

impl GuestId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who is asking for a lifecycle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// A guest acting on their own behalf.
    Guest(GuestId),
    /// Staff acting on any reservation.
    Operator,
}

impl Actor {
    /// Returns true if this actor may act on a reservation owned by `owner`.
    #[must_use]
    pub fn may_act_for(&self, owner: GuestId) -> bool {
        match self {
            Self::Guest(guest) => *guest == owner,
            Self::Operator => true,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guest(guest) => write!(f, "guest {guest}"),
            Self::Operator => write!(f, "operator"),
        }
    }
}

/// Lifecycle state of a reservation.
///
/// # Examples
///
/// ```
/// use rentbnb::ReservationStatus;
///
/// let status: ReservationStatus = "checked_in".parse().unwrap();
/// assert!(status.is_blocking());
/// assert!(!ReservationStatus::Cancelled.is_blocking());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Booked, guest has not arrived.
    Unconfirmed,
    /// Guest is staying in the cabin.
    CheckedIn,
    /// Guest has left.
    CheckedOut,
    /// Reservation was cancelled before check-out.
    Cancelled,
}

impl ReservationStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Unconfirmed,
        Self::CheckedIn,
        Self::CheckedOut,
        Self::Cancelled,
    ];

    /// Statuses that hold the cabin for their date range.
    pub const BLOCKING: [Self; 2] = [Self::Unconfirmed, Self::CheckedIn];

    /// The stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unconfirmed => "unconfirmed",
            Self::CheckedIn => "checked_in",
            Self::CheckedOut => "checked_out",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if a reservation in this state occupies its dates.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Unconfirmed | Self::CheckedIn)
    }

    /// Returns true if no lifecycle transition leaves this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::CheckedOut | Self::Cancelled)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                Error::invalid_input(
                    "status",
                    format!(
                        "'{s}' is not one of unconfirmed, checked_in, checked_out, cancelled"
                    ),
                )
            })
    }
}

/// A priced, validated booking that has not yet been stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    cabin_id: CabinId,
    guest_id: GuestId,
    range: DateRange,
    guests: u32,
    addon_included: bool,
    total_price: Decimal,
    #[serde(with = "unix_secs")]
    created_at: SystemTime,
    note: Option<String>,
}

impl NewReservation {
    /// Starts a builder for a booking of `cabin_id` by `guest_id`.
    #[must_use]
    pub fn builder(cabin_id: CabinId, guest_id: GuestId, range: DateRange) -> ReservationBuilder {
        ReservationBuilder {
            cabin_id,
            guest_id,
            range,
            guests: 1,
            addon_included: false,
            total_price: Decimal::ZERO,
            created_at: None,
            note: None,
        }
    }

    /// The booked cabin.
    #[must_use]
    pub const fn cabin_id(&self) -> CabinId {
        self.cabin_id
    }

    /// The owning guest.
    #[must_use]
    pub const fn guest_id(&self) -> GuestId {
        self.guest_id
    }

    /// The stay.
    #[must_use]
    pub const fn range(&self) -> &DateRange {
        &self.range
    }

    /// Number of guests staying.
    #[must_use]
    pub const fn guests(&self) -> u32 {
        self.guests
    }

    /// Whether breakfast was booked.
    #[must_use]
    pub const fn addon_included(&self) -> bool {
        self.addon_included
    }

    /// Total charged, frozen at creation.
    #[must_use]
    pub const fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// When the booking was made.
    #[must_use]
    pub const fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Free-text note from the guest.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Attaches the storage-assigned id. New bookings start unconfirmed.
    #[must_use]
    pub fn into_reservation(self, id: ReservationId) -> Reservation {
        Reservation {
            id,
            status: ReservationStatus::Unconfirmed,
            booking: self,
        }
    }
}

/// A stored reservation.
///
/// # Examples
///
/// ```
/// use rentbnb::{CabinId, DateRange, GuestId, NewReservation, ReservationId, ReservationStatus};
///
/// let range = DateRange::parse("2024-07-01", "2024-07-03").unwrap();
/// let reservation = NewReservation::builder(CabinId::new(1), GuestId::new(9), range)
///     .guests(2)
///     .build()
///     .unwrap()
///     .into_reservation(ReservationId::new(42));
///
/// assert_eq!(reservation.status(), ReservationStatus::Unconfirmed);
/// assert_eq!(reservation.range().nights(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    status: ReservationStatus,
    #[serde(flatten)]
    booking: NewReservation,
}

impl Reservation {
    /// Rebuilds a stored reservation from its parts.
    #[must_use]
    pub const fn from_parts(
        id: ReservationId,
        status: ReservationStatus,
        booking: NewReservation,
    ) -> Self {
        Self {
            id,
            status,
            booking,
        }
    }

    /// The reservation identifier.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// The booking as it was created.
    #[must_use]
    pub const fn booking(&self) -> &NewReservation {
        &self.booking
    }

    /// The booked cabin.
    #[must_use]
    pub const fn cabin_id(&self) -> CabinId {
        self.booking.cabin_id
    }

    /// The owning guest.
    #[must_use]
    pub const fn guest_id(&self) -> GuestId {
        self.booking.guest_id
    }

    /// The stay.
    #[must_use]
    pub const fn range(&self) -> &DateRange {
        &self.booking.range
    }

    /// Number of guests staying.
    #[must_use]
    pub const fn guests(&self) -> u32 {
        self.booking.guests
    }

    /// Total charged, frozen at creation.
    #[must_use]
    pub const fn total_price(&self) -> Decimal {
        self.booking.total_price
    }

    /// Returns true if this reservation holds `cabin_id` during `range`.
    #[must_use]
    pub fn blocks(&self, cabin_id: CabinId, range: &DateRange) -> bool {
        self.booking.cabin_id == cabin_id
            && self.status.is_blocking()
            && self.booking.range.overlaps(range)
    }

    /// Returns a copy in a different state.
    #[must_use]
    pub fn with_status(&self, status: ReservationStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

/// Builder for [`NewReservation`].
#[derive(Debug, Clone)]
pub struct ReservationBuilder {
    cabin_id: CabinId,
    guest_id: GuestId,
    range: DateRange,
    guests: u32,
    addon_included: bool,
    total_price: Decimal,
    created_at: Option<SystemTime>,
    note: Option<String>,
}

impl ReservationBuilder {
    /// Sets the guest count (default 1).
    #[must_use]
    pub const fn guests(mut self, guests: u32) -> Self {
        self.guests = guests;
        self
    }

    /// Sets whether breakfast is included.
    #[must_use]
    pub const fn addon_included(mut self, addon_included: bool) -> Self {
        self.addon_included = addon_included;
        self
    }

    /// Sets the frozen total.
    #[must_use]
    pub const fn total_price(mut self, total_price: Decimal) -> Self {
        self.total_price = total_price;
        self
    }

    /// Sets the creation timestamp (default now).
    #[must_use]
    pub const fn created_at(mut self, created_at: SystemTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets the guest's note.
    #[must_use]
    pub fn note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }

    /// Validates and builds the booking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the guest count is zero or the
    /// total is negative.
    pub fn build(self) -> Result<NewReservation> {
        if self.guests == 0 {
            return Err(Error::invalid_input("guests", "must be at least 1"));
        }
        if self.total_price < Decimal::ZERO {
            return Err(Error::invalid_input(
                "total_price",
                format!("{} is negative", self.total_price),
            ));
        }

        let note = self
            .note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(NewReservation {
            cabin_id: self.cabin_id,
            guest_id: self.guest_id,
            range: self.range,
            guests: self.guests,
            addon_included: self.addon_included,
            total_price: self.total_price,
            created_at: self.created_at.unwrap_or_else(SystemTime::now),
            note,
        })
    }
}

/// Serde helpers storing `SystemTime` as whole seconds since the epoch.
pub(crate) mod unix_secs {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error> {
        let secs = time
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        serializer.serialize_u64(secs)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SystemTime, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(UNIX_EPOCH + Duration::from_secs(secs))
    }
}
