//! Availability checks.
//!
//! Everything here is pure: callers load the candidate reservations and
//! these functions decide whether a date range is free. Only reservations
//! on the same cabin in a blocking state (unconfirmed or checked in) take
//! up dates.

use crate::cabin::CabinId;
use crate::date_range::DateRange;
use crate::reservation::{Reservation, ReservationId};

/// Blocking stays of one cabin, sorted by arrival date.
///
/// # Examples
///
/// ```
/// use rentbnb::{AvailabilityIndex, CabinId, DateRange};
///
/// let index = AvailabilityIndex::new(CabinId::new(1), &[]);
/// let range = DateRange::parse("2024-08-01", "2024-08-02").unwrap();
/// assert!(index.is_available(&range));
/// ```
#[derive(Debug, Clone)]
pub struct AvailabilityIndex<'a> {
    cabin_id: CabinId,
    stays: Vec<&'a Reservation>,
}

impl<'a> AvailabilityIndex<'a> {
    /// Indexes the blocking reservations of `cabin_id` among `existing`.
    ///
    /// Reservations for other cabins or in non-blocking states are ignored,
    /// so callers may pass an unfiltered set.
    #[must_use]
    pub fn new(cabin_id: CabinId, existing: &'a [Reservation]) -> Self {
        let mut stays: Vec<&Reservation> = existing
            .iter()
            .filter(|r| r.cabin_id() == cabin_id && r.status().is_blocking())
            .collect();
        stays.sort_by_key(|r| r.range().start());
        Self { cabin_id, stays }
    }

    /// The indexed cabin.
    #[must_use]
    pub const fn cabin_id(&self) -> CabinId {
        self.cabin_id
    }

    /// Number of blocking stays indexed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stays.len()
    }

    /// Returns true if the cabin has no blocking stays.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stays.is_empty()
    }

    /// Blocking stays that overlap `candidate`, in arrival order.
    #[must_use]
    pub fn conflicts(&self, candidate: &DateRange) -> Vec<&'a Reservation> {
        self.stays
            .iter()
            .take_while(|r| r.range().start() < candidate.end())
            .filter(|r| r.range().overlaps(candidate))
            .copied()
            .collect()
    }

    /// Returns true if no blocking stay overlaps `candidate`.
    #[must_use]
    pub fn is_available(&self, candidate: &DateRange) -> bool {
        !self
            .stays
            .iter()
            .take_while(|r| r.range().start() < candidate.end())
            .any(|r| r.range().overlaps(candidate))
    }
}

/// Returns false iff a blocking reservation of `cabin_id` in `existing`
/// overlaps `candidate`.
///
/// # Examples
///
/// ```
/// use rentbnb::availability::is_available;
/// use rentbnb::{CabinId, DateRange};
///
/// let range = DateRange::parse("2024-08-01", "2024-08-03").unwrap();
/// assert!(is_available(CabinId::new(4), &range, &[]));
/// ```
#[must_use]
pub fn is_available(cabin_id: CabinId, candidate: &DateRange, existing: &[Reservation]) -> bool {
    existing.iter().all(|r| !r.blocks(cabin_id, candidate))
}

/// Identifiers of the reservations that block `candidate` on `cabin_id`.
#[must_use]
pub fn conflicts(
    cabin_id: CabinId,
    candidate: &DateRange,
    existing: &[Reservation],
) -> Vec<ReservationId> {
    existing
        .iter()
        .filter(|r| r.blocks(cabin_id, candidate))
        .map(Reservation::id)
        .collect()
}


#[cfg(test)]
mod proptests;
