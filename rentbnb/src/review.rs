//! Guest reviews of completed stays.

use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::cabin::CabinId;
use crate::error::{Error, Result};
use crate::reservation::{unix_secs, GuestId, ReservationId};

/// Storage-assigned identifier of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(i64);

impl ReviewId {
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

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A star rating between [`Rating::MIN`] and [`Rating::MAX`].
///
/// # Examples
///
/// ```
/// use rentbnb::Rating;
///
/// assert_eq!(Rating::new(4).unwrap().value(), 4);
/// assert!(Rating::new(0).is_err());
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Creates a rating.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `value` is outside `1..=5`.
    pub fn new(value: i64) -> Result<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or_else(|| {
                Error::invalid_input(
                    "rating",
                    format!("{value} is not between {} and {}", Self::MIN, Self::MAX),
                )
            })
    }

    /// Returns the numeric rating.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        Self::from(rating.0)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// A review the engine accepted, ready to be upserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    /// The reviewed stay.
    pub reservation_id: ReservationId,
    /// The reviewing guest.
    pub guest_id: GuestId,
    /// The cabin, copied from the reservation.
    pub cabin_id: CabinId,
    /// The rating.
    pub rating: Rating,
    /// Free-text comment, possibly empty.
    pub comment: String,
}

/// A stored review. There is at most one per reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// The review identifier.
    pub id: ReviewId,
    /// The reviewed stay.
    pub reservation_id: ReservationId,
    /// The reviewing guest.
    pub guest_id: GuestId,
    /// The reviewed cabin.
    pub cabin_id: CabinId,
    /// The rating.
    pub rating: Rating,
    /// Free-text comment.
    pub comment: String,
    /// When the review was first submitted.
    #[serde(with = "unix_secs")]
    pub created_at: SystemTime,
    /// When the review was last replaced.
    #[serde(with = "unix_secs")]
    pub updated_at: SystemTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        for value in 1..=5 {
            assert!(Rating::new(value).is_ok());
        }
        for value in [-1, 0, 6, 255, 256, i64::MAX] {
            let err = Rating::new(value).unwrap_err();
            assert!(matches!(err, Error::InvalidInput { ref field, .. } if field == "rating"));
        }
    }

    #[test]
    fn test_rating_serde() {
        let rating: Rating = serde_json::from_str("3").unwrap();
        assert_eq!(rating.value(), 3);
        assert_eq!(serde_json::to_string(&rating).unwrap(), "3");
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn test_rating_display() {
        assert_eq!(Rating::new(5).unwrap().to_string(), "5/5");
    }
}
