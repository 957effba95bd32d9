//! Error types for the rentbnb library.
//!
//! The engine variants (`InvalidInput`, `Unavailable`, `InvalidTransition`,
//! `NotFound`, `Forbidden`) describe why a booking operation was refused.
//! The remaining variants cover storage, configuration and I/O failures.

use std::path::PathBuf;

use thiserror::Error;

use crate::cabin::CabinId;
use crate::date_range::DateRange;
use crate::lifecycle::Transition;
use crate::reservation::{ReservationId, ReservationStatus};

/// Result type alias for operations that may fail with a rentbnb error.
///
/// # Examples
///
/// ```
/// use rentbnb::{Error, Result};
///
/// fn nights_or_fail(nights: u32) -> Result<u32> {
///     if nights == 0 {
///         return Err(Error::InvalidInput {
///             field: "nights".to_string(),
///             message: "must be at least 1".to_string(),
///         });
///     }
///     Ok(nights)
/// }
///
/// assert!(nights_or_fail(0).is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the rentbnb library.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied value was malformed or out of range.
    #[error("invalid {field}: {message}")]
    InvalidInput {
        /// The offending input.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// The requested dates overlap a blocking reservation on the cabin.
    #[error(
        "cabin {cabin} is unavailable for {range} (conflicts with {} reservation(s))",
        conflicts.len()
    )]
    Unavailable {
        /// The cabin that was requested.
        cabin: CabinId,
        /// The requested stay.
        range: DateRange,
        /// Reservations that block the request.
        conflicts: Vec<ReservationId>,
    },

    /// The operation is not permitted from the reservation's current state.
    #[error("cannot {operation} reservation {reservation} while it is {from}")]
    InvalidTransition {
        /// The reservation the operation targeted.
        reservation: ReservationId,
        /// The state the reservation was in.
        from: ReservationStatus,
        /// The attempted operation.
        operation: Transition,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// The actor is not allowed to perform the operation.
    #[error("forbidden: {details}")]
    Forbidden {
        /// Why the actor was refused.
        details: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: u32,
        /// The schema version found in the database.
        found: u32,
    },
}

impl Error {
    /// Shorthand for building an [`Error::InvalidInput`].
    pub(crate) fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Check if the error means the requested resource does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rentbnb::Error;
    ///
    /// let err = Error::NotFound { resource: "reservation 7".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the error is a refusal by the booking rules rather than a
    /// malfunction: unavailable dates, a disallowed transition or a
    /// forbidden actor.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Unavailable { .. } | Self::InvalidTransition { .. } | Self::Forbidden { .. }
        )
    }

    /// Check if the error came from waiting too long on the database lock.
    #[must_use]
    pub fn is_lock_timeout(&self) -> bool {
        matches!(self, Self::LockTimeout { .. })
    }
}
