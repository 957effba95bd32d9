//! Reservation and review writes.
//!
//! The associated functions here take a `&Connection` and expect to run
//! inside a write transaction opened with [`Database::begin_write`]; the
//! plan executor composes them. The `&mut self` wrappers open and commit
//! their own transaction.

use std::time::SystemTime;

use rusqlite::{params, Connection};

use crate::availability::AvailabilityIndex;
use crate::error::{Error, Result};
use crate::reservation::{NewReservation, Reservation, ReservationId, ReservationStatus};
use crate::review::{Review, ReviewSubmission};

use super::connection::Database;
use super::operations::systemtime_to_unix_secs;

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (cabin_id, guest_id, check_in, check_out, num_guests, breakfast_included,
     total_price, status, note, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
";

const UPDATE_STATUS_IF: &str = "UPDATE reservations SET status = ?3 WHERE id = ?1 AND status = ?2";

const UPSERT_REVIEW: &str = r"
    INSERT INTO reviews
    (reservation_id, guest_id, cabin_id, rating, comment, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
    ON CONFLICT(reservation_id) DO UPDATE SET
        rating = excluded.rating,
        comment = excluded.comment,
        updated_at = excluded.updated_at
";

const DELETE_RESERVATION: &str = "DELETE FROM reservations WHERE id = ?";

impl Database {
    /// Inserts a booking after re-checking availability against the stored
    /// blocking reservations of its cabin.
    ///
    /// Run inside a write transaction, the check and the insert are atomic:
    /// no other writer can add an overlapping stay in between.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] if a blocking reservation overlaps,
    /// [`Error::NotFound`] if the cabin does not exist, or a database error.
    pub fn insert_reservation_checked(
        conn: &Connection,
        booking: &NewReservation,
    ) -> Result<Reservation> {
        if Self::get_cabin(conn, booking.cabin_id())?.is_none() {
            return Err(Error::NotFound {
                resource: format!("cabin {}", booking.cabin_id()),
            });
        }

        let existing = Self::blocking_reservations(conn, booking.cabin_id())?;
        let index = AvailabilityIndex::new(booking.cabin_id(), &existing);
        let conflicts: Vec<ReservationId> = index
            .conflicts(booking.range())
            .iter()
            .map(|r| r.id())
            .collect();
        if !conflicts.is_empty() {
            return Err(Error::Unavailable {
                cabin: booking.cabin_id(),
                range: *booking.range(),
                conflicts,
            });
        }

        let range = booking.range();
        conn.execute(
            INSERT_RESERVATION,
            params![
                booking.cabin_id().value(),
                booking.guest_id().value(),
                range.start().to_string(),
                range.end().to_string(),
                booking.guests(),
                booking.addon_included(),
                booking.total_price().to_string(),
                ReservationStatus::Unconfirmed.as_str(),
                booking.note(),
                systemtime_to_unix_secs(booking.created_at())?,
            ],
        )?;

        let id = ReservationId::new(conn.last_insert_rowid());
        Ok(booking.clone().into_reservation(id))
    }

    /// Sets the status of `id` to `to` only if it is still `from`.
    ///
    /// Returns false when no row matched, meaning the reservation is gone or
    /// another writer moved it first.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn compare_and_set_status(
        conn: &Connection,
        id: ReservationId,
        from: ReservationStatus,
        to: ReservationStatus,
    ) -> Result<bool> {
        let changed = conn.execute(UPDATE_STATUS_IF, params![id.value(), from.as_str(), to.as_str()])?;
        Ok(changed == 1)
    }

    /// Stores a review, replacing the rating and comment of an earlier review
    /// of the same reservation. The original `created_at` is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn upsert_review(
        conn: &Connection,
        submission: &ReviewSubmission,
        now: SystemTime,
    ) -> Result<Review> {
        conn.execute(
            UPSERT_REVIEW,
            params![
                submission.reservation_id.value(),
                submission.guest_id.value(),
                submission.cabin_id.value(),
                i64::from(submission.rating),
                submission.comment,
                systemtime_to_unix_secs(now)?,
            ],
        )?;

        Self::get_review(conn, submission.reservation_id)?.ok_or_else(|| Error::NotFound {
            resource: format!("review of reservation {}", submission.reservation_id),
        })
    }

    /// Deletes a reservation and, through the foreign key, its review.
    ///
    /// Returns false if there was nothing to delete.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_reservation_simple(conn: &Connection, id: ReservationId) -> Result<bool> {
        Ok(conn.execute(DELETE_RESERVATION, [id.value()])? > 0)
    }

    /// Inserts a booking in its own write transaction.
    ///
    /// # Errors
    ///
    /// See [`Database::insert_reservation_checked`]; also returns
    /// [`Error::LockTimeout`] if the write lock is not acquired in time.
    pub fn insert_reservation(&mut self, booking: &NewReservation) -> Result<Reservation> {
        let result = (|| -> Result<Reservation> {
            let tx = self.begin_write()?;
            let reservation = Self::insert_reservation_checked(&tx, booking)?;
            tx.commit()?;
            Ok(reservation)
        })();

        result
            .inspect(|r| log::info!("booked reservation {} on cabin {}", r.id(), r.cabin_id()))
            .map_err(|e| self.translate_error(e))
    }
}
