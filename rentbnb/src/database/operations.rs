//! Database reads and cabin inventory writes.
//!
//! Reads are associated functions taking a `&Connection` so they work both
//! on a plain connection and inside an open transaction. Reservation and
//! review writes live in the `transaction` module.

use std::str::FromStr;
use std::time::{Duration, SystemTime};

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::cabin::{Cabin, CabinDetails, CabinId};
use crate::date_range::{DateRange, DATE_FORMAT};
use crate::error::{Error, Result};
use crate::reservation::{GuestId, NewReservation, Reservation, ReservationId, ReservationStatus};
use crate::review::{Rating, Review, ReviewId};

use super::connection::Database;

/// Converts a `SystemTime` to Unix epoch seconds for database storage.
///
/// # Errors
///
/// Returns an error if the time is before the Unix epoch.
#[allow(clippy::cast_possible_wrap)]
pub(super) fn systemtime_to_unix_secs(time: SystemTime) -> Result<i64> {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| Error::Validation {
            field: "timestamp".into(),
            message: format!("Invalid timestamp: {e}"),
        })
        .map(|d| d.as_secs() as i64)
}

/// Converts Unix epoch seconds from the database to a `SystemTime`.
#[allow(clippy::cast_sign_loss)]
pub(super) fn unix_secs_to_systemtime(secs: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
}

fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text).map_err(|e| conversion_error(idx, e))
}

fn date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let text: String = row.get(idx)?;
    NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(|e| conversion_error(idx, e))
}

pub(super) const CABIN_COLUMNS: &str =
    "id, name, cabin_number, capacity, price_per_night, description, amenities, image_url";

/// Maps a row selected with [`CABIN_COLUMNS`].
pub(super) fn row_to_cabin(row: &Row<'_>) -> rusqlite::Result<Cabin> {
    let details = CabinDetails::builder(
        row.get::<_, String>(1)?,
        row.get::<_, String>(2)?,
        row.get(3)?,
        decimal_column(row, 4)?,
    )
    .description(row.get(5)?)
    .amenities(row.get(6)?)
    .image_url(row.get(7)?)
    .build()
    .map_err(|e| conversion_error(1, e))?;

    Ok(Cabin::new(CabinId::new(row.get(0)?), details))
}

pub(super) const RESERVATION_COLUMNS: &str = "id, cabin_id, guest_id, check_in, check_out, \
     num_guests, breakfast_included, total_price, status, note, created_at";

/// Maps a row selected with [`RESERVATION_COLUMNS`].
pub(super) fn row_to_reservation(row: &Row<'_>) -> rusqlite::Result<Reservation> {
    let range = DateRange::new(date_column(row, 3)?, date_column(row, 4)?)
        .map_err(|e| conversion_error(3, e))?;
    let status = row
        .get::<_, String>(8)?
        .parse::<ReservationStatus>()
        .map_err(|e| conversion_error(8, e))?;

    let booking = NewReservation::builder(
        CabinId::new(row.get(1)?),
        GuestId::new(row.get(2)?),
        range,
    )
    .guests(row.get(5)?)
    .addon_included(row.get(6)?)
    .total_price(decimal_column(row, 7)?)
    .note(row.get(9)?)
    .created_at(unix_secs_to_systemtime(row.get(10)?))
    .build()
    .map_err(|e| conversion_error(5, e))?;

    Ok(Reservation::from_parts(
        ReservationId::new(row.get(0)?),
        status,
        booking,
    ))
}

pub(super) const REVIEW_COLUMNS: &str =
    "id, reservation_id, guest_id, cabin_id, rating, comment, created_at, updated_at";

/// Maps a row selected with [`REVIEW_COLUMNS`].
pub(super) fn row_to_review(row: &Row<'_>) -> rusqlite::Result<Review> {
    let rating = Rating::new(row.get(4)?)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Integer, Box::new(e)))?;

    Ok(Review {
        id: ReviewId::new(row.get(0)?),
        reservation_id: ReservationId::new(row.get(1)?),
        guest_id: GuestId::new(row.get(2)?),
        cabin_id: CabinId::new(row.get(3)?),
        rating,
        comment: row.get(5)?,
        created_at: unix_secs_to_systemtime(row.get(6)?),
        updated_at: unix_secs_to_systemtime(row.get(7)?),
    })
}

const INSERT_CABIN: &str = r"
    INSERT INTO cabins
    (name, cabin_number, capacity, price_per_night, description, amenities, image_url, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
";

const UPDATE_CABIN: &str = r"
    UPDATE cabins
    SET name = ?2, cabin_number = ?3, capacity = ?4, price_per_night = ?5,
        description = ?6, amenities = ?7, image_url = ?8
    WHERE id = ?1
";

const DELETE_CABIN: &str = "DELETE FROM cabins WHERE id = ?";

const COUNT_CABIN_RESERVATIONS: &str = "SELECT COUNT(*) FROM reservations WHERE cabin_id = ?";

const COUNT_CABIN_NUMBER: &str =
    "SELECT COUNT(*) FROM cabins WHERE cabin_number = ?1 AND id IS NOT ?2";

const LIST_RESERVATIONS_FILTERED: &str = r"
    WHERE (?1 IS NULL OR status = ?1)
      AND (?2 IS NULL OR cabin_id = ?2)
      AND (?3 IS NULL OR guest_id = ?3)
    ORDER BY check_in, id
";

/// Narrows [`Database::list_reservations`]. Unset fields match everything.
///
/// # Examples
///
/// ```
/// use rentbnb::database::ReservationFilter;
/// use rentbnb::{CabinId, ReservationStatus};
///
/// let filter = ReservationFilter::new()
///     .with_cabin(CabinId::new(2))
///     .with_status(ReservationStatus::Unconfirmed);
/// assert_eq!(filter.cabin_id, Some(CabinId::new(2)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    /// Only reservations in this state.
    pub status: Option<ReservationStatus>,
    /// Only reservations of this cabin.
    pub cabin_id: Option<CabinId>,
    /// Only reservations of this guest.
    pub guest_id: Option<GuestId>,
}

impl ReservationFilter {
    /// A filter matching every reservation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one status.
    #[must_use]
    pub const fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to one cabin.
    #[must_use]
    pub const fn with_cabin(mut self, cabin_id: CabinId) -> Self {
        self.cabin_id = Some(cabin_id);
        self
    }

    /// Restricts to one guest.
    #[must_use]
    pub const fn with_guest(mut self, guest_id: GuestId) -> Self {
        self.guest_id = Some(guest_id);
        self
    }
}

impl Database {
    /// Adds a cabin to the inventory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if another cabin already uses the
    /// cabin number, or a database error.
    pub fn insert_cabin(&mut self, details: &CabinDetails) -> Result<Cabin> {
        let tx = self.begin_write()?;
        ensure_unique_cabin_number(&tx, details.cabin_number(), None)?;

        let now = systemtime_to_unix_secs(SystemTime::now())?;
        tx.execute(
            INSERT_CABIN,
            params![
                details.name(),
                details.cabin_number(),
                details.capacity(),
                details.price_per_night().to_string(),
                details.description(),
                details.amenities(),
                details.image_url(),
                now,
            ],
        )?;
        let id = CabinId::new(tx.last_insert_rowid());
        tx.commit()?;

        log::info!("added cabin {id} ({})", details.cabin_number());
        Ok(Cabin::new(id, details.clone()))
    }

    /// Replaces a cabin's details. Existing reservations keep their price.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the cabin does not exist, or
    /// [`Error::InvalidInput`] if the new cabin number is taken.
    pub fn update_cabin(&mut self, id: CabinId, details: &CabinDetails) -> Result<Cabin> {
        let tx = self.begin_write()?;
        ensure_unique_cabin_number(&tx, details.cabin_number(), Some(id))?;

        let changed = tx.execute(
            UPDATE_CABIN,
            params![
                id.value(),
                details.name(),
                details.cabin_number(),
                details.capacity(),
                details.price_per_night().to_string(),
                details.description(),
                details.amenities(),
                details.image_url(),
            ],
        )?;
        if changed == 0 {
            return Err(Error::NotFound {
                resource: format!("cabin {id}"),
            });
        }
        tx.commit()?;

        log::info!("updated cabin {id}");
        Ok(Cabin::new(id, details.clone()))
    }

    /// Removes a cabin that has never been booked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the cabin does not exist, or
    /// [`Error::InvalidInput`] if any reservation (in any state) refers to it.
    pub fn delete_cabin(&mut self, id: CabinId) -> Result<()> {
        let tx = self.begin_write()?;

        let booked: i64 = tx.query_row(COUNT_CABIN_RESERVATIONS, [id.value()], |row| row.get(0))?;
        if booked > 0 {
            return Err(Error::invalid_input(
                "cabin",
                format!("cabin {id} still has {booked} reservation(s)"),
            ));
        }

        if tx.execute(DELETE_CABIN, [id.value()])? == 0 {
            return Err(Error::NotFound {
                resource: format!("cabin {id}"),
            });
        }
        tx.commit()?;

        log::info!("removed cabin {id}");
        Ok(())
    }

    /// Looks up a cabin by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_cabin(conn: &Connection, id: CabinId) -> Result<Option<Cabin>> {
        let sql = format!("SELECT {CABIN_COLUMNS} FROM cabins WHERE id = ?");
        Ok(conn
            .query_row(&sql, [id.value()], row_to_cabin)
            .optional()?)
    }

    /// Looks up a cabin by its operator-facing number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_cabin_by_number(conn: &Connection, cabin_number: &str) -> Result<Option<Cabin>> {
        let sql = format!("SELECT {CABIN_COLUMNS} FROM cabins WHERE cabin_number = ?");
        Ok(conn
            .query_row(&sql, [cabin_number.trim()], row_to_cabin)
            .optional()?)
    }

    /// Lists every cabin, ordered by cabin number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_cabins(conn: &Connection) -> Result<Vec<Cabin>> {
        let sql = format!("SELECT {CABIN_COLUMNS} FROM cabins ORDER BY cabin_number, id");
        let mut stmt = conn.prepare(&sql)?;
        let cabins = stmt
            .query_map([], row_to_cabin)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cabins)
    }

    /// Looks up a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?");
        Ok(conn
            .query_row(&sql, [id.value()], row_to_reservation)
            .optional()?)
    }

    /// Lists reservations matching `filter`, by arrival date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations(
        conn: &Connection,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations {LIST_RESERVATIONS_FILTERED}"
        );
        let mut stmt = conn.prepare(&sql)?;
        let reservations = stmt
            .query_map(
                params![
                    filter.status.map(ReservationStatus::as_str),
                    filter.cabin_id.map(CabinId::value),
                    filter.guest_id.map(GuestId::value),
                ],
                row_to_reservation,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }

    /// Reservations that currently hold dates on `cabin_id`.
    ///
    /// This is the input set availability is decided against.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn blocking_reservations(conn: &Connection, cabin_id: CabinId) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations
             WHERE cabin_id = ?1 AND status IN (?2, ?3)
             ORDER BY check_in"
        );
        let [first, second] = ReservationStatus::BLOCKING;
        let mut stmt = conn.prepare(&sql)?;
        let reservations = stmt
            .query_map(
                params![cabin_id.value(), first.as_str(), second.as_str()],
                row_to_reservation,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }

    /// The review of a reservation, if one was submitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_review(conn: &Connection, reservation_id: ReservationId) -> Result<Option<Review>> {
        let sql = format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE reservation_id = ?");
        Ok(conn
            .query_row(&sql, [reservation_id.value()], row_to_review)
            .optional()?)
    }

    /// Reviews of a cabin, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reviews_for_cabin(conn: &Connection, cabin_id: CabinId) -> Result<Vec<Review>> {
        let sql = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE cabin_id = ? ORDER BY created_at DESC, id DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let reviews = stmt
            .query_map([cabin_id.value()], row_to_review)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reviews)
    }

    /// Runs `SQLite`'s integrity check.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseCorruption`] if the check reports problems.
    pub fn verify_integrity(&self) -> Result<()> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

        if result == "ok" {
            Ok(())
        } else {
            Err(Error::DatabaseCorruption {
                details: format!("Integrity check failed: {result}"),
            })
        }
    }
}

fn ensure_unique_cabin_number(
    conn: &Connection,
    cabin_number: &str,
    except: Option<CabinId>,
) -> Result<()> {
    let taken: i64 = conn.query_row(
        COUNT_CABIN_NUMBER,
        params![cabin_number, except.map(CabinId::value)],
        |row| row.get(0),
    )?;
    if taken > 0 {
        return Err(Error::invalid_input(
            "cabin_number",
            format!("cabin number '{cabin_number}' is already in use"),
        ));
    }
    Ok(())
}
