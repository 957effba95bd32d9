//! Read-only questions about cabins: availability and price quotes.

use rusqlite::Connection;

use crate::availability::AvailabilityIndex;
use crate::cabin::{Cabin, CabinId};
use crate::database::Database;
use crate::date_range::DateRange;
use crate::error::{Error, Result};
use crate::pricing::{PriceQuote, PricingPolicy};

fn load_cabin(conn: &Connection, cabin_id: CabinId) -> Result<Cabin> {
    Database::get_cabin(conn, cabin_id)?.ok_or_else(|| Error::NotFound {
        resource: format!("cabin {cabin_id}"),
    })
}

/// Returns true if no blocking reservation of the cabin overlaps `range`.
///
/// The answer is a snapshot; booking re-checks under the write lock.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the cabin does not exist.
pub fn is_available(conn: &Connection, cabin_id: CabinId, range: &DateRange) -> Result<bool> {
    let cabin = load_cabin(conn, cabin_id)?;
    let existing = Database::blocking_reservations(conn, cabin.id())?;
    Ok(AvailabilityIndex::new(cabin.id(), &existing).is_available(range))
}

/// Prices a prospective stay without checking availability.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the cabin does not exist, or
/// [`Error::InvalidInput`] if `guests` is zero.
pub fn quote(
    conn: &Connection,
    pricing: &PricingPolicy,
    cabin_id: CabinId,
    range: &DateRange,
    guests: u32,
    addon_included: bool,
) -> Result<PriceQuote> {
    let cabin = load_cabin(conn, cabin_id)?;
    pricing.quote(&cabin, range, guests, addon_included)
}
