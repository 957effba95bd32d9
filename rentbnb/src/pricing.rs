//! Stay pricing.
//!
//! A stay costs the nightly rate for every night, plus an optional
//! per-guest, per-night add-on (breakfast). All arithmetic is exact decimal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cabin::Cabin;
use crate::date_range::DateRange;
use crate::error::{Error, Result};

/// Add-on rate used when none is configured: 15 per guest per night.
pub const DEFAULT_ADDON_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 0);

/// Computes the total charge for a stay.
///
/// `total = nightly_rate * nights + (addon_included ? addon_rate * nights * guests : 0)`
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `nights` or `guests` is zero, if a
/// rate is negative, or if the amount does not fit in a decimal.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rentbnb::pricing::{price, DEFAULT_ADDON_RATE};
///
/// let total = price(Decimal::new(100, 0), 3, 2, true, DEFAULT_ADDON_RATE).unwrap();
/// assert_eq!(total, Decimal::new(390, 0));
/// ```
pub fn price(
    nightly_rate: Decimal,
    nights: u32,
    guests: u32,
    addon_included: bool,
    addon_rate: Decimal,
) -> Result<Decimal> {
    let (lodging, addon) = breakdown(nightly_rate, nights, guests, addon_included, addon_rate)?;
    Ok(lodging + addon)
}

// Returns (lodging, addon); their sum is known not to overflow.
fn breakdown(
    nightly_rate: Decimal,
    nights: u32,
    guests: u32,
    addon_included: bool,
    addon_rate: Decimal,
) -> Result<(Decimal, Decimal)> {
    if nights == 0 {
        return Err(Error::invalid_input("nights", "must be at least 1"));
    }
    if guests == 0 {
        return Err(Error::invalid_input("guests", "must be at least 1"));
    }
    non_negative("nightly rate", nightly_rate)?;
    non_negative("add-on rate", addon_rate)?;

    let nights = Decimal::from(nights);
    let lodging = nightly_rate.checked_mul(nights).ok_or_else(overflow)?;
    let addon = if addon_included {
        addon_rate
            .checked_mul(nights)
            .and_then(|a| a.checked_mul(Decimal::from(guests)))
            .ok_or_else(overflow)?
    } else {
        Decimal::ZERO
    };
    lodging.checked_add(addon).ok_or_else(overflow)?;

    Ok((lodging, addon))
}

fn non_negative(field: &str, rate: Decimal) -> Result<()> {
    if rate < Decimal::ZERO {
        return Err(Error::invalid_input(field, format!("{rate} is negative")));
    }
    Ok(())
}

fn overflow() -> Error {
    Error::invalid_input("price", "amount is too large")
}

/// An itemised price for a prospective stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Nightly rate the quote was computed from.
    pub nightly_rate: Decimal,
    /// Number of nights.
    pub nights: u32,
    /// Number of guests.
    pub guests: u32,
    /// Rate times nights.
    pub lodging: Decimal,
    /// Add-on charge, zero when not included.
    pub addon: Decimal,
    /// Amount due.
    pub total: Decimal,
}

/// Pricing rules configured for the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    addon_rate: Decimal,
}

impl PricingPolicy {
    /// Creates a policy with the given add-on rate per guest per night.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the rate is negative.
    pub fn new(addon_rate: Decimal) -> Result<Self> {
        non_negative("add-on rate", addon_rate)?;
        Ok(Self { addon_rate })
    }

    /// Builds the policy from configuration, falling back to the default rate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the configured rate is negative.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        Self::new(config.addon_rate())
    }

    /// The add-on rate per guest per night.
    #[must_use]
    pub const fn addon_rate(&self) -> Decimal {
        self.addon_rate
    }

    /// Prices a stay at `cabin` using its current nightly rate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] under the same conditions as [`price`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use rentbnb::{Cabin, CabinDetails, CabinId, DateRange, PricingPolicy};
    ///
    /// let cabin = Cabin::new(
    ///     CabinId::new(1),
    ///     CabinDetails::builder("Birch", "002", 4, Decimal::new(80, 0)).build().unwrap(),
    /// );
    /// let range = DateRange::parse("2024-05-01", "2024-05-03").unwrap();
    /// let quote = PricingPolicy::default().quote(&cabin, &range, 2, true).unwrap();
    ///
    /// assert_eq!(quote.lodging, Decimal::new(160, 0));
    /// assert_eq!(quote.addon, Decimal::new(60, 0));
    /// assert_eq!(quote.total, Decimal::new(220, 0));
    /// ```
    pub fn quote(
        &self,
        cabin: &Cabin,
        range: &DateRange,
        guests: u32,
        addon_included: bool,
    ) -> Result<PriceQuote> {
        let nights = range.nights();
        let (lodging, addon) = breakdown(
            cabin.price_per_night(),
            nights,
            guests,
            addon_included,
            self.addon_rate,
        )?;
        Ok(PriceQuote {
            nightly_rate: cabin.price_per_night(),
            nights,
            guests,
            lodging,
            addon,
            total: lodging + addon,
        })
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            addon_rate: DEFAULT_ADDON_RATE,
        }
    }
}


#[cfg(test)]
mod proptests;
