//! Half-open stay intervals.
//!
//! A [`DateRange`] covers the nights from `start` up to, but not including,
//! `end`. The departure day of one stay may therefore be the arrival day of
//! the next without the two overlapping.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The date format accepted by [`DateRange::parse`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Years that print as four digits and therefore sort as text in
/// calendar order.
pub const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// A validated, half-open range of calendar dates with `start < end`.
///
/// # Examples
///
/// ```
/// use rentbnb::DateRange;
///
/// let stay = DateRange::parse("2024-06-01", "2024-06-04").unwrap();
/// assert_eq!(stay.nights(), 3);
/// assert_eq!(stay.to_string(), "2024-06-01..2024-06-04");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = Error;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Creates a range from already-parsed dates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `end` is not strictly after `start`,
    /// or if either year falls outside [`YEARS`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use rentbnb::DateRange;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    /// assert!(DateRange::new(day, day).is_err());
    /// ```
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        check_year("start date", start)?;
        check_year("end date", end)?;
        if end <= start {
            return Err(Error::invalid_input(
                "date range",
                format!("end date {end} must be after start date {start}"),
            ));
        }
        Ok(Self { start, end })
    }

    /// Parses a range from two ISO `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if either date is unparsable or if
    /// `end <= start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rentbnb::DateRange;
    ///
    /// assert!(DateRange::parse("2024-03-01", "2024-03-02").is_ok());
    /// assert!(DateRange::parse("2024-03-02", "2024-03-01").is_err());
    /// assert!(DateRange::parse("03/01/2024", "2024-03-02").is_err());
    /// ```
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = parse_date("start date", start)?;
        let end = parse_date("end date", end)?;
        Self::new(start, end)
    }

    /// The arrival date (inclusive).
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// The departure date (exclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of nights in the stay, always at least 1.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn nights(&self) -> u32 {
        // start < end keeps this positive; u32 covers ~11 million years.
        (self.end - self.start).num_days() as u32
    }

    /// Returns true if the two ranges share at least one night.
    ///
    /// # Examples
    ///
    /// ```
    /// use rentbnb::DateRange;
    ///
    /// let a = DateRange::parse("2024-06-01", "2024-06-05").unwrap();
    /// let b = DateRange::parse("2024-06-04", "2024-06-08").unwrap();
    /// let c = DateRange::parse("2024-06-05", "2024-06-08").unwrap();
    /// assert!(a.overlaps(&b));
    /// assert!(!a.overlaps(&c));
    /// ```
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns true if the guest is in the cabin on the night of `date`.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// Parses one ISO `YYYY-MM-DD` date, naming `field` in the error.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `value` is not a valid calendar date.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        Error::invalid_input(field, format!("'{value}' is not a YYYY-MM-DD date ({e})"))
    })?;
    check_year(field, date)?;
    Ok(date)
}

fn check_year(field: &str, date: NaiveDate) -> Result<()> {
    if YEARS.contains(&date.year()) {
        Ok(())
    } else {
        Err(Error::invalid_input(
            field,
            format!("year {} is outside 1..=9999", date.year()),
        ))
    }
}


#[cfg(test)]
mod proptests;
