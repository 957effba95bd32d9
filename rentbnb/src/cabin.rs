//! Cabin inventory types.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Storage-assigned identifier of a cabin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CabinId(i64);

impl CabinId {
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

impl fmt::Display for CabinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The operator-editable description of a cabin.
///
/// Built through [`CabinDetails::builder`], which validates every field.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rentbnb::CabinDetails;
///
/// let details = CabinDetails::builder("Lakeside", "001", 4, Decimal::new(12000, 2))
///     .amenities(Some("sauna, canoe".to_string()))
///     .build()
///     .unwrap();
/// assert_eq!(details.capacity(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CabinDetails {
    name: String,
    cabin_number: String,
    capacity: u32,
    price_per_night: Decimal,
    description: Option<String>,
    amenities: Option<String>,
    image_url: Option<String>,
}

impl CabinDetails {
    /// Starts building cabin details from the required fields.
    #[must_use]
    pub fn builder(
        name: impl Into<String>,
        cabin_number: impl Into<String>,
        capacity: u32,
        price_per_night: Decimal,
    ) -> CabinDetailsBuilder {
        CabinDetailsBuilder {
            name: name.into(),
            cabin_number: cabin_number.into(),
            capacity,
            price_per_night,
            description: None,
            amenities: None,
            image_url: None,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operator-facing label, unique across cabins.
    #[must_use]
    pub fn cabin_number(&self) -> &str {
        &self.cabin_number
    }

    /// Maximum number of guests.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Current nightly rate.
    #[must_use]
    pub const fn price_per_night(&self) -> Decimal {
        self.price_per_night
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Free-text amenities list.
    #[must_use]
    pub fn amenities(&self) -> Option<&str> {
        self.amenities.as_deref()
    }

    /// Image location; the image itself is stored elsewhere.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Returns a builder pre-filled with these details, for edits.
    #[must_use]
    pub fn to_builder(&self) -> CabinDetailsBuilder {
        CabinDetailsBuilder {
            name: self.name.clone(),
            cabin_number: self.cabin_number.clone(),
            capacity: self.capacity,
            price_per_night: self.price_per_night,
            description: self.description.clone(),
            amenities: self.amenities.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// Builder for [`CabinDetails`].
#[derive(Debug, Clone)]
pub struct CabinDetailsBuilder {
    name: String,
    cabin_number: String,
    capacity: u32,
    price_per_night: Decimal,
    description: Option<String>,
    amenities: Option<String>,
    image_url: Option<String>,
}

impl CabinDetailsBuilder {
    /// Sets the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the cabin number.
    #[must_use]
    pub fn cabin_number(mut self, cabin_number: impl Into<String>) -> Self {
        self.cabin_number = cabin_number.into();
        self
    }

    /// Sets the capacity.
    #[must_use]
    pub const fn capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the nightly rate.
    #[must_use]
    pub const fn price_per_night(mut self, price: Decimal) -> Self {
        self.price_per_night = price;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Sets the amenities.
    #[must_use]
    pub fn amenities(mut self, amenities: Option<String>) -> Self {
        self.amenities = amenities;
        self
    }

    /// Sets the image URL.
    #[must_use]
    pub fn image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    /// Validates and builds the details.
    ///
    /// Name and cabin number are trimmed and must be non-empty. Optional
    /// text fields that are blank after trimming become `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if a required field is blank, the
    /// capacity is zero, or the nightly rate is negative.
    pub fn build(self) -> Result<CabinDetails> {
        let name = required("name", &self.name)?;
        let cabin_number = required("cabin_number", &self.cabin_number)?;

        if self.capacity == 0 {
            return Err(Error::invalid_input("capacity", "must be at least 1"));
        }
        if self.price_per_night < Decimal::ZERO {
            return Err(Error::invalid_input(
                "price_per_night",
                format!("{} is negative", self.price_per_night),
            ));
        }

        Ok(CabinDetails {
            name,
            cabin_number,
            capacity: self.capacity,
            price_per_night: self.price_per_night,
            description: optional(self.description),
            amenities: optional(self.amenities),
            image_url: optional(self.image_url),
        })
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_input(field, "must be non-empty"));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A persisted cabin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cabin {
    id: CabinId,
    #[serde(flatten)]
    details: CabinDetails,
}

impl Cabin {
    /// Pairs stored details with their identifier.
    #[must_use]
    pub const fn new(id: CabinId, details: CabinDetails) -> Self {
        Self { id, details }
    }

    /// The cabin identifier.
    #[must_use]
    pub const fn id(&self) -> CabinId {
        self.id
    }

    /// The editable details.
    #[must_use]
    pub const fn details(&self) -> &CabinDetails {
        &self.details
    }

    /// Maximum number of guests.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.details.capacity
    }

    /// Current nightly rate.
    #[must_use]
    pub const fn price_per_night(&self) -> Decimal {
        self.details.price_per_night
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.details.name
    }

    /// Operator-facing label.
    #[must_use]
    pub fn cabin_number(&self) -> &str {
        &self.details.cabin_number
    }
}
