// src/domain/listing.rs

/// Three-valued amenity flag: text evidence present, contradicted, or absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Yes,
    No,
    Unknown,
}

impl Presence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Presence::Yes => "yes",
            Presence::No => "no",
            Presence::Unknown => "unknown",
        }
    }
}

/// A listing as flattened and normalized from the raw search record, ready
/// for filtering, scoring and export. Acts as the anti-corruption layer
/// between the wire shape and everything downstream.
///
/// Every field has a defined default so normalization can never fail;
/// missing upstream data degrades to empty/zero/unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: String,
    pub address: String,
    pub rent_text: String,
    pub price: i64,

    pub bedrooms: String,
    pub bathrooms: String,
    pub unit_type: String,

    pub sqft: f64,
    pub sqm: f64,
    pub land_size: String,

    pub parking_count: i64,
    pub garage: bool,
    pub pet_friendly: Presence,
    pub carpet_free: Presence,
    pub basement: bool,

    pub date_listed: String,
    pub time_on_market: String,
    pub url: String,
    pub location: String,
    pub description: String,

    pub score: i64,
}

impl Listing {
    /// Price per interior square foot, rounded to 2 decimals. Zero when
    /// either side is missing.
    pub fn price_per_sqft(&self) -> f64 {
        if self.price > 0 && self.sqft > 0.0 {
            (self.price as f64 / self.sqft * 100.0).round() / 100.0
        } else {
            0.0
        }
    }
}
