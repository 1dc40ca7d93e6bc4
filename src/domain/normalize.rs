// src/domain/normalize.rs

use crate::domain::keywords;
use crate::domain::listing::Listing;
use crate::search::models::RawListing;
use chrono::{LocalResult, TimeZone, Utc};

const SQFT_PER_SQM: f64 = 10.763_91;

// The service reports listing-inserted time in platform date ticks: 100 ns
// units counted from an epoch 621 355 968 000 000 000 ticks before the Unix
// epoch.
const TICKS_BEFORE_UNIX_EPOCH: i64 = 621_355_968_000_000_000;
const TICKS_PER_MILLISECOND: i64 = 10_000;

/// Flattens one raw search record into a canonical `Listing`.
///
/// Total by contract: any missing or malformed field degrades to its
/// empty/zero/unknown default instead of failing the record. The score is
/// left at zero; the pipeline assigns it after filtering.
pub fn normalize(raw: &RawListing, location_label: &str) -> Listing {
    let address = raw.address.clone().unwrap_or_default();
    let description = raw.description.clone();

    let rent_text = rent_display(raw);
    let price = digits_as_price(&rent_text);

    let sqft = first_positive_area(&raw.area_candidates());
    let sqm = sqft / SQFT_PER_SQM;

    let parking_count = raw.parking.as_ref().map(|p| p.len() as i64).unwrap_or(0);

    let basement_blob = format!("{} {}", address, description.as_deref().unwrap_or(""));

    Listing {
        id: raw.id.map(|id| id.to_string()).unwrap_or_default(),
        address,
        rent_text,
        price,
        bedrooms: raw.bedrooms.clone().unwrap_or_default(),
        bathrooms: raw.bathrooms.clone().unwrap_or_default(),
        unit_type: raw.unit_type.clone().unwrap_or_default(),
        sqft,
        sqm,
        land_size: raw.land_size.clone().unwrap_or_default(),
        parking_count,
        garage: has_garage(raw),
        pet_friendly: keywords::classify(description.as_deref(), keywords::mentions_pet_friendly),
        carpet_free: keywords::classify(description.as_deref(), keywords::mentions_carpet_free),
        basement: keywords::mentions_basement(&basement_blob.to_lowercase()),
        date_listed: raw
            .date_listed
            .as_deref()
            .map(ticks_to_date)
            .unwrap_or_default(),
        time_on_market: raw.time_on_market.clone().unwrap_or_default(),
        url: raw.url.clone().unwrap_or_default(),
        location: location_label.to_string(),
        description: description.unwrap_or_default(),
        score: 0,
    }
}

fn rent_display(raw: &RawListing) -> String {
    match &raw.price {
        Some(price) => match (&price.display, price.amount) {
            (Some(display), _) => display.clone(),
            (None, Some(amount)) => format!("${amount:.0}"),
            (None, None) => String::new(),
        },
        None => String::new(),
    }
}

/// Strips everything but digits and parses what is left; 0 when nothing
/// remains ("$2,000" -> 2000, "Please contact" -> 0).
fn digits_as_price(text: &str) -> i64 {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// First candidate that parses to a positive measurement wins; 0 otherwise.
fn first_positive_area(candidates: &[Option<&str>]) -> f64 {
    for candidate in candidates.iter().flatten() {
        if let Some(value) = parse_measurement(candidate) {
            if value > 0.0 {
                return value;
            }
        }
    }
    0.0
}

/// Parses a measurement like "850 sqft" or a range like "1000-1200 sqft".
/// Ranges resolve to their arithmetic mean. Only the leading numeric token
/// is read, so unit spellings like "sq.ft." cannot corrupt the value.
fn parse_measurement(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let (low, rest) = leading_number(&text[start..])?;

    if let Some(after_dash) = rest.trim_start().strip_prefix('-') {
        if let Some((high, _)) = leading_number(after_dash.trim_start()) {
            return Some((low + high) / 2.0);
        }
    }

    Some(low)
}

/// Splits off the numeric token at the head of `text`. Thousands separators
/// are tolerated ("1,050" -> 1050).
fn leading_number(text: &str) -> Option<(f64, &str)> {
    let end = text
        .find(|c: char| !c.is_ascii_digit() && c != '.' && c != ',')
        .unwrap_or(text.len());
    let value: f64 = text[..end].replace(',', "").parse().ok()?;
    Some((value, &text[end..]))
}

fn has_garage(raw: &RawListing) -> bool {
    let in_entries = raw.parking.as_ref().is_some_and(|entries| {
        entries.iter().any(|entry| {
            entry
                .name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains("garage"))
        })
    });

    let in_type = raw
        .parking_type
        .as_deref()
        .is_some_and(|t| t.to_lowercase().contains("garage"));

    in_entries || in_type
}

/// Converts a tick timestamp to `YYYY-MM-DD`. Anything that does not parse
/// or convert cleanly comes back unchanged, so the report still shows the
/// raw value instead of losing the record.
fn ticks_to_date(raw: &str) -> String {
    let ticks: i64 = match raw.trim().parse() {
        Ok(t) => t,
        Err(_) => return raw.to_string(),
    };

    // Ticks near i64::MIN would overflow the epoch shift; treat them as
    // unconvertible rather than letting the subtraction blow up.
    let millis = match ticks.checked_sub(TICKS_BEFORE_UNIX_EPOCH) {
        Some(shifted) => shifted / TICKS_PER_MILLISECOND,
        None => return raw.to_string(),
    };
    match Utc.timestamp_millis_opt(millis) {
        LocalResult::Single(dt) => dt.format("%Y-%m-%d").to_string(),
        _ => raw.to_string(),
    }
}
