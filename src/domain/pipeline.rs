// src/domain/pipeline.rs

use crate::domain::listing::{Listing, Presence};
use crate::domain::normalize::normalize;
use crate::search::models::RawListing;
use std::collections::HashSet;
use tracing::debug;

/// Collects normalized listings across pages, deduplicating by identifier.
/// First occurrence wins; later duplicates are dropped silently. Owned by
/// one pipeline invocation, so runs are independently repeatable.
#[derive(Debug, Default)]
pub struct ListingAccumulator {
    seen: HashSet<String>,
    listings: Vec<Listing>,
}

impl ListingAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingest(&mut self, raw: &RawListing, location_label: &str) {
        let listing = normalize(raw, location_label);

        if !listing.id.is_empty() && !self.seen.insert(listing.id.clone()) {
            debug!(id = %listing.id, "duplicate listing dropped");
            return;
        }

        self.listings.push(listing);
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Ingestion order is preserved; downstream tie-breaking depends on it.
    pub fn into_listings(self) -> Vec<Listing> {
        self.listings
    }
}

/// Keeps listings with at least `min_sqft` of interior area that are not
/// basement units. Pure and deterministic over the input order.
pub fn apply_filters(listings: Vec<Listing>, min_sqft: f64) -> Vec<Listing> {
    listings
        .into_iter()
        .filter(|l| l.sqft >= min_sqft && !l.basement)
        .collect()
}

/// Additive desirability score. Amenity bonuses plus a value term that
/// rewards low price per square foot. Never negative; missing price or
/// area simply contributes nothing.
///
/// The value term divides into a price-per-sqft already rounded to 2
/// decimals. The double rounding is deliberate: correcting it would shift
/// every listing's rank relative to historical reports.
pub fn score(listing: &Listing) -> i64 {
    let mut total = 0;

    if listing.pet_friendly == Presence::Yes {
        total += 100;
    }
    if listing.garage {
        total += 100;
    }
    if listing.carpet_free == Presence::Yes {
        total += 50;
    }
    if listing.sqft >= 700.0 {
        total += 10;
    }

    let per_sqft = listing.price_per_sqft();
    if per_sqft > 0.0 {
        total += (10_000.0 / per_sqft).round() as i64;
    }

    total
}

/// Scores every listing in place.
pub fn score_all(listings: &mut [Listing]) {
    for listing in listings.iter_mut() {
        listing.score = score(listing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str) -> Listing {
        let mut l = crate::domain::normalize::normalize(&RawListing::default(), "");
        l.id = id.to_string();
        l
    }

    fn raw(id: i64, description: &str) -> RawListing {
        RawListing {
            id: Some(id),
            description: Some(description.to_string()),
            ..RawListing::default()
        }
    }

    #[test]
    fn first_occurrence_of_an_id_wins() {
        let mut acc = ListingAccumulator::new();
        acc.ingest(&raw(7, "first copy"), "A");
        acc.ingest(&raw(7, "second copy"), "B");
        acc.ingest(&raw(8, "other"), "A");

        let listings = acc.into_listings();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].id, "7");
        assert_eq!(listings[0].description, "first copy");
        assert_eq!(listings[1].id, "8");
    }

    #[test]
    fn records_without_ids_are_never_treated_as_duplicates() {
        let mut acc = ListingAccumulator::new();
        acc.ingest(&RawListing::default(), "");
        acc.ingest(&RawListing::default(), "");
        assert_eq!(acc.len(), 2);
    }

    #[test]
    fn filter_excludes_small_and_basement_units() {
        let mut small = listing("a");
        small.sqft = 650.0;

        let mut basement = listing("b");
        basement.sqft = 700.0;
        basement.basement = true;

        let mut keeper = listing("c");
        keeper.sqft = 700.0;

        let kept = apply_filters(vec![small, basement, keeper], 700.0);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "c");
    }

    #[test]
    fn score_matches_worked_example() {
        // 100 pet + 100 garage + 50 carpet-free + 10 area
        // + round(10000 / 2.86) = 3497, where 2000/700 rounds to 2.86.
        let mut l = listing("x");
        l.pet_friendly = Presence::Yes;
        l.garage = true;
        l.carpet_free = Presence::Yes;
        l.sqft = 700.0;
        l.price = 2000;
        assert_eq!(score(&l), 3757);
    }

    #[test]
    fn missing_price_or_area_contributes_nothing() {
        let mut priced_only = listing("p");
        priced_only.price = 1500;
        assert_eq!(score(&priced_only), 0);

        let mut area_only = listing("a");
        area_only.sqft = 800.0;
        assert_eq!(score(&area_only), 10);
    }

    #[test]
    fn unknown_amenities_earn_no_bonus() {
        let mut l = listing("u");
        l.sqft = 900.0;
        l.pet_friendly = Presence::Unknown;
        l.carpet_free = Presence::Unknown;
        assert_eq!(score(&l), 10);
    }

    #[test]
    fn score_all_writes_scores_in_place() {
        let mut a = listing("a");
        a.garage = true;
        let mut listings = vec![a];
        score_all(&mut listings);
        assert_eq!(listings[0].score, 100);
    }
}
