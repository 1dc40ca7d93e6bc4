// src/report.rs

use crate::domain::listing::Listing;
use anyhow::{Context, Result};
use chrono::Utc;
use std::io::Write;
use std::path::{Path, PathBuf};

const COLUMNS: [&str; 21] = [
    "ID",
    "Address",
    "Rent",
    "Bedrooms",
    "Bathrooms",
    "Type",
    "Sqft",
    "Sqm",
    "Land Size",
    "Date Listed",
    "Time on Market",
    "Link",
    "Location",
    "Parking",
    "Pet Friendly",
    "Carpet Free",
    "Garage",
    "Price",
    "Price / Sqft",
    "Score",
    "Description",
];

/// Orders listings by descending score. The sort is stable, so equal scores
/// keep their ingestion order; no secondary key is applied.
pub fn sort_by_score(listings: &mut [Listing]) {
    listings.sort_by(|a, b| b.score.cmp(&a.score));
}

pub fn write_csv<W: Write>(listings: &[Listing], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(COLUMNS).context("could not write CSV header")?;

    for listing in listings {
        let sqft = format_area(listing.sqft);
        let sqm = format!("{:.1}", listing.sqm);
        let parking = listing.parking_count.to_string();
        let price = listing.price.to_string();
        let price_per_sqft = format!("{:.2}", listing.price_per_sqft());
        let score = listing.score.to_string();

        csv.write_record([
            listing.id.as_str(),
            listing.address.as_str(),
            listing.rent_text.as_str(),
            listing.bedrooms.as_str(),
            listing.bathrooms.as_str(),
            listing.unit_type.as_str(),
            sqft.as_str(),
            sqm.as_str(),
            listing.land_size.as_str(),
            listing.date_listed.as_str(),
            listing.time_on_market.as_str(),
            listing.url.as_str(),
            listing.location.as_str(),
            parking.as_str(),
            listing.pet_friendly.as_str(),
            listing.carpet_free.as_str(),
            if listing.garage { "yes" } else { "no" },
            price.as_str(),
            price_per_sqft.as_str(),
            score.as_str(),
            listing.description.as_str(),
        ])
        .with_context(|| format!("could not write row for listing {}", listing.id))?;
    }

    csv.flush().context("could not flush CSV output")?;
    Ok(())
}

/// Writes the report into `out_dir` under a timestamped filename and
/// returns the path.
pub fn export(listings: &[Listing], out_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("could not create report directory {}", out_dir.display()))?;

    let filename = format!("report_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"));
    let path = out_dir.join(filename);

    let file = std::fs::File::create(&path)
        .with_context(|| format!("could not create report file {}", path.display()))?;
    write_csv(listings, file)?;

    Ok(path)
}

fn format_area(sqft: f64) -> String {
    if sqft == sqft.trunc() {
        format!("{}", sqft as i64)
    } else {
        format!("{sqft}")
    }
}
