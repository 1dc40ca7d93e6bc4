use serde::{Deserialize, Serialize};

// page
//  ├── listings[]
//  │    ├── id
//  │    ├── address
//  │    ├── description
//  │    ├── url
//  │    ├── price
//  │    │    ├── amount
//  │    │    └── display
//  │    ├── bedrooms / bathrooms / unitType
//  │    ├── sqft / areaInFeet / unitArea   (competing area fields)
//  │    ├── landSize
//  │    ├── parking[] { name } / parkingType
//  │    ├── dateListed                      (platform ticks, as string)
//  │    └── timeOnMarket
//  ├── totalRecords
//  └── pageSize

/// One page of search results as returned by the listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage {
    #[serde(default)]
    pub listings: Vec<RawListing>,
    #[serde(default)]
    pub total_records: i64,
    #[serde(default)]
    pub page_size: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    pub id: Option<i64>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,

    pub price: Option<RawPrice>,

    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub unit_type: Option<String>,

    // The service populates at most one of these, inconsistently per listing.
    pub sqft: Option<String>,
    pub area_in_feet: Option<String>,
    pub unit_area: Option<String>,

    pub land_size: Option<String>,

    pub parking: Option<Vec<RawParking>>,
    pub parking_type: Option<String>,

    pub date_listed: Option<String>,
    pub time_on_market: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPrice {
    pub amount: Option<f64>,
    pub display: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawParking {
    pub name: Option<String>,
}

impl RawListing {
    /// Candidate area fields in the order they should be tried.
    pub fn area_candidates(&self) -> [Option<&str>; 3] {
        [
            self.sqft.as_deref(),
            self.area_in_feet.as_deref(),
            self.unit_area.as_deref(),
        ]
    }
}

/// Query parameters for one search call. A run clones the region's base
/// params and bumps `page` between fetches; nothing else changes mid-unit.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
    pub page: u32,
    pub per_page: u32,
}

impl QueryParams {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("minLatitude", self.min_lat.to_string()),
            ("maxLatitude", self.max_lat.to_string()),
            ("minLongitude", self.min_lon.to_string()),
            ("maxLongitude", self.max_lon.to_string()),
            ("page", self.page.to_string()),
            ("pageSize", self.per_page.to_string()),
        ]
    }
}
