// src/config.rs
use crate::geos::bounding_box;
use crate::search::models::QueryParams;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

/// Run configuration, read once at startup. A missing or malformed config
/// file is fatal; everything downstream assumes these values are present.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub search_url: String,
    pub token: String,

    /// Named points of interest, searched in the order given.
    pub regions: Vec<PointOfInterest>,

    #[serde(default)]
    pub profiles: Vec<SearchProfile>,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_page_size() -> u32 {
    20
}
fn default_min_delay_ms() -> u64 {
    2_000
}
fn default_max_delay_ms() -> u64 {
    6_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct PointOfInterest {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub radius_m: f64,
}

/// Header/credential profile combined with every region. Lets the request
/// fingerprint be varied without recompiling.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchProfile {
    pub name: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub headers: Vec<(String, String)>,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for SearchProfile {
    fn default() -> Self {
        SearchProfile {
            name: "default".to_string(),
            user_agent: default_user_agent(),
            headers: Vec::new(),
        }
    }
}

/// A region ready to be queried: name plus the base query parameters
/// derived from its bounding box. Immutable once built.
#[derive(Debug, Clone)]
pub struct RegionQuery {
    pub name: String,
    pub base: QueryParams,
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        let mut config: Config = serde_json::from_str(&text)
            .with_context(|| format!("could not parse config file {}", path.display()))?;

        if config.regions.is_empty() {
            bail!("config has no regions");
        }
        if config.min_delay_ms > config.max_delay_ms {
            bail!("min_delay_ms exceeds max_delay_ms");
        }
        for region in &config.regions {
            if region.radius_m <= 0.0 {
                bail!("region '{}' has a non-positive radius", region.name);
            }
        }
        if config.profiles.is_empty() {
            config.profiles.push(SearchProfile::default());
        }

        Ok(config)
    }

    /// Expands each point of interest into its bounding-box query.
    pub fn region_queries(&self) -> Vec<RegionQuery> {
        self.regions
            .iter()
            .map(|poi| {
                let b = bounding_box(poi.lat, poi.lon, poi.radius_m);
                RegionQuery {
                    name: poi.name.clone(),
                    base: QueryParams {
                        min_lat: b.min_lat,
                        max_lat: b.max_lat,
                        min_lon: b.min_lon,
                        max_lon: b.max_lon,
                        page: 1,
                        per_page: self.page_size,
                    },
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(json: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(json.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_minimal_config_with_defaults() {
        let f = write_config(
            r#"{
                "search_url": "https://example.com/search",
                "token": "t0k3n",
                "regions": [{ "name": "Downtown", "lat": 43.65, "lon": -79.38, "radius_m": 5000 }]
            }"#,
        );
        let config = Config::load(f.path()).unwrap();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.profiles.len(), 1);
        assert_eq!(config.profiles[0].name, "default");

        let queries = config.region_queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].name, "Downtown");
        assert_eq!(queries[0].base.page, 1);
        assert!(queries[0].base.min_lat < 43.65 && queries[0].base.max_lat > 43.65);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::load(Path::new("/no/such/config.json")).is_err());
    }

    #[test]
    fn rejects_empty_region_list() {
        let f = write_config(
            r#"{ "search_url": "u", "token": "t", "regions": [] }"#,
        );
        assert!(Config::load(f.path()).is_err());
    }

    #[test]
    fn rejects_inverted_delay_window() {
        let f = write_config(
            r#"{
                "search_url": "u", "token": "t",
                "regions": [{ "name": "A", "lat": 0, "lon": 0, "radius_m": 100 }],
                "min_delay_ms": 5000, "max_delay_ms": 1000
            }"#,
        );
        assert!(Config::load(f.path()).is_err());
    }
}
