// src/store.rs
//
// Raw page artifacts on disk. Each fetched page is written out as one JSON
// file so a report can be rebuilt later without touching the service again.

use crate::search::models::ResultPage;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// One persisted result page, wrapped with enough context to rebuild the
/// pipeline input: the region label feeds normalization later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageArtifact {
    pub region: String,
    pub profile: String,
    pub page: u32,
    pub fetched_at: String,
    pub result: ResultPage,
}

pub struct RawRecordStore {
    dir: PathBuf,
}

impl RawRecordStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    /// Writes one page artifact; the filename keys it by region, profile,
    /// page and fetch time, and sorts lexicographically in fetch order
    /// within a unit.
    pub fn save_page(
        &self,
        region: &str,
        profile: &str,
        page: u32,
        result: &ResultPage,
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("could not create pages directory {}", self.dir.display()))?;

        let fetched_at = Utc::now();
        let filename = format!(
            "{}__{}__p{:03}_{}.json",
            slug(region),
            slug(profile),
            page,
            fetched_at.format("%Y%m%dT%H%M%S")
        );
        let path = self.dir.join(filename);

        let artifact = PageArtifact {
            region: region.to_string(),
            profile: profile.to_string(),
            page,
            fetched_at: fetched_at.to_rfc3339(),
            result: result.clone(),
        };

        let json = serde_json::to_string_pretty(&artifact)
            .context("could not serialize page artifact")?;
        std::fs::write(&path, json)
            .with_context(|| format!("could not write page artifact {}", path.display()))?;

        Ok(path)
    }

    /// Reads every artifact in the directory, in filename order so report
    /// ingestion order is deterministic. Artifacts that fail to parse are
    /// logged and skipped; a missing directory is an error.
    pub fn read_all(&self) -> Result<Vec<PageArtifact>> {
        let entries = std::fs::read_dir(&self.dir)
            .with_context(|| format!("could not read pages directory {}", self.dir.display()))?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut artifacts = Vec::new();
        for path in paths {
            match read_artifact(&path) {
                Ok(artifact) => artifacts.push(artifact),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable artifact"),
            }
        }

        Ok(artifacts)
    }
}

fn read_artifact(path: &Path) -> Result<PageArtifact> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    let artifact = serde_json::from_str(&text)
        .with_context(|| format!("could not parse {}", path.display()))?;
    Ok(artifact)
}

fn slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::models::RawListing;

    fn page_with_ids(ids: &[i64]) -> ResultPage {
        ResultPage {
            listings: ids
                .iter()
                .map(|id| RawListing {
                    id: Some(*id),
                    ..RawListing::default()
                })
                .collect(),
            total_records: ids.len() as i64,
            page_size: 20,
        }
    }

    #[test]
    fn saved_pages_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = RawRecordStore::new(dir.path());

        store
            .save_page("High Park", "default", 1, &page_with_ids(&[1, 2]))
            .unwrap();
        store
            .save_page("High Park", "default", 2, &page_with_ids(&[3]))
            .unwrap();

        let artifacts = store.read_all().unwrap();
        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].region, "High Park");
        assert_eq!(artifacts[0].page, 1);
        assert_eq!(artifacts[0].result.listings.len(), 2);
        assert_eq!(artifacts[1].page, 2);
    }

    #[test]
    fn unreadable_artifacts_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = RawRecordStore::new(dir.path());

        store
            .save_page("Downtown", "default", 1, &page_with_ids(&[9]))
            .unwrap();
        std::fs::write(dir.path().join("zz_corrupt.json"), "{ not json").unwrap();

        let artifacts = store.read_all().unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].result.listings[0].id, Some(9));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let store = RawRecordStore::new(Path::new("/no/such/pages"));
        assert!(store.read_all().is_err());
    }

    #[test]
    fn filenames_slug_region_and_profile() {
        let dir = tempfile::tempdir().unwrap();
        let store = RawRecordStore::new(dir.path());
        let path = store
            .save_page("St. Clair West", "mobile/UA", 3, &page_with_ids(&[]))
            .unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("st--clair-west__mobile-ua__p003_"));
    }
}
