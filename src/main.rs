use crate::cli::{Cli, Command};
use crate::config::{Config, RegionQuery, SearchProfile};
use crate::domain::pipeline::{apply_filters, score_all, ListingAccumulator};
use crate::search::client::HttpSearchClient;
use crate::search::orchestrator::{Orchestrator, PageLimit, Pacing, UnitOutcome};
use crate::store::RawRecordStore;
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::Path;
use tracing::{error, info, warn};

mod cli;
mod config;
mod domain;
mod geos;
mod report;
mod search;
mod store;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .init();

    // Only fatal errors reach here; unit-level failures are folded into the
    // run summary and still exit 0.
    if let Err(e) = run(cli) {
        error!("fatal: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Scrape {
            target,
            pages,
            no_save,
            config,
            pages_dir,
        } => scrape(target.as_deref(), &pages, no_save, &config, &pages_dir),
        Command::Report {
            pages_dir,
            out,
            min_sqft,
        } => build_report(&pages_dir, &out, min_sqft),
    }
}

fn scrape(
    target: Option<&str>,
    pages: &str,
    no_save: bool,
    config_path: &Path,
    pages_dir: &Path,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let limit = parse_page_limit(pages)?;

    let regions = select_regions(config.region_queries(), target)?;
    let units: Vec<(RegionQuery, SearchProfile)> = regions
        .iter()
        .flat_map(|region| {
            config
                .profiles
                .iter()
                .map(|profile| (region.clone(), profile.clone()))
        })
        .collect();

    let client =
        HttpSearchClient::new(&config.search_url).context("could not build HTTP client")?;
    let orchestrator = Orchestrator::new(
        client,
        Pacing::from_millis(config.min_delay_ms, config.max_delay_ms),
        limit,
    );

    let store = RawRecordStore::new(pages_dir);
    let run_report = orchestrator.run(&units, &config.token, |region, profile, page, result| {
        if no_save {
            return;
        }
        if let Err(e) = store.save_page(&region.name, &profile.name, page, result) {
            warn!(region = %region.name, page, error = %e, "could not persist page artifact");
        }
    });

    info!(
        units = run_report.units.len(),
        succeeded = run_report.succeeded(),
        failed = run_report.failed(),
        listings = run_report.total_listings(),
        "scrape run complete"
    );
    for unit in &run_report.units {
        if let UnitOutcome::Failed { reason } = &unit.outcome {
            warn!(region = %unit.region, profile = %unit.profile, %reason, "unit failed");
        }
    }

    Ok(())
}

fn build_report(pages_dir: &Path, out: &Path, min_sqft: f64) -> Result<()> {
    let store = RawRecordStore::new(pages_dir);
    let artifacts = store.read_all()?;
    if artifacts.is_empty() {
        warn!(dir = %pages_dir.display(), "no page artifacts found");
    }

    let mut accumulator = ListingAccumulator::new();
    for artifact in &artifacts {
        for raw in &artifact.result.listings {
            accumulator.ingest(raw, &artifact.region);
        }
    }
    let ingested = accumulator.len();
    if accumulator.is_empty() {
        warn!("no listings ingested; the report will only contain headers");
    }

    let mut listings = apply_filters(accumulator.into_listings(), min_sqft);
    score_all(&mut listings);
    report::sort_by_score(&mut listings);

    let path = report::export(&listings, out)?;
    info!(
        ingested,
        kept = listings.len(),
        report = %path.display(),
        "report written"
    );

    Ok(())
}

fn select_regions(regions: Vec<RegionQuery>, target: Option<&str>) -> Result<Vec<RegionQuery>> {
    match target {
        None => Ok(regions),
        Some(name) => {
            let matched: Vec<RegionQuery> = regions
                .into_iter()
                .filter(|r| r.name.eq_ignore_ascii_case(name))
                .collect();
            if matched.is_empty() {
                bail!("no configured region matches '{name}'");
            }
            Ok(matched)
        }
    }
}

fn parse_page_limit(pages: &str) -> Result<PageLimit> {
    if pages.eq_ignore_ascii_case("all") {
        return Ok(PageLimit::All);
    }
    let n: u32 = pages
        .parse()
        .with_context(|| format!("--pages must be a number or 'all', got '{pages}'"))?;
    if n <= 1 {
        Ok(PageLimit::FirstOnly)
    } else {
        Ok(PageLimit::Max(n))
    }
}
