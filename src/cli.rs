// src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rent-scout", version, about = "Regional rental-listing scout and ranker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Query the listing service region by region and persist raw pages.
    Scrape {
        /// Region name to scrape; all configured regions when omitted.
        target: Option<String>,

        /// Pages to fetch per region: a number, or "all" to follow the
        /// reported total to the end.
        #[arg(long, default_value = "1")]
        pages: String,

        /// Dry run: fetch but do not write page artifacts.
        #[arg(long)]
        no_save: bool,

        #[arg(long, default_value = "config.json")]
        config: PathBuf,

        /// Directory page artifacts are written into.
        #[arg(long, default_value = "raw_pages")]
        pages_dir: PathBuf,
    },

    /// Normalize, score and rank persisted pages into a CSV report.
    Report {
        /// Directory page artifacts are read from.
        #[arg(long, default_value = "raw_pages")]
        pages_dir: PathBuf,

        /// Directory the report is written into.
        #[arg(long, default_value = "reports")]
        out: PathBuf,

        /// Minimum interior area (sqft) a listing must have to be kept.
        #[arg(long, default_value_t = 700.0)]
        min_sqft: f64,
    },
}
