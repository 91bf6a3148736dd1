//! Command-line argument parsing for NCEP Fetcher
//!
//! This module defines the CLI structure using clap derive macros, covering
//! provider discovery, archive listings, file search and downloading.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::Criteria;
use crate::constants::workers;

/// NCEP Fetcher - Find and download NCEP forecast model output
#[derive(Parser, Debug)]
#[command(
    name = "ncep_fetcher",
    version,
    about = "Find and download NCEP forecast model output files",
    long_about = "Browses the NCEP operational archive for GFS and NAM output.
Resolves a date, format, cycle and product selection to the matching files and downloads them."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the known providers
    Providers,

    /// List a provider's product types
    Types(ProviderArgs),

    /// List a provider's product names
    Products(ProviderArgs),

    /// List the run dates in a provider's archive
    Dates(ProviderArgs),

    /// List the directory formats in a provider's archive
    Formats(ProviderArgs),

    /// Find the files matching a query
    Search(SearchArgs),

    /// Download the files matching a query
    Download(DownloadArgs),
}

/// A provider key or display name
#[derive(Args, Debug, Clone)]
pub struct ProviderArgs {
    /// Provider key or name (e.g., "gfs", "North American Model")
    pub provider: String,
}

/// Selectors shared by search and download
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Provider key or name (e.g., "gfs")
    pub provider: String,

    /// Run date as YYYYMMDD
    pub date: String,

    /// Directory format (e.g., "gfs", "gdas"); all formats are searched if omitted
    #[arg(short, long)]
    pub format: Option<String>,

    /// Cycle runtime hour (e.g., "00", "18")
    #[arg(short, long, value_name = "HH")]
    pub cycle: Option<String>,

    /// Grid resolution (e.g., "0p25", "1p00")
    #[arg(short, long)]
    pub resolution: Option<String>,

    /// Catalog product type (e.g., "GFS")
    #[arg(long)]
    pub product_type: Option<String>,

    /// Catalog product name, requires --product-type
    #[arg(long)]
    pub product_name: Option<String>,

    /// First forecast hour
    #[arg(long, value_name = "HOUR")]
    pub forecast_start: Option<String>,

    /// Last forecast hour, requires --forecast-start
    #[arg(long, value_name = "HOUR")]
    pub forecast_end: Option<String>,
}

/// Arguments for the search command
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Print the matches as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the download command
#[derive(Args, Debug, Clone)]
pub struct DownloadArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Existing directory to write files into
    #[arg(short, long, value_name = "DIR")]
    pub dest: PathBuf,

    /// Dry run - show what would be downloaded without downloading
    #[arg(long)]
    pub dry_run: bool,

    /// Number of files downloaded at the same time (overrides config)
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level based on global arguments
    ///
    /// Without a verbosity flag the configured level applies.
    pub fn log_level(&self, configured: &str) -> String {
        if self.global.quiet {
            "error".to_string()
        } else if self.global.very_verbose {
            "debug".to_string()
        } else if self.global.verbose {
            "info".to_string()
        } else {
            configured.to_string()
        }
    }

    /// Filter directives for the subscriber
    ///
    /// A non-empty `RUST_LOG` value is used as given; otherwise the crate logs
    /// at [`log_level`](Self::log_level).
    pub fn log_directives(&self, configured: &str, rust_log: Option<&str>) -> String {
        match rust_log.map(str::trim).filter(|v| !v.is_empty()) {
            Some(directives) => directives.to_string(),
            None => format!("ncep_fetcher={}", self.log_level(configured)),
        }
    }
}

impl QueryArgs {
    /// Build the resolver query
    ///
    /// Values are passed through as given; the resolver validates them.
    pub fn to_criteria(&self) -> Criteria {
        let mut criteria = Criteria::new(&self.provider, &self.date);
        criteria.format = self.format.clone();
        criteria.cycle_runtime = self.cycle.clone();
        criteria.resolution = self.resolution.clone();
        criteria.product_type = self.product_type.clone();
        criteria.product_name = self.product_name.clone();
        criteria.forecast_start = self.forecast_start.clone();
        criteria.forecast_end = self.forecast_end.clone();
        criteria
    }
}

impl DownloadArgs {
    /// Check the download-only arguments
    pub fn validate(&self) -> Result<(), String> {
        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 || concurrency > workers::MAX_CONCURRENCY {
                return Err(format!(
                    "Concurrency must be between 1 and {}",
                    workers::MAX_CONCURRENCY
                ));
            }
        }
        Ok(())
    }
}
