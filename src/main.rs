//! NCEP Fetcher CLI application
//!
//! Command-line interface for finding and downloading NCEP forecast model
//! output from the operational archive.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use ncep_fetcher::cli::{
    build_client, handle_dates, handle_download, handle_formats, handle_products,
    handle_providers, handle_search, handle_types, Cli, Commands,
};
use ncep_fetcher::config::AppConfig;
use ncep_fetcher::constants::logging;
use ncep_fetcher::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    let config = AppConfig::load(cli.global.config.clone()).await?;

    init_logging(&cli, &config.logging.level);

    info!("NCEP Fetcher v{} starting", env!("CARGO_PKG_VERSION"));

    let client = build_client(&config)?;

    match cli.command {
        Commands::Providers => handle_providers(&client),
        Commands::Types(args) => handle_types(&client, args),
        Commands::Products(args) => handle_products(&client, args),
        Commands::Dates(args) => {
            info!("Listing run dates for {}", args.provider);
            handle_dates(&client, args).await
        }
        Commands::Formats(args) => {
            info!("Listing formats for {}", args.provider);
            handle_formats(&client, args).await
        }
        Commands::Search(args) => {
            info!("Executing search command");
            handle_search(&client, args).await
        }
        Commands::Download(args) => {
            info!("Executing download command");
            handle_download(client, args, cli.global.quiet).await
        }
    }
}

/// Initialize logging based on CLI verbosity and the configured level
fn init_logging(cli: &Cli, configured_level: &str) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = cli.log_directives(configured_level, rust_log.as_deref());

    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid log filter '{}': {}", directives, e);
        EnvFilter::new(format!("ncep_fetcher={}", logging::DEFAULT_LOG_LEVEL))
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose)
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
