//! Command handlers for NCEP Fetcher CLI
//!
//! This module implements the command handlers that connect CLI arguments to
//! the archive client. Handlers are generic over the content source so they
//! run the same against the live archive or in-memory pages.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::app::{ContentSource, FileDescriptor, NcepClient};
use crate::cli::{DownloadArgs, DownloadProgress, ProviderArgs, SearchArgs};
use crate::config::AppConfig;
use crate::errors::{AppError, Result};

/// Build the HTTP-backed client described by the configuration
pub fn build_client(config: &AppConfig) -> Result<NcepClient> {
    let client = NcepClient::with_config(config.client_config())?
        .with_archive_url(config.archive.base_url.clone())
        .with_site_url(config.archive.site_url.clone())
        .with_download_config(config.download_config());
    debug!("Archive: {}", client.archive_base_url());
    Ok(client)
}

/// Handle the providers command
pub fn handle_providers<S: ContentSource + Sync>(client: &NcepClient<S>) -> Result<()> {
    println!("Available providers:");
    for provider in client.list_providers() {
        println!("  {:<6} {}", provider.key, provider.name);
    }
    Ok(())
}

/// Handle the types command
pub fn handle_types<S: ContentSource + Sync>(
    client: &NcepClient<S>,
    args: ProviderArgs,
) -> Result<()> {
    let types = client.list_provider_types(&args.provider)?;
    println!("Product types for {}:", args.provider);
    for product_type in types {
        println!("  {}", product_type);
    }
    println!("\nProduct details: {}", client.product_page_url(&args.provider)?);
    Ok(())
}

/// Handle the products command
pub fn handle_products<S: ContentSource + Sync>(
    client: &NcepClient<S>,
    args: ProviderArgs,
) -> Result<()> {
    let products = client.list_provider_products(&args.provider)?;
    println!("Products for {}:", args.provider);
    for product in products {
        println!("  {}", product);
    }
    println!("\nProduct details: {}", client.product_page_url(&args.provider)?);
    Ok(())
}

/// Handle the dates command
pub async fn handle_dates<S: ContentSource + Sync>(
    client: &NcepClient<S>,
    args: ProviderArgs,
) -> Result<()> {
    let dates = client.get_data_dates_of_a_product(&args.provider).await?;
    if dates.is_empty() {
        println!("No run dates listed for {}", args.provider);
        return Ok(());
    }
    println!("Run dates for {}:", args.provider);
    for date in dates {
        println!("  {}", date);
    }
    Ok(())
}

/// Handle the formats command
pub async fn handle_formats<S: ContentSource + Sync>(
    client: &NcepClient<S>,
    args: ProviderArgs,
) -> Result<()> {
    let formats = client.get_formats_of_a_product(&args.provider).await?;
    if formats.is_empty() {
        println!("No formats listed for {}", args.provider);
        return Ok(());
    }
    println!("Formats for {}:", args.provider);
    for format in formats {
        println!("  {}", format);
    }
    Ok(())
}

/// Handle the search command
pub async fn handle_search<S: ContentSource + Sync>(
    client: &NcepClient<S>,
    args: SearchArgs,
) -> Result<()> {
    let criteria = args.query.to_criteria();
    let files = client.get_data(&criteria).await?;

    if args.json {
        let json = serde_json::to_string_pretty(&files)
            .map_err(|e| AppError::generic(format!("Failed to serialize results: {}", e)))?;
        println!("{}", json);
        return Ok(());
    }

    if files.is_empty() {
        println!("No files match the specified criteria");
        return Ok(());
    }

    print_files(&files);
    Ok(())
}

/// Handle the download command
///
/// Files that fail are listed in the summary; only errors that stop the
/// whole batch are returned.
pub async fn handle_download<S: ContentSource + Sync>(
    client: NcepClient<S>,
    args: DownloadArgs,
    quiet: bool,
) -> Result<()> {
    args.validate().map_err(AppError::generic)?;

    let client = match args.concurrency {
        Some(concurrency) => {
            let mut download_config = client.download_config().clone();
            download_config.concurrency = concurrency;
            client.with_download_config(download_config)
        }
        None => client,
    };

    let start_time = Instant::now();
    let criteria = args.query.to_criteria();
    let files = client.get_data(&criteria).await?;
    info!("{} files resolved in {:?}", files.len(), start_time.elapsed());

    if files.is_empty() {
        warn!("No files match the specified criteria");
        println!("No files match the specified criteria");
        return Ok(());
    }

    if args.dry_run {
        println!("Dry run - would download {} files to {}:", files.len(), args.dest.display());
        print_files(&files);
        return Ok(());
    }

    let progress = DownloadProgress::new(files.len(), quiet)?;
    let report = client
        .download_data_with(&args.dest, &files, |file| progress.file_done(&file.file_name))
        .await;
    progress.finish();
    let report = report?;

    println!("\nDownload Summary:");
    println!("  Requested: {}", files.len());
    println!("  Downloaded: {}", report.downloaded.len());
    println!("  Failed: {}", report.failed.len());
    println!("  Bytes written: {}", report.total_bytes());
    println!("  Total time: {:?}", start_time.elapsed());

    if !report.failed.is_empty() {
        println!("\nFailed files:");
        for failure in &report.failed {
            println!("  • {}: {}", failure.file_name, failure.reason);
        }
    }

    Ok(())
}

fn print_files(files: &[FileDescriptor]) {
    println!("{} files:", files.len());
    for file in files {
        println!("  {}", file.file_name);
        println!("    {}", file.download_url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ByteStream;
    use crate::cli::QueryArgs;
    use crate::errors::{FetchResult, TransportError, ValidationError};
    use std::path::PathBuf;
    use url::Url;

    /// Source that fails every request, for commands that must not fetch
    struct Offline;

    impl ContentSource for Offline {
        async fn fetch_text(&self, url: &Url) -> FetchResult<String> {
            Err(TransportError::Status {
                url: url.to_string(),
                status: 503,
            })
        }

        async fn fetch_stream(&self, url: &Url) -> FetchResult<ByteStream> {
            Err(TransportError::Status {
                url: url.to_string(),
                status: 503,
            })
        }
    }

    fn provider(name: &str) -> ProviderArgs {
        ProviderArgs {
            provider: name.to_string(),
        }
    }

    #[test]
    fn test_catalog_commands_work_offline() {
        let client = NcepClient::with_source(Offline);
        assert!(handle_providers(&client).is_ok());
        assert!(handle_types(&client, provider("gfs")).is_ok());
        assert!(handle_products(&client, provider("North American Model")).is_ok());
        assert!(matches!(
            handle_types(&client, provider("hrrr")),
            Err(AppError::Validation(ValidationError::UnknownProvider { .. }))
        ));
    }

    #[tokio::test]
    async fn test_listing_commands_surface_transport_errors() {
        let client = NcepClient::with_source(Offline);
        let result = handle_dates(&client, provider("gfs")).await;
        assert!(matches!(result, Err(AppError::Transport(_))));
    }

    #[tokio::test]
    async fn test_download_rejects_bad_concurrency_before_fetching() {
        let client = NcepClient::with_source(Offline);
        let args = DownloadArgs {
            query: QueryArgs {
                provider: "gfs".to_string(),
                date: "20180322".to_string(),
                ..Default::default()
            },
            dest: PathBuf::from("."),
            dry_run: true,
            concurrency: Some(0),
        };
        let result = handle_download(client, args, true).await;
        assert!(matches!(result, Err(AppError::Generic { .. })));
    }

    #[test]
    fn test_build_client_from_config() {
        let mut config = AppConfig::default();
        config.archive.base_url = "http://mirror.test/com/".to_string();
        config.download.concurrency = 3;
        let client = build_client(&config).unwrap();
        assert_eq!(client.archive_base_url(), "http://mirror.test/com/");
        assert_eq!(client.download_config().concurrency, 3);
    }
}
