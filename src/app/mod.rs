//! Core application logic for NCEP Fetcher
//!
//! This module contains the archive client, the listing tokenizer, product
//! catalogs, provider profiles and the resolver that turns a query into
//! downloadable files.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ncep_fetcher::app::{Criteria, NcepClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NcepClient::new()?;
//!
//! let criteria = Criteria::new("gfs", "20180322")
//!     .format("gfs")
//!     .cycle_runtime("18")
//!     .resolution("1p00")
//!     .forecast_hours(3, 6);
//!
//! let files = client.get_data(&criteria).await?;
//! for file in &files {
//!     println!("{} -> {}", file.file_name, file.download_url);
//! }
//!
//! let report = client.download_data(std::path::Path::new("./data"), &files).await?;
//! println!("{} files downloaded", report.downloaded.len());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod listing;
pub mod models;
pub mod provider;
pub mod resolver;

// Re-export main public API
pub use catalog::{Catalog, ProductGroup, GFS_CATALOG, NAM_CATALOG};
pub use client::{
    ByteStream, ClientConfig, ContentSource, DownloadConfig, DownloadReport, HttpHandler,
    NcepClient,
};
pub use listing::{distinct_dates, distinct_formats, extract_file_links, tokenize, DirectoryIndex};
pub use models::{Criteria, CycleRuntime, FileDescriptor, FileLink, ForecastRange, Token};
pub use provider::{find_provider, Provider, ProviderInfo, ProviderProfile, GFS, NAM, PROVIDERS};
pub use resolver::{validate_date, NormalizedQuery};
