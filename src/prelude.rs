//! Prelude module for NCEP Fetcher Library
//!
//! This module re-exports the most commonly used items from the library,
//! providing a convenient way to import everything needed for typical usage
//! with a single `use ncep_fetcher::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use ncep_fetcher::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = NcepClient::new()?;
//!     let criteria = Criteria::new("nam", "20180322").resolution("awphys");
//!     let files = client.get_data(&criteria).await?;
//!     client.download_data(Path::new("."), &files).await?;
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

// Client, query and result types
pub use crate::app::{
    ClientConfig, ContentSource, Criteria, DownloadConfig, DownloadReport, FileDescriptor,
    NcepClient, ProviderInfo,
};

// Configuration
pub use crate::config::AppConfig;

// Commonly used constants
pub use crate::constants::{ARCHIVE_BASE_URL, SITE_BASE_URL, USER_AGENT};

// Standard library re-exports that are commonly needed
pub use std::path::{Path, PathBuf};

pub use tokio;
