//! Command-line interface components
//!
//! This module contains CLI-specific code for the NCEP Fetcher application,
//! including argument parsing, command handlers and progress display.

pub mod args;
pub mod commands;
pub mod progress;

pub use args::{Cli, Commands, DownloadArgs, GlobalArgs, ProviderArgs, QueryArgs, SearchArgs};
pub use commands::{
    build_client, handle_dates, handle_download, handle_formats, handle_products,
    handle_providers, handle_search, handle_types,
};
pub use progress::DownloadProgress;
