//! Client for the NCEP forecast archive
//!
//! This module provides the public entry point that binds the known providers
//! to a content source, validates caller input and exposes listing and
//! download operations.
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration and building
//! - `source`: the content source seam used by the resolver and downloader
//! - `http`: rate-limited HTTP operations backing the production source
//! - `download`: streamed file downloads with atomic writes

use std::path::Path;

use crate::app::models::{Criteria, FileDescriptor};
use crate::app::provider::{find_provider, Provider, ProviderInfo, PROVIDERS};
use crate::app::resolver::validate_date;
use crate::constants::ncep;
use crate::errors::{Result, ValidationResult};

pub mod config;
pub mod download;
pub mod http;
pub mod source;

pub use config::ClientConfig;
pub use download::{
    DownloadConfig, DownloadHandler, DownloadReport, DownloadedFile, FailedDownload,
};
pub use http::HttpHandler;
pub use source::{ByteStream, ContentSource};

/// Client for the NCEP archive
///
/// Every operation taking a provider looks it up first, so an unknown
/// provider fails before any network traffic.
#[derive(Debug)]
pub struct NcepClient<S = HttpHandler> {
    source: S,
    archive_base_url: String,
    site_base_url: String,
    download_config: DownloadConfig,
}

impl NcepClient<HttpHandler> {
    /// Creates a client over HTTP with default settings
    ///
    /// # Errors
    ///
    /// Returns `AppError` if HTTP client creation fails
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client over HTTP with custom configuration
    ///
    /// # Errors
    ///
    /// Returns `AppError` if HTTP client creation fails or the rate limit is zero
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = config.build_http_client()?;
        let http_handler = HttpHandler::new(client, config.rate_limit_rps)?;
        tracing::debug!(
            "Created NCEP client ({} req/s, {:?} timeout)",
            config.rate_limit_rps,
            config.request_timeout
        );
        Ok(Self::with_source(http_handler))
    }
}

impl<S: ContentSource + Sync> NcepClient<S> {
    /// Creates a client over any content source, pointed at the public archive
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            archive_base_url: ncep::ARCHIVE_BASE_URL.to_string(),
            site_base_url: ncep::SITE_BASE_URL.to_string(),
            download_config: DownloadConfig::default(),
        }
    }

    /// Points the client at a different bulk-data archive
    pub fn with_archive_url(mut self, url: impl Into<String>) -> Self {
        self.archive_base_url = url.into();
        self
    }

    /// Points the client at a different product inventory site
    pub fn with_site_url(mut self, url: impl Into<String>) -> Self {
        self.site_base_url = url.into();
        self
    }

    /// Replaces the batch download settings
    pub fn with_download_config(mut self, config: DownloadConfig) -> Self {
        self.download_config = config;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn archive_base_url(&self) -> &str {
        &self.archive_base_url
    }

    pub fn download_config(&self) -> &DownloadConfig {
        &self.download_config
    }

    fn provider(&self, provider: &str) -> ValidationResult<Provider<'_, S>> {
        let profile = find_provider(provider)?;
        Ok(Provider::new(profile, &self.source, &self.archive_base_url))
    }

    /// Every provider the client knows about
    pub fn list_providers(&self) -> Vec<ProviderInfo> {
        PROVIDERS.iter().map(|p| ProviderInfo::from(*p)).collect()
    }

    /// Product types in a provider's catalog
    pub fn list_provider_types(&self, provider: &str) -> ValidationResult<Vec<&'static str>> {
        Ok(self.provider(provider)?.product_types())
    }

    /// Product names in a provider's catalog, including the type names
    pub fn list_provider_products(&self, provider: &str) -> ValidationResult<Vec<&'static str>> {
        Ok(self.provider(provider)?.product_names())
    }

    /// Run dates the provider's archive currently lists
    pub async fn get_data_dates_of_a_product(&self, provider: &str) -> Result<Vec<String>> {
        self.provider(provider)?.dates().await
    }

    /// Directory formats the provider's archive currently lists
    pub async fn get_formats_of_a_product(&self, provider: &str) -> Result<Vec<String>> {
        self.provider(provider)?.formats().await
    }

    /// URL of the provider's product inventory page
    pub fn product_page_url(&self, provider: &str) -> ValidationResult<String> {
        Ok(find_provider(provider)?.product_page_url(&self.site_base_url))
    }

    /// Resolve `criteria` to downloadable files
    ///
    /// # Errors
    ///
    /// - `ValidationError` for an unknown provider or malformed criteria,
    ///   before anything is fetched
    /// - `NotFoundError` when no archive directory holds the date
    /// - `TransportError` when a listing cannot be fetched
    ///
    /// A filter that matches nothing yields an empty list, not an error.
    pub async fn get_data(&self, criteria: &Criteria) -> Result<Vec<FileDescriptor>> {
        let provider = self.provider(&criteria.provider)?;
        validate_date(&criteria.date)?;
        provider.get_data(criteria).await
    }

    /// Download `descriptors` into an existing `destination` directory
    ///
    /// Files that fail are listed in the report and the batch carries on.
    pub async fn download_data(
        &self,
        destination: &Path,
        descriptors: &[FileDescriptor],
    ) -> Result<DownloadReport> {
        self.download_data_with(destination, descriptors, |_| {}).await
    }

    /// Like [`download_data`](Self::download_data), calling `on_file_done`
    /// as each file finishes
    pub async fn download_data_with<F>(
        &self,
        destination: &Path,
        descriptors: &[FileDescriptor],
        on_file_done: F,
    ) -> Result<DownloadReport>
    where
        F: FnMut(&FileDescriptor),
    {
        let handler = DownloadHandler::new(&self.source, self.download_config.clone());
        let report = handler
            .download_all_with(destination, descriptors, on_file_done)
            .await?;
        if !report.is_complete() {
            tracing::warn!(
                "{} of {} files could not be downloaded",
                report.failed.len(),
                descriptors.len()
            );
        }
        Ok(report)
    }
}
