//! NCEP providers
//!
//! A provider is one forecast model family with its own catalog and directory
//! layout. The two providers share a single resolver; what differs between
//! them is captured in [`ProviderProfile`].

use serde::Serialize;

use crate::app::catalog::{Catalog, GFS_CATALOG, NAM_CATALOG};
use crate::app::client::ContentSource;
use crate::app::listing;
use crate::app::models::{Criteria, FileDescriptor, Token};
use crate::app::resolver;
use crate::constants::ncep;
use crate::errors::{AppError, ValidationError, ValidationResult};

/// Static description of one provider
#[derive(Debug)]
pub struct ProviderProfile {
    /// Short key used in archive paths (e.g., "gfs")
    pub key: &'static str,
    /// Display name (e.g., "Global Forecast System")
    pub name: &'static str,
    /// Product catalog
    pub catalog: &'static Catalog,
    /// Top-level directories carry the cycle hour after the date
    /// (`gfs.2018032218`), so a query needs a cycle runtime to find one
    pub cycle_qualified_directories: bool,
    /// Product code that only identifies a file once prefixed with the
    /// cycle token (`t18z.pgrb`)
    pub cycle_prefixed_code: Option<&'static str>,
}

impl ProviderProfile {
    /// Listing URL of the provider's operational directory tree
    pub fn archive_url(&self, archive_base_url: &str) -> String {
        format!(
            "{}/{}/{}",
            archive_base_url.trim_end_matches('/'),
            self.key,
            ncep::PRODUCTION_PATH
        )
    }

    /// Product inventory page describing the provider
    pub fn product_page_url(&self, site_base_url: &str) -> String {
        format!("{}/{}/", site_base_url.trim_end_matches('/'), self.key)
    }

    fn matches(&self, provider: &str) -> bool {
        self.key == provider || self.name == provider
    }
}

/// Global Forecast System
pub static GFS: ProviderProfile = ProviderProfile {
    key: "gfs",
    name: "Global Forecast System",
    catalog: &GFS_CATALOG,
    cycle_qualified_directories: true,
    cycle_prefixed_code: Some("pgrb"),
};

/// North American Mesoscale model
pub static NAM: ProviderProfile = ProviderProfile {
    key: "nam",
    name: "North American Model",
    catalog: &NAM_CATALOG,
    cycle_qualified_directories: false,
    cycle_prefixed_code: None,
};

/// Every supported provider, in listing order
pub static PROVIDERS: [&ProviderProfile; 2] = [&GFS, &NAM];

/// Look a provider up by key or display name
pub fn find_provider(provider: &str) -> ValidationResult<&'static ProviderProfile> {
    PROVIDERS
        .iter()
        .copied()
        .find(|profile| profile.matches(provider))
        .ok_or_else(|| ValidationError::UnknownProvider {
            provider: provider.to_string(),
        })
}

/// Key and display name of a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    pub key: &'static str,
    pub name: &'static str,
}

impl From<&ProviderProfile> for ProviderInfo {
    fn from(profile: &ProviderProfile) -> Self {
        Self {
            key: profile.key,
            name: profile.name,
        }
    }
}

/// A provider bound to a content source and archive location
#[derive(Debug)]
pub struct Provider<'a, S> {
    profile: &'static ProviderProfile,
    source: &'a S,
    archive_url: String,
}

impl<'a, S: ContentSource> Provider<'a, S> {
    pub fn new(profile: &'static ProviderProfile, source: &'a S, archive_base_url: &str) -> Self {
        Self {
            profile,
            source,
            archive_url: profile.archive_url(archive_base_url),
        }
    }

    pub fn profile(&self) -> &'static ProviderProfile {
        self.profile
    }

    pub fn archive_url(&self) -> &str {
        &self.archive_url
    }

    /// Resolve `criteria` to the matching downloadable files
    pub async fn get_data(&self, criteria: &Criteria) -> Result<Vec<FileDescriptor>, AppError> {
        resolver::resolve(self.source, self.profile, &self.archive_url, criteria).await
    }

    pub fn get_products(&self) -> &'static Catalog {
        self.profile.catalog
    }

    pub fn product_types(&self) -> Vec<&'static str> {
        self.get_products().product_types()
    }

    pub fn product_names(&self) -> Vec<&'static str> {
        self.get_products().product_names()
    }

    /// Tokens of the provider's top-level listing
    pub async fn top_level_tokens(&self) -> Result<Vec<Token>, AppError> {
        let markup = resolver::fetch_listing(self.source, &self.archive_url).await?;
        Ok(listing::tokenize(&markup))
    }

    /// Directory formats available in the archive
    pub async fn formats(&self) -> Result<Vec<String>, AppError> {
        Ok(listing::distinct_formats(&self.top_level_tokens().await?))
    }

    /// Run dates available in the archive
    pub async fn dates(&self) -> Result<Vec<String>, AppError> {
        Ok(listing::distinct_dates(&self.top_level_tokens().await?))
    }
}
