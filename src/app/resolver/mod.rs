//! Resolver pipeline
//!
//! Resolves a query against a provider's archive in two sequential fetches:
//!
//! 1. The provider's top-level listing is indexed by format to find the
//!    sub-directory for the requested date.
//! 2. That sub-directory's listing is narrowed by product code, resolution,
//!    cycle, forecast hours and product type.
//!
//! Directory resolution fails loudly with [`NotFoundError`]. Any filter stage
//! that leaves nothing returns an empty result instead.
//!
//! [`NotFoundError`]: crate::errors::NotFoundError

pub mod criteria;
pub mod filters;

use tracing::{debug, info};
use url::Url;

use crate::app::client::ContentSource;
use crate::app::listing::{self, DirectoryIndex};
use crate::app::models::{Criteria, FileDescriptor, FileLink};
use crate::app::provider::ProviderProfile;
use crate::errors::{AppError, FetchResult, TransportError};

pub use criteria::{validate_date, NormalizedQuery};

/// Fetch a listing page, keeping transport failures apart from empty pages
pub async fn fetch_listing<S: ContentSource>(source: &S, url: &str) -> FetchResult<String> {
    let parsed = Url::parse(url).map_err(|e| TransportError::InvalidUrl {
        url: url.to_string(),
        error: e.to_string(),
    })?;
    source.fetch_text(&parsed).await
}

/// Resolve `criteria` to downloadable files under `archive_url`
///
/// `archive_url` is the provider's top-level listing, ending in a slash.
pub async fn resolve<S: ContentSource>(
    source: &S,
    profile: &ProviderProfile,
    archive_url: &str,
    criteria: &Criteria,
) -> Result<Vec<FileDescriptor>, AppError> {
    let query = NormalizedQuery::from_criteria(profile, criteria)?;
    debug!("Resolving {:?} for provider {}", query, profile.key);

    let top_level = fetch_listing(source, archive_url).await?;
    let index = DirectoryIndex::from_tokens(&listing::tokenize(&top_level));
    let directory =
        filters::resolve_directory(&index, query.format.as_deref(), &query.directory_dates())?;
    let directory_url = format!("{}{}", archive_url, directory);
    info!("Resolved directory {}", directory_url);

    let inner = fetch_listing(source, &directory_url).await?;
    let links = listing::extract_file_links(&listing::tokenize(&inner));
    debug!("{} files listed in {}", links.len(), directory);

    let links = filters::by_product_code(links, query.product_code.as_deref());
    let links = filters::by_resolution(links, query.resolution.as_deref());
    if exhausted("resolution", &links) {
        return Ok(Vec::new());
    }
    let links = filters::by_cycle(links, query.cycle.as_ref());
    if exhausted("cycle", &links) {
        return Ok(Vec::new());
    }
    let links = filters::by_forecast_range(links, query.forecast);
    if exhausted("forecast hours", &links) {
        return Ok(Vec::new());
    }
    let links = filters::by_product_type(links, query.product_type.as_deref());

    let descriptors = filters::assemble(&directory_url, &links);
    info!("{} files match in {}", descriptors.len(), directory);
    Ok(descriptors)
}

fn exhausted(stage: &str, links: &[FileLink]) -> bool {
    debug!("{} candidates after {} filter", links.len(), stage);
    links.is_empty()
}
