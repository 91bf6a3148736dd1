//! Content source abstraction
//!
//! The resolver and downloader only need two things from the network: the
//! text of a listing page and the body of a file. Keeping those behind a trait
//! lets the pipeline run against in-memory pages.

use std::future::Future;
use std::pin::Pin;

use futures::Stream;
use url::Url;

use crate::errors::FetchResult;

/// Body of a download, yielded chunk by chunk
pub type ByteStream = Pin<Box<dyn Stream<Item = FetchResult<Vec<u8>>> + Send>>;

/// Anything that can serve archive pages and file bodies
pub trait ContentSource {
    /// Fetch a page as text
    ///
    /// Any failure, including a non-success status, is an error. Error text is
    /// never returned in place of page content.
    fn fetch_text(&self, url: &Url) -> impl Future<Output = FetchResult<String>> + Send;

    /// Open a file body for streaming
    ///
    /// Fails with `TransportError::Status` unless the server answered 200.
    fn fetch_stream(&self, url: &Url) -> impl Future<Output = FetchResult<ByteStream>> + Send;
}
