//! Core HTTP operations with rate limiting
//!
//! Every request waits on a shared rate limiter so directory scans and batch
//! downloads stay polite to the archive. Requests are not retried; a failure
//! surfaces as a [`TransportError`] for the caller to handle.

use std::num::NonZeroU32;
use std::time::Duration;

use futures::StreamExt;
use governor::{clock::DefaultClock, state::InMemoryState, Jitter, Quota, RateLimiter};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::app::client::source::{ByteStream, ContentSource};
use crate::errors::{ConfigError, ConfigResult, FetchResult, TransportError};

/// HTTP operations handler
#[derive(Debug)]
pub struct HttpHandler {
    client: Client,
    rate_limiter: RateLimiter<governor::state::NotKeyed, InMemoryState, DefaultClock>,
}

impl HttpHandler {
    /// Creates a new HttpHandler with the given client and rate limiting
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the rate limit is zero
    pub fn new(client: Client, rate_limit_rps: u32) -> ConfigResult<Self> {
        let rate_limiter = Self::build_rate_limiter(rate_limit_rps)?;
        Ok(Self {
            client,
            rate_limiter,
        })
    }

    fn build_rate_limiter(
        rate_limit_rps: u32,
    ) -> ConfigResult<RateLimiter<governor::state::NotKeyed, InMemoryState, DefaultClock>> {
        let rps = NonZeroU32::new(rate_limit_rps).ok_or_else(|| ConfigError::InvalidValue {
            field: "client.rate_limit_rps".to_string(),
            value: rate_limit_rps.to_string(),
            reason: "Rate limit must be non-zero".to_string(),
        })?;
        Ok(RateLimiter::direct(Quota::per_second(rps)))
    }

    /// Sends a GET request once the rate limiter allows it
    pub async fn get_response(&self, url: &Url) -> FetchResult<reqwest::Response> {
        self.rate_limiter
            .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(100)))
            .await;

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(url.as_str(), e))?;

        tracing::debug!("{} {}", response.status(), url);
        Ok(response)
    }

    /// Fetches the HTML content of a web page
    pub async fn get_page(&self, url: &Url) -> FetchResult<String> {
        let response = self.get_response(url).await?;
        if !response.status().is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(url.as_str(), e))?;
        tracing::debug!("Fetched page: {} ({} bytes)", url, text.len());
        Ok(text)
    }
}

impl ContentSource for HttpHandler {
    async fn fetch_text(&self, url: &Url) -> FetchResult<String> {
        self.get_page(url).await
    }

    async fn fetch_stream(&self, url: &Url) -> FetchResult<ByteStream> {
        let response = self.get_response(url).await?;
        if response.status() != StatusCode::OK {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let source_url = url.to_string();
        let body = response.bytes_stream().map(move |chunk| {
            chunk
                .map(|bytes| bytes.to_vec())
                .map_err(|e| TransportError::from_reqwest(&source_url, e))
        });
        Ok(Box::pin(body))
    }
}
