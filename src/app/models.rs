//! Data models for NCEP Fetcher
//!
//! This module defines the core data structures used throughout the application:
//! raw listing tokens, file links, query criteria and the file descriptors that
//! come out of the resolver.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::ncep;
use crate::errors::{ValidationError, ValidationResult};

/// An attribute pair found on a start tag of a directory listing
///
/// Only attributes whose value carries a dot are kept by the tokenizer, so the
/// value is normally a directory (`gfs.2018032218/`) or a file name
/// (`gfs.t18z.pgrb2.1p00.f003`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Attribute name (e.g., "href")
    pub name: String,
    /// Attribute value, possibly with a trailing slash
    pub value: String,
}

impl Token {
    /// Create a token from an attribute pair
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, '{}')", self.name, self.value)
    }
}

/// Error returned when a raw `(name, 'value')` pair cannot be split
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed token: {raw}")]
pub struct ParseTokenError {
    pub raw: String,
}

impl FromStr for Token {
    type Err = ParseTokenError;

    /// Parse the rendered pair form, e.g. `(href, 'gfs.20180322/')`
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (name, value) = raw.split_once(',').ok_or_else(|| ParseTokenError {
            raw: raw.to_string(),
        })?;

        let name = name
            .trim()
            .trim_start_matches('(')
            .trim()
            .trim_matches(|c| c == '\'' || c == '"');
        let value = value
            .trim()
            .trim_end_matches(')')
            .trim()
            .trim_matches(|c| c == '\'' || c == '"');

        if name.is_empty() || value.is_empty() {
            return Err(ParseTokenError {
                raw: raw.to_string(),
            });
        }

        Ok(Token::new(name, value))
    }
}

/// A file entry from a sub-directory listing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileLink {
    /// Cleaned file name (e.g., "gfs.t18z.pgrb2.1p00.f003")
    pub name: String,
}

impl FileLink {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Leading dot-delimited segment
    pub fn extension(&self) -> &str {
        self.name.split('.').next().unwrap_or_default()
    }

    /// Final dot-delimited segment (e.g., "f003")
    pub fn suffix(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or_default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.name.contains(needle)
    }
}

impl fmt::Display for FileLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A downloadable file produced by the resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// File name as listed by the archive
    pub file_name: String,
    /// Source identifier, always "ncep"
    pub id: String,
    /// Sub-directory URL joined with the file name
    pub download_url: String,
    /// Final dot-delimited segment of the file name
    pub file_format: String,
}

impl FileDescriptor {
    /// Build a descriptor for a link inside a resolved sub-directory
    pub fn from_link(directory_url: &str, link: &FileLink) -> Self {
        Self {
            file_name: link.name.clone(),
            id: ncep::DESCRIPTOR_ID.to_string(),
            download_url: format!("{}/{}", directory_url.trim_end_matches('/'), link.name),
            file_format: link.suffix().to_string(),
        }
    }
}

/// User query against one provider
///
/// Every selector is optional apart from the provider and date, which are
/// checked by the client before the resolver sees the query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    /// Provider key or display name (e.g., "gfs")
    pub provider: String,
    /// Run date as YYYYMMDD
    pub date: String,
    /// Directory family (e.g., "gfs", "gdas"); absent means search all
    pub format: Option<String>,
    /// Two-digit cycle hour (e.g., "18")
    pub cycle_runtime: Option<String>,
    /// Resolution token matched against file names (e.g., "1p00")
    pub resolution: Option<String>,
    /// Catalog product type (e.g., "GFS")
    pub product_type: Option<String>,
    /// Catalog product name within the type
    pub product_name: Option<String>,
    /// First forecast hour, leading zeros allowed
    pub forecast_start: Option<String>,
    /// Last forecast hour, leading zeros allowed
    pub forecast_end: Option<String>,
}

impl Criteria {
    pub fn new(provider: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            date: date.into(),
            ..Default::default()
        }
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn cycle_runtime(mut self, cycle: impl Into<String>) -> Self {
        self.cycle_runtime = Some(cycle.into());
        self
    }

    pub fn resolution(mut self, resolution: impl Into<String>) -> Self {
        self.resolution = Some(resolution.into());
        self
    }

    pub fn product(
        mut self,
        product_type: impl Into<String>,
        product_name: impl Into<String>,
    ) -> Self {
        self.product_type = Some(product_type.into());
        self.product_name = Some(product_name.into());
        self
    }

    pub fn product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    pub fn forecast_start(mut self, hour: impl Into<String>) -> Self {
        self.forecast_start = Some(hour.into());
        self
    }

    pub fn forecast_end(mut self, hour: impl Into<String>) -> Self {
        self.forecast_end = Some(hour.into());
        self
    }

    pub fn forecast_hours(self, start: u32, end: u32) -> Self {
        self.forecast_start(start.to_string())
            .forecast_end(end.to_string())
    }
}

/// Hour a forecast run was initiated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleRuntime(u8);

impl CycleRuntime {
    /// Parse a two-digit hour such as "00" or "18"
    pub fn parse(value: &str) -> ValidationResult<Self> {
        let invalid = || ValidationError::InvalidCycleRuntime {
            value: value.to_string(),
        };

        if value.len() != 2 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let hour: u8 = value.parse().map_err(|_| invalid())?;
        if hour > 23 {
            return Err(invalid());
        }
        Ok(Self(hour))
    }

    pub fn hour(&self) -> u8 {
        self.0
    }

    /// Form used inside file names, e.g. "t18z"
    pub fn token(&self) -> String {
        format!("t{:02}z", self.0)
    }
}

impl fmt::Display for CycleRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Inclusive range of forecast hours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastRange {
    pub start: u32,
    pub end: u32,
}

impl ForecastRange {
    /// True if the link names any hour of the range as `fNNN`
    pub fn contains_link(&self, link: &FileLink) -> bool {
        (self.start..=self.end).any(|hour| link.contains(&format!("f{:03}", hour)))
    }
}
