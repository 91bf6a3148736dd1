//! Error types for NCEP Fetcher
//!
//! Errors are split by concern so callers can tell a malformed query apart from
//! an empty archive or a broken network. Validation errors are always raised
//! before any network traffic happens.

use std::path::PathBuf;
use thiserror::Error;

/// Query and input validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Provider key or name is not one we know about
    #[error("Unknown provider: {provider}. Run 'providers' to list the available ones")]
    UnknownProvider { provider: String },

    /// Date is not a strict YYYYMMDD calendar date
    #[error("Incorrect date format: {date}. Expected YYYYMMDD")]
    InvalidDate { date: String },

    /// Cycle runtime is not a two-digit hour
    #[error("Invalid cycle runtime: {value}. Expected a two-digit hour between 00 and 23")]
    InvalidCycleRuntime { value: String },

    /// Provider lays out its directories per cycle, so a cycle is mandatory
    #[error("Provider {provider} requires a cycle runtime")]
    MissingCycleRuntime { provider: String },

    /// Product format is known but not supported
    #[error("Product format {format} is not supported")]
    UnsupportedFormat { format: String },

    /// Product type is not in the provider catalog
    #[error("Product type {product_type} is not in the catalog")]
    UnknownProductType { product_type: String },

    /// Product name does not belong to the given product type
    #[error("Product {product_name} is not associated with product type {product_type}")]
    UnknownProductName {
        product_type: String,
        product_name: String,
    },

    /// Product name supplied on its own
    #[error("Product name {product_name} was given without a product type")]
    ProductNameWithoutType { product_name: String },

    /// Forecast hour could not be parsed or is out of range
    #[error("Invalid {field} hour: {value}. Expected a number between 0 and {max}")]
    InvalidForecastHour {
        field: &'static str,
        value: String,
        max: u32,
    },

    /// Forecast end given without a start
    #[error("A forecast end hour cannot be given without a forecast start hour")]
    ForecastEndWithoutStart,

    /// Forecast start is after forecast end
    #[error("Forecast start hour {start} is after forecast end hour {end}")]
    ForecastRangeInverted { start: u32, end: u32 },

    /// Download destination does not exist
    #[error("Download destination is not an existing directory: {}", path.display())]
    DestinationMissing { path: PathBuf },
}

/// Well-formed query that matched nothing in the archive
#[derive(Error, Debug)]
pub enum NotFoundError {
    /// Format exists but the date is not listed under it
    #[error("Date {date} is not available for format {format}")]
    DateNotListed { format: String, date: String },

    /// Format does not appear in the top-level listing
    #[error("Format {format} is not listed by the archive")]
    FormatNotListed { format: String },

    /// No format lists the date
    #[error("Date {date} is not available under any format")]
    DateNotAvailable { date: String },
}

/// Network fetch errors
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP client failure
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// Request took longer than the configured timeout
    #[error("Request timed out: {url}")]
    Timeout { url: String },

    /// Server answered with a non-success status
    #[error("Unexpected response from {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    /// URL could not be parsed
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },
}

/// File download errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Body could not be fetched
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// I/O error during file operations
    #[error("File I/O error")]
    Io(#[from] std::io::Error),

    /// Listed file name cannot be used as a local file name
    #[error("Refusing to write file with unsafe name: {name}")]
    InvalidFileName { name: String },

    /// Atomic file operation failed
    #[error("Atomic file operation failed: could not rename {} to {}", temp_path.display(), final_path.display())]
    AtomicOperationFailed {
        temp_path: PathBuf,
        final_path: PathBuf,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Validation error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Not found error
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Transport error
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Download error
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if the error is recoverable (transient)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Transport(_)
                | AppError::Download(DownloadError::Transport(_))
                | AppError::NotFound(_)
        )
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::NotFound(_) => "not_found",
            AppError::Transport(_) => "transport",
            AppError::Download(_) => "download",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Validation result type alias
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, TransportError>;

/// Download result type alias
pub type DownloadResult<T> = std::result::Result<T, DownloadError>;

/// Config result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl TransportError {
    /// Classify a reqwest failure, keeping timeouts distinct
    pub fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout {
                url: url.to_string(),
            }
        } else {
            TransportError::Http(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_not_recoverable() {
        let error = AppError::from(ValidationError::ForecastEndWithoutStart);
        assert_eq!(error.category(), "validation");
        assert!(!error.is_recoverable());
    }

    #[test]
    fn test_transport_is_recoverable() {
        let error = AppError::from(TransportError::Status {
            url: "https://example.com/".to_string(),
            status: 404,
        });
        assert_eq!(error.category(), "transport");
        assert!(error.is_recoverable());
        assert!(error.to_string().contains("HTTP 404"));
    }

    #[test]
    fn test_not_found_message() {
        let error = NotFoundError::DateNotListed {
            format: "gfs".to_string(),
            date: "20180322".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Date 20180322 is not available for format gfs"
        );
    }
}
