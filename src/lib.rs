//! NCEP Fetcher Library
//!
//! A Rust library for finding and downloading forecast model output from the
//! NCEP operational archive. Queries are resolved against the archive's
//! directory listings and the matching files are streamed to disk.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use constants::*;

    #[test]
    fn test_constants_accessible() {
        assert!(USER_AGENT.contains("NCEP-Fetcher"));
        assert!(ARCHIVE_BASE_URL.ends_with("/com/"));
        assert_eq!(HTTP_TIMEOUT.as_secs(), 60);
    }

    #[test]
    fn test_error_types() {
        let error = AppError::from(errors::ValidationError::ForecastEndWithoutStart);

        assert_eq!(error.category(), "validation");
        assert!(!error.is_recoverable());
    }
}
