//! Application constants for NCEP Fetcher
//!
//! This module centralizes the constants used throughout the application,
//! organized by functional domain.

use std::time::Duration;

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "NCEP-Fetcher/0.1.0 (Forecast Data Tool)";

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);
}

/// Rate limiting configuration
pub mod limits {
    /// Default rate limit for archive requests (requests per second)
    pub const DEFAULT_RATE_LIMIT_RPS: u32 = 5;
}

/// NCEP service URLs
pub mod ncep {
    /// Bulk-data archive holding the `<provider>/prod/` trees
    pub const ARCHIVE_BASE_URL: &str = "https://www.ftp.ncep.noaa.gov/data/nccf/com/";

    /// Product inventory pages describing each provider
    pub const SITE_BASE_URL: &str = "https://www.nco.ncep.noaa.gov/pmb/products/";

    /// Path segment below a provider holding operational output
    pub const PRODUCTION_PATH: &str = "prod/";

    /// Identifier stamped on every file descriptor
    pub const DESCRIPTOR_ID: &str = "ncep";
}

/// Directory listing conventions
pub mod listing {
    /// Index sidecar files, never downloaded
    pub const INDEX_SUFFIX: &str = ".idx";

    /// Length of a bare YYYYMMDD date
    pub const DATE_LENGTH: usize = 8;

    /// Characters of a trailing cycle suffix on cycle-qualified directories
    pub const CYCLE_SUFFIX_LENGTH: usize = 2;
}

/// Query limits
pub mod query {
    /// Formats the archive lists but the file layout does not support
    pub const UNSUPPORTED_FORMATS: &[&str] = &["enkf"];

    /// Highest accepted forecast start hour
    pub const MAX_FORECAST_START: u32 = 385;

    /// Highest accepted forecast end hour
    pub const MAX_FORECAST_END: u32 = 386;
}

/// File operation constants
pub mod files {
    /// Suffix for partially written downloads
    pub const TEMP_FILE_SUFFIX: &str = ".part";

    /// Write buffer size for streamed downloads (64KB)
    pub const DOWNLOAD_CHUNK_SIZE: usize = 64 * 1024;
}

/// Download concurrency
pub mod workers {
    /// Default number of simultaneous downloads (serial)
    pub const DEFAULT_CONCURRENCY: usize = 1;

    /// Maximum recommended simultaneous downloads
    pub const MAX_CONCURRENCY: usize = 8;
}

/// Logging constants
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}

// Re-export commonly used constants for convenience
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
pub use ncep::{ARCHIVE_BASE_URL, SITE_BASE_URL};
