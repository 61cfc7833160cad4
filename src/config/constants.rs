//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Pagination
// =============================================================================

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Maximum allowed items per page to prevent excessive queries
pub const MAX_PAGE_SIZE: u64 = 100;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default deployment environment name
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Database
// =============================================================================

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_USER: &str = "user";
pub const DEFAULT_DB_PASSWORD: &str = "password";
pub const DEFAULT_DB_NAME: &str = "mydb";
pub const DEFAULT_DB_SSL_MODE: &str = "disable";

// =============================================================================
// Validation
// =============================================================================

/// Minimum user name length (characters, after trimming)
pub const MIN_NAME_LENGTH: usize = 2;

/// Maximum user name length (characters, after trimming)
pub const MAX_NAME_LENGTH: usize = 100;

// =============================================================================
// API
// =============================================================================

/// Prefix under which all versioned resources are mounted
pub const API_V1_PREFIX: &str = "/api/v1";
