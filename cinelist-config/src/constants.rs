//! Defaults and environment variable names.

use std::time::Duration;

/// json-server listens here in local development.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Five minutes, matching the catalog service timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Stand-in for the logged-in user; the API has no user resource.
pub const DEFAULT_VIEWER_ID: u64 = 1;

/// Number of entries shown in the trending strip.
pub const DEFAULT_TRENDING_LIMIT: usize = 4;

pub mod env {
    pub const API_URL: &str = "CINELIST_API_URL";
    pub const REQUEST_TIMEOUT: &str = "CINELIST_REQUEST_TIMEOUT";
    pub const VIEWER_ID: &str = "CINELIST_VIEWER_ID";
    pub const TRENDING_LIMIT: &str = "CINELIST_TRENDING_LIMIT";
    pub const CONFIG_PATH: &str = "CINELIST_CONFIG";
}
