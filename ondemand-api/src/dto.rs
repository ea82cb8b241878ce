//! DTOs for API requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ondemand_cache::CacheStats;
use ondemand_core::types::{Browser, Category};

/// Response for health checks.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" when the server answers
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
    /// Current cache statistics
    pub cache: CacheStats,
}

/// A list of browsers for one category.
#[derive(Debug, Serialize)]
pub struct BrowserListResponse {
    /// Category the browsers belong to
    pub category: Category,
    /// Number of browsers
    pub count: usize,
    /// When the cache was last refreshed
    pub last_fetch: Option<DateTime<Utc>>,
    /// Browsers sorted by key
    pub browsers: Vec<Browser>,
}

impl BrowserListResponse {
    /// Wraps a sorted browser list.
    pub fn new(category: Category, browsers: Vec<Browser>, last_fetch: Option<DateTime<Utc>>) -> Self {
        Self {
            category,
            count: browsers.len(),
            last_fetch,
            browsers,
        }
    }
}

/// Query parameters for single-browser lookups.
#[derive(Debug, Default, Deserialize)]
pub struct LookupQuery {
    /// Resolve to the newest version of the same browser and OS
    #[serde(default)]
    pub latest: bool,
}
