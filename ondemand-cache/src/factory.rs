//! Browser lists cached per category, refreshed lazily once they go stale.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use ondemand_core::constants::CACHE_TTL_SECONDS;
use ondemand_core::error::{OnDemandError, Result};
use ondemand_core::traits::{Clock, PlatformSource, SystemClock};
use ondemand_core::types::{Browser, Category};

use crate::builder::build_browsers;
use crate::staleness::should_refresh;

/// Factory configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FactoryConfig {
    /// How long fetched lists stay fresh, in seconds
    pub ttl_seconds: u64,
    /// Whether `new_warmed` fetches every category up front
    pub warm_on_start: bool,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: CACHE_TTL_SECONDS,
            warm_on_start: true,
        }
    }
}

impl FactoryConfig {
    /// Checks that `ttl_seconds` fits in a freshness window.
    pub fn validate(&self) -> Result<()> {
        self.try_ttl().map(|_| ()).ok_or_else(|| {
            OnDemandError::ConfigError(format!("ttl_seconds out of range: {}", self.ttl_seconds))
        })
    }

    /// Freshness window. Out-of-range values saturate rather than wrap.
    pub fn ttl(&self) -> Duration {
        self.try_ttl().unwrap_or(Duration::MAX)
    }

    fn try_ttl(&self) -> Option<Duration> {
        i64::try_from(self.ttl_seconds).ok().and_then(Duration::try_seconds)
    }
}

type BrowserLookup = HashMap<String, Browser>;

#[derive(Default)]
struct CacheState {
    classic: BrowserLookup,
    webdriver: BrowserLookup,
    appium: BrowserLookup,
    /// Shared by all categories: refreshing any one resets the clock for all.
    last_fetch: Option<DateTime<Utc>>,
}

impl CacheState {
    fn lookup(&self, category: Category) -> &BrowserLookup {
        match category {
            Category::Classic => &self.classic,
            Category::WebDriver => &self.webdriver,
            Category::Appium => &self.appium,
        }
    }

    fn lookup_mut(&mut self, category: Category) -> &mut BrowserLookup {
        match category {
            Category::Classic => &mut self.classic,
            Category::WebDriver => &mut self.webdriver,
            Category::Appium => &mut self.appium,
        }
    }
}

/// Retrieves supported browsers from a [`PlatformSource`] and caches them for
/// the configured TTL (one hour by default).
///
/// Each category keeps its own key → browser mapping, replaced wholesale on
/// refresh. Reads refresh inline when the cache is stale; the lock is never
/// held across the remote call.
pub struct BrowserFactory {
    source: Arc<dyn PlatformSource>,
    clock: Arc<dyn Clock>,
    config: FactoryConfig,
    state: RwLock<CacheState>,
}

impl BrowserFactory {
    /// Creates a factory with empty caches and default configuration.
    pub fn new(source: Arc<dyn PlatformSource>) -> Self {
        Self::with_config(source, FactoryConfig::default())
    }

    /// Creates a factory with empty caches.
    pub fn with_config(source: Arc<dyn PlatformSource>, config: FactoryConfig) -> Self {
        Self {
            source,
            clock: Arc::new(SystemClock),
            config,
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Replaces the clock used for staleness checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Creates a factory and, if configured, warms every category.
    ///
    /// Never fails: if the remote service is unreachable the factory starts
    /// with empty caches (see [`warm`](Self::warm)).
    pub async fn new_warmed(source: Arc<dyn PlatformSource>, config: FactoryConfig) -> Self {
        let factory = Self::with_config(source, config);
        if factory.config.warm_on_start {
            factory.warm().await;
        }
        factory
    }

    /// Best-effort refresh of every category.
    ///
    /// Stops at the first failure, logs it, and leaves the remaining caches as
    /// they were. Returns true if every category was refreshed.
    pub async fn warm(&self) -> bool {
        for category in Category::ALL {
            if let Err(e) = self.refresh(category).await {
                warn!(%category, error = %e, "Error retrieving browsers, attempting to continue");
                return false;
            }
        }
        true
    }

    /// Fetches the category's browsers and replaces its cache.
    ///
    /// On failure nothing is modified, including the last-fetch time, and the
    /// error is returned.
    #[instrument(skip(self))]
    pub async fn refresh(&self, category: Category) -> Result<Vec<Browser>> {
        let platforms = self.source.supported_platforms(category).await?;
        let browsers = build_browsers(&platforms);

        let mut lookup = BrowserLookup::with_capacity(browsers.len());
        for browser in &browsers {
            if let Some(previous) = lookup.insert(browser.key.clone(), browser.clone()) {
                debug!(key = %previous.key, "Duplicate browser key, keeping the later entry");
            }
        }

        let mut sorted: Vec<Browser> = lookup.values().cloned().collect();
        sorted.sort();

        {
            let mut state = self.state.write();
            *state.lookup_mut(category) = lookup;
            state.last_fetch = Some(self.clock.now());
        }

        info!(platforms = platforms.len(), browsers = sorted.len(), "Refreshed browser cache");
        Ok(sorted)
    }

    /// Returns true if the next read would refresh.
    pub fn should_refresh(&self) -> bool {
        let last_fetch = self.state.read().last_fetch;
        should_refresh(last_fetch, self.clock.now(), self.config.ttl())
    }

    /// Returns the category's browsers sorted by key.
    ///
    /// Refreshes first if the cache is stale. A failed refresh is logged and
    /// whatever is cached (possibly nothing) is served instead.
    pub async fn list(&self, category: Category) -> Vec<Browser> {
        if self.should_refresh() {
            match self.refresh(category).await {
                Ok(browsers) => return browsers,
                Err(e) => {
                    warn!(%category, error = %e, "Refresh failed, serving cached browsers");
                }
            }
        } else {
            debug!(%category, "Serving cached browsers");
        }

        self.cached(category)
    }

    /// Returns the category's cached browsers sorted by key, without refreshing.
    pub fn cached(&self, category: Category) -> Vec<Browser> {
        let mut browsers: Vec<Browser> = self.state.read().lookup(category).values().cloned().collect();
        browsers.sort();
        browsers
    }

    /// Returns the browser with exactly this key, if cached.
    pub fn lookup(&self, category: Category, key: &str) -> Option<Browser> {
        self.state.read().lookup(category).get(key).cloned()
    }

    /// Returns the newest version of the browser identified by `key`.
    ///
    /// Considers every cached browser in the category with the same engine name
    /// and OS whose long version parses as an integer, and picks the highest.
    /// Unparseable versions are ignored. If nothing is newer (or the base
    /// version itself is not numeric) the base browser is returned. Among
    /// equally new records, one in the base's orientation wins.
    ///
    /// Fails with [`OnDemandError::BrowserNotFound`] if `key` is not cached.
    pub fn lookup_latest(&self, category: Category, key: &str) -> Result<Browser> {
        let state = self.state.read();
        let lookup = state.lookup(category);

        let base = lookup.get(key).ok_or_else(|| OnDemandError::BrowserNotFound {
            category: category.to_string(),
            key: key.to_string(),
        })?;

        let Some(mut best_version) = base.version_number() else {
            return Ok(base.clone());
        };

        let mut best = base;
        for candidate in lookup.values() {
            if candidate.key == base.key || !candidate.same_family(base) {
                continue;
            }
            let Some(version) = candidate.version_number() else {
                continue;
            };
            let replaces = if version == best_version {
                best.key != base.key && preferred_on_tie(base, candidate, best)
            } else {
                version > best_version
            };
            if replaces {
                best = candidate;
                best_version = version;
            }
        }

        if best.key != base.key {
            debug!(%category, key, latest = %best.key, "Resolved newer browser version");
        }
        Ok(best.clone())
    }

    /// Looks up a browser, optionally resolving it to its newest version.
    ///
    /// Without `use_latest` a miss is `Ok(None)`; with it a miss is an error.
    pub fn lookup_with(&self, category: Category, key: &str, use_latest: bool) -> Result<Option<Browser>> {
        if use_latest {
            self.lookup_latest(category, key).map(Some)
        } else {
            Ok(self.lookup(category, key))
        }
    }

    /// Time of the last successful refresh of any category.
    pub fn last_fetch(&self) -> Option<DateTime<Utc>> {
        self.state.read().last_fetch
    }

    /// Returns the factory configuration.
    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let state = self.state.read();
        CacheStats {
            classic: state.classic.len(),
            webdriver: state.webdriver.len(),
            appium: state.appium.len(),
            last_fetch: state.last_fetch,
            stale: should_refresh(state.last_fetch, self.clock.now(), self.config.ttl()),
        }
    }
}

/// Between two records of the same version, keeps the base's orientation,
/// then the smaller key, so the answer does not depend on map iteration order.
fn preferred_on_tie(base: &Browser, candidate: &Browser, current: &Browser) -> bool {
    let candidate_matches = candidate.orientation == base.orientation;
    let current_matches = current.orientation == base.orientation;
    if candidate_matches != current_matches {
        candidate_matches
    } else {
        candidate.key < current.key
    }
}

/// Cache statistics.
#[derive(Clone, Debug, Serialize)]
pub struct CacheStats {
    /// Cached classic browsers
    pub classic: usize,
    /// Cached WebDriver browsers
    pub webdriver: usize,
    /// Cached Appium browsers
    pub appium: usize,
    /// Last successful refresh
    pub last_fetch: Option<DateTime<Utc>>,
    /// Whether the next read will refresh
    pub stale: bool,
}
