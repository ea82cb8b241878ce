//! # OnDemand Cache
//!
//! In-memory cache of the browsers a remote testing service supports.
//!
//! Browser lists are fetched per [`Category`](ondemand_core::Category) through a
//! [`PlatformSource`](ondemand_core::PlatformSource), normalized into keyed
//! [`Browser`](ondemand_core::Browser) records, and served for up to an hour
//! before the next read refreshes them.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ondemand_cache::{BrowserFactory, FactoryConfig};
//! use ondemand_core::Category;
//! use ondemand_rest::SauceRestClient;
//!
//! let source = Arc::new(SauceRestClient::new()?);
//! let factory = BrowserFactory::new_warmed(source, FactoryConfig::default()).await;
//!
//! let browsers = factory.list(Category::WebDriver).await;
//! let latest = factory.lookup_latest(Category::WebDriver, &browsers[0].key)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod builder;
mod factory;
pub mod staleness;

pub use builder::{browser_key, browser_label, build_browsers, operating_system_name};
pub use factory::{BrowserFactory, CacheStats, FactoryConfig};
pub use staleness::should_refresh;
