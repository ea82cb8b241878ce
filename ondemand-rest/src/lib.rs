//! Sauce REST client for the supported-platforms endpoint.
//!
//! Implements [`ondemand_core::PlatformSource`] over HTTP so the browser cache
//! can be fed straight from the testing service.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod config;

pub use client::SauceRestClient;
pub use config::SauceConfig;
