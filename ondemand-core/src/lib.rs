//! # OnDemand Core
//!
//! Core types, errors, and traits shared by the OnDemand browser lookup crates.
//!
//! This crate provides the foundational building blocks used by all other crates:
//!
//! - **Types**: [`Browser`] records, automation [`Category`] tiers, and the raw
//!   [`PlatformDescriptor`] returned by the Sauce REST API
//! - **Errors**: A single error enum with recoverability classification
//! - **Constants**: Cache TTL, REST endpoints, and the OS display-name table
//! - **Traits**: The remote platform boundary and the clock used for staleness
//!
//! ## Example
//!
//! ```rust
//! use ondemand_core::{Category, PlatformDescriptor};
//!
//! let category: Category = "webdriver".parse().unwrap();
//! assert_eq!(category.automation_api(), "webdriver");
//!
//! let json = r#"{"api_name":"chrome","long_name":"Google Chrome",
//!     "short_version":"48","long_version":"48","os":"Windows 2012 R2"}"#;
//! let platform: PlatformDescriptor = serde_json::from_str(json).unwrap();
//! assert!(!platform.has_device());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{OnDemandError, Result};
pub use traits::*;
pub use types::*;
