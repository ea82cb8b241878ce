//! Domain types for OnDemand.
//!
//! - [`Category`]: Automation tier a browser list belongs to
//! - [`PlatformDescriptor`]: Raw platform record from the Sauce REST API
//! - [`Browser`]: Normalized, keyed browser record served from the cache

mod browser;
mod category;
mod platform;

pub use browser::*;
pub use category::*;
pub use platform::*;
