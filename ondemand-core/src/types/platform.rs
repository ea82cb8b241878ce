//! Raw platform records as returned by the Sauce REST platforms endpoint.

use serde::{Deserialize, Serialize};

/// One supported OS/browser/device combination reported by the remote service.
///
/// Field names follow the Sauce REST JSON; fields this crate does not use are
/// ignored on deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformDescriptor {
    /// Automation engine name (eg. "chrome", "iphone")
    pub api_name: String,
    /// Human-readable browser name (eg. "Google Chrome")
    pub long_name: String,
    /// Short version (eg. "48")
    pub short_version: String,
    /// Full version string
    pub long_version: String,
    /// Server OS identifier (eg. "Windows 2012 R2")
    pub os: String,
    /// Device name, present for mobile platforms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Device type (eg. "tablet", "phone")
    #[serde(default, alias = "deviceType", skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    /// Backend that drives this platform (eg. "webdriver", "appium")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automation_backend: Option<String>,
}

impl PlatformDescriptor {
    /// Creates a desktop platform without device information.
    pub fn new(
        api_name: impl Into<String>,
        long_name: impl Into<String>,
        short_version: impl Into<String>,
        long_version: impl Into<String>,
        os: impl Into<String>,
    ) -> Self {
        Self {
            api_name: api_name.into(),
            long_name: long_name.into(),
            short_version: short_version.into(),
            long_version: long_version.into(),
            os: os.into(),
            device: None,
            device_type: None,
            automation_backend: None,
        }
    }

    /// Adds device information, turning this into a mobile platform.
    pub fn with_device(mut self, device: impl Into<String>, device_type: Option<String>) -> Self {
        self.device = Some(device.into());
        self.device_type = device_type;
        self
    }

    /// Returns true if this platform describes a mobile device.
    pub fn has_device(&self) -> bool {
        self.device.as_deref().is_some_and(|d| !d.trim().is_empty())
    }
}
