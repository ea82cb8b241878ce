//! Normalized browser records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Screen orientation of a mobile device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Portrait
    Portrait,
    /// Landscape
    Landscape,
}

impl Orientation {
    /// Both orientations, in the order records are produced.
    pub const ALL: [Orientation; 2] = [Orientation::Portrait, Orientation::Landscape];

    /// Lowercase name, as used in keys and labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A browser (or device) that can be requested from the testing service.
///
/// Records order by `key` first, which is the order browser lists are served in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Browser {
    /// Unique key within a category
    pub key: String,
    /// Public operating system name
    pub os: String,
    /// Automation engine name (eg. "chrome")
    pub browser_name: String,
    /// Human-readable browser name (eg. "Google Chrome")
    pub long_name: String,
    /// Short version (eg. "48")
    pub short_version: String,
    /// Full version, compared numerically when resolving the latest version
    pub long_version: String,
    /// Display label
    pub label: String,
    /// Device name, for mobile browsers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Device type (eg. "tablet")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    /// Device orientation, for mobile browsers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
}

impl Browser {
    /// Parses `long_version` as a 32-bit integer.
    ///
    /// Returns None for versions such as "48.0.2564.", "beta", " 50 ", or
    /// anything outside the `i32` range.
    pub fn version_number(&self) -> Option<i32> {
        self.long_version.parse().ok()
    }

    /// Returns true if `other` is the same browser on the same OS, ignoring version.
    pub fn same_family(&self, other: &Browser) -> bool {
        self.browser_name == other.browser_name && self.os == other.os
    }

    /// Returns true if this is a mobile device record.
    pub fn is_mobile(&self) -> bool {
        self.device.is_some()
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.os)
    }
}
