//! Automation categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OnDemandError;

/// Automation tier. Each category has its own independent browser cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Classic Selenium remote-control browsers
    Classic,
    /// WebDriver-capable browsers
    WebDriver,
    /// Mobile browsers and devices driven through Appium
    Appium,
}

impl Category {
    /// All categories, in refresh order.
    pub const ALL: [Category; 3] = [Category::Classic, Category::WebDriver, Category::Appium];

    /// Name used on the command line and in API paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Classic => "classic",
            Category::WebDriver => "webdriver",
            Category::Appium => "appium",
        }
    }

    /// Automation API segment of the Sauce REST platforms endpoint.
    pub fn automation_api(&self) -> &'static str {
        match self {
            Category::Classic => "selenium-rc",
            Category::WebDriver => "webdriver",
            Category::Appium => "appium",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = OnDemandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" | "selenium-rc" | "selenium" => Ok(Category::Classic),
            "webdriver" => Ok(Category::WebDriver),
            "appium" => Ok(Category::Appium),
            _ => Err(OnDemandError::UnknownCategory(s.to_string())),
        }
    }
}
