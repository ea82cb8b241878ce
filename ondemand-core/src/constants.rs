//! Constants for OnDemand browser lookup.
//!
//! Cache freshness, Sauce REST endpoints, and the server-to-public operating
//! system name table.

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// How long a fetched browser list stays fresh, in seconds.
pub const CACHE_TTL_SECONDS: u64 = 60 * 60;

// ═══════════════════════════════════════════════════════════════════════════════
// SAUCE REST
// ═══════════════════════════════════════════════════════════════════════════════

/// Default Sauce REST base URL when none is configured.
pub const DEFAULT_SAUCE_REST_URL: &str = "https://saucelabs.com";

/// Path prefix of the supported-platforms endpoint.
/// The automation API name is appended as the final segment.
pub const PLATFORMS_PATH: &str = "/rest/v1/info/platforms";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Environment variable holding the Sauce REST base URL.
pub const ENV_SAUCE_REST_ENDPOINT: &str = "SAUCE_REST_ENDPOINT";

/// Environment variable holding the Sauce username.
pub const ENV_SAUCE_USERNAME: &str = "SAUCE_USERNAME";

/// Environment variable holding the Sauce access key.
pub const ENV_SAUCE_ACCESS_KEY: &str = "SAUCE_ACCESS_KEY";

// ═══════════════════════════════════════════════════════════════════════════════
// OPERATING SYSTEM NAMES
// ═══════════════════════════════════════════════════════════════════════════════
// The platforms endpoint reports the server OS a VM runs (eg. "Windows 2003")
// rather than the name users know (eg. "Windows XP").

/// Server OS identifier → public display name.
pub const OS_DESCRIPTIONS: &[(&str, &str)] = &[
    ("Windows 2015", "Windows 10"),
    ("Windows 2012 R2", "Windows 8.1"),
    ("Windows 2012", "Windows 8"),
    ("Windows 2008", "Windows 7"),
    ("Windows 2003", "Windows XP"),
    ("Mac 10.11", "OS X El Capitan"),
    ("Mac 10.10", "OS X Yosemite"),
    ("Mac 10.9", "OS X Mavericks"),
    ("Mac 10.8", "OS X Mountain Lion"),
];

/// Returns the public display name for a server OS identifier, if one is known.
pub fn os_description(server_os: &str) -> Option<&'static str> {
    OS_DESCRIPTIONS
        .iter()
        .find(|(server, _)| *server == server_os)
        .map(|(_, public)| *public)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Windows 2015", "Windows 10")]
    #[test_case("Windows 2012 R2", "Windows 8.1")]
    #[test_case("Windows 2012", "Windows 8")]
    #[test_case("Windows 2008", "Windows 7")]
    #[test_case("Windows 2003", "Windows XP")]
    #[test_case("Mac 10.11", "OS X El Capitan")]
    #[test_case("Mac 10.8", "OS X Mountain Lion")]
    fn test_os_description_known(server: &str, public: &str) {
        assert_eq!(os_description(server), Some(public));
    }

    #[test]
    fn test_os_description_unknown() {
        assert_eq!(os_description("Linux"), None);
        // Exact match only
        assert_eq!(os_description("windows 2012"), None);
    }

    #[test]
    fn test_os_table_keys_unique() {
        for (i, (a, _)) in OS_DESCRIPTIONS.iter().enumerate() {
            for (b, _) in &OS_DESCRIPTIONS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
