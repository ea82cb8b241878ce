//! Cache freshness policy.

use chrono::{DateTime, Duration, Utc};

use ondemand_core::constants::CACHE_TTL_SECONDS;

/// Default freshness window.
pub fn default_ttl() -> Duration {
    Duration::seconds(CACHE_TTL_SECONDS as i64)
}

/// Returns true if nothing has been fetched yet or more than `ttl` has passed
/// since the last fetch.
pub fn should_refresh(last_fetch: Option<DateTime<Utc>>, now: DateTime<Utc>, ttl: Duration) -> bool {
    match last_fetch {
        None => true,
        Some(fetched_at) => now - fetched_at > ttl,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_never_fetched() {
        assert!(should_refresh(None, noon(), default_ttl()));
    }

    #[test]
    fn test_fresh_within_hour() {
        let fetched = noon();
        assert!(!should_refresh(Some(fetched), fetched, default_ttl()));
        assert!(!should_refresh(Some(fetched), fetched + Duration::minutes(59), default_ttl()));
    }

    #[test]
    fn test_exactly_one_hour_is_still_fresh() {
        let fetched = noon();
        assert!(!should_refresh(Some(fetched), fetched + Duration::hours(1), default_ttl()));
    }

    #[test]
    fn test_stale_after_hour() {
        let fetched = noon();
        assert!(should_refresh(
            Some(fetched),
            fetched + Duration::hours(1) + Duration::seconds(1),
            default_ttl()
        ));
    }

    #[test]
    fn test_custom_ttl() {
        let fetched = noon();
        let ttl = Duration::minutes(5);
        assert!(!should_refresh(Some(fetched), fetched + Duration::minutes(5), ttl));
        assert!(should_refresh(Some(fetched), fetched + Duration::minutes(6), ttl));
    }
}
