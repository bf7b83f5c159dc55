use chrono::{DateTime, Duration, Utc};

use super::ResourceKind;
use crate::config::CacheConfig;

/// Pure staleness decision over per-kind TTLs.
///
/// A record is stale once its age strictly exceeds the TTL for its kind;
/// an age exactly equal to the TTL still counts as fresh. A `created_at`
/// in the future (clock skew) yields a negative age and is fresh.
#[derive(Debug, Clone)]
pub struct FreshnessPolicy {
    ttls: CacheConfig,
}

impl FreshnessPolicy {
    #[must_use]
    pub const fn new(ttls: CacheConfig) -> Self {
        Self { ttls }
    }

    #[must_use]
    pub fn ttl(&self, kind: ResourceKind) -> Duration {
        let seconds = i64::try_from(self.ttls.ttl_seconds(kind)).unwrap_or(i64::MAX);
        Duration::seconds(seconds)
    }

    #[must_use]
    pub fn is_stale(
        &self,
        kind: ResourceKind,
        created_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> bool {
        now.signed_duration_since(created_at) > self.ttl(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn policy() -> FreshnessPolicy {
        FreshnessPolicy::new(CacheConfig::default())
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn age_below_ttl_is_fresh() {
        let p = policy();
        let now = t0() + Duration::seconds(800);
        assert!(!p.is_stale(ResourceKind::Weather, t0(), now));
    }

    #[test]
    fn age_above_ttl_is_stale() {
        let p = policy();
        let now = t0() + Duration::seconds(1000);
        assert!(p.is_stale(ResourceKind::Weather, t0(), now));
    }

    #[test]
    fn age_equal_to_ttl_is_fresh() {
        let p = policy();
        let now = t0() + p.ttl(ResourceKind::Weather);
        assert!(!p.is_stale(ResourceKind::Weather, t0(), now));

        let one_past = now + Duration::seconds(1);
        assert!(p.is_stale(ResourceKind::Weather, t0(), one_past));
    }

    #[test]
    fn future_created_at_is_fresh() {
        let p = policy();
        let created = t0() + Duration::hours(48);
        assert!(!p.is_stale(ResourceKind::Weather, created, t0()));
    }

    #[test]
    fn kinds_use_their_own_ttl() {
        let p = policy();
        let now = t0() + Duration::hours(2);
        // Two hours is past the weather TTL but well inside the events TTL.
        assert!(p.is_stale(ResourceKind::Weather, t0(), now));
        assert!(!p.is_stale(ResourceKind::Events, t0(), now));
    }
}
