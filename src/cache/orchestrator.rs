//! Lookup-or-fetch coordination.
//!
//! [`CacheOrchestrator::resolve`] is the single entry point for every
//! cached kind: query the store, apply the freshness policy, purge stale
//! rows, and delegate to the supplied fetcher when the cache cannot
//! answer. Fetched data is persisted before it is returned, stamped with
//! the orchestrator's clock so the stored generation starts at age zero.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics::counter;
use tracing::debug;

use super::{CacheError, Clock, FreshnessPolicy, ResourceKind, SystemClock};
use crate::clients::FetchError;
use crate::db::StoreError;

/// A row read back from the store: the payload plus the insertion
/// timestamp the freshness policy evaluates.
#[derive(Debug, Clone)]
pub struct Stored<P> {
    pub payload: P,
    pub created_at: DateTime<Utc>,
}

/// Persistent store adapter for one resource kind.
///
/// `find` returns an empty vec, not an error, when nothing matches;
/// `delete` is idempotent and reports the number of rows removed. Rows
/// are never updated in place: replacing a generation is always a delete
/// followed by an insert.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    type Key: Send + Sync;
    type Payload: Send + Sync;

    async fn find(&self, key: &Self::Key) -> Result<Vec<Stored<Self::Payload>>, StoreError>;

    async fn delete(&self, key: &Self::Key) -> Result<u64, StoreError>;

    async fn insert(
        &self,
        key: &Self::Key,
        items: &[Self::Payload],
        fetched_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}

pub struct CacheOrchestrator<C = SystemClock> {
    policy: FreshnessPolicy,
    clock: C,
}

impl CacheOrchestrator<SystemClock> {
    #[must_use]
    pub const fn new(policy: FreshnessPolicy) -> Self {
        Self::with_clock(policy, SystemClock)
    }
}

impl<C: Clock> CacheOrchestrator<C> {
    #[must_use]
    pub const fn with_clock(policy: FreshnessPolicy, clock: C) -> Self {
        Self { policy, clock }
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Freshness check against the current clock, for callers that drive
    /// the hit/miss sequence themselves.
    #[must_use]
    pub fn is_fresh(&self, kind: ResourceKind, created_at: DateTime<Utc>) -> bool {
        !self.policy.is_stale(kind, created_at, self.clock.now())
    }

    /// Serve `kind` for `key` from the store, or fetch and repopulate.
    ///
    /// Within one call the steps run strictly in order: the find
    /// completes before the fetch decision, and a stale delete completes
    /// before the replacement insert. A fetcher failure surfaces
    /// [`CacheError::FetchFailed`] without inserting anything, so the
    /// caller never sees a partially written generation.
    pub async fn resolve<S, F, Fut>(
        &self,
        kind: ResourceKind,
        key: &S::Key,
        store: &S,
        fetch: F,
    ) -> Result<Vec<S::Payload>, CacheError>
    where
        S: ResourceStore,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<S::Payload>, FetchError>>,
    {
        let rows = store.find(key).await?;

        if let Some(first) = rows.first() {
            if self.is_fresh(kind, first.created_at) {
                debug!(kind = %kind, rows = rows.len(), "cache hit");
                counter!("cache_lookups_total", "kind" => kind.as_str(), "outcome" => "hit")
                    .increment(1);
                return Ok(rows.into_iter().map(|r| r.payload).collect());
            }

            let removed = store.delete(key).await?;
            debug!(kind = %kind, removed, "evicted stale rows");
            counter!("cache_lookups_total", "kind" => kind.as_str(), "outcome" => "stale")
                .increment(1);
        } else {
            counter!("cache_lookups_total", "kind" => kind.as_str(), "outcome" => "miss")
                .increment(1);
        }

        let fetched = fetch().await.map_err(CacheError::FetchFailed)?;
        store.insert(key, &fetched, self.clock.now()).await?;
        debug!(kind = %kind, rows = fetched.len(), "repopulated from upstream");

        Ok(fetched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;
    use chrono::{Duration, TimeZone};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone)]
    struct FakeClock(DateTime<Utc>);

    impl Clock for FakeClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    /// In-memory store that records the order of operations.
    #[derive(Default)]
    struct MemoryStore {
        rows: Mutex<Vec<Stored<String>>>,
        ops: Mutex<Vec<&'static str>>,
    }

    impl MemoryStore {
        fn seeded(payload: &str, created_at: DateTime<Utc>) -> Self {
            let store = Self::default();
            store.rows.lock().unwrap().push(Stored {
                payload: payload.to_string(),
                created_at,
            });
            store
        }

        fn ops(&self) -> Vec<&'static str> {
            self.ops.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ResourceStore for MemoryStore {
        type Key = i64;
        type Payload = String;

        async fn find(&self, _key: &i64) -> Result<Vec<Stored<String>>, StoreError> {
            self.ops.lock().unwrap().push("find");
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn delete(&self, _key: &i64) -> Result<u64, StoreError> {
            self.ops.lock().unwrap().push("delete");
            let mut rows = self.rows.lock().unwrap();
            let removed = rows.len() as u64;
            rows.clear();
            Ok(removed)
        }

        async fn insert(
            &self,
            _key: &i64,
            items: &[String],
            fetched_at: DateTime<Utc>,
        ) -> Result<(), StoreError> {
            self.ops.lock().unwrap().push("insert");
            let mut rows = self.rows.lock().unwrap();
            for item in items {
                rows.push(Stored {
                    payload: item.clone(),
                    created_at: fetched_at,
                });
            }
            Ok(())
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn orchestrator_at(now: DateTime<Utc>) -> CacheOrchestrator<FakeClock> {
        CacheOrchestrator::with_clock(FreshnessPolicy::new(CacheConfig::default()), FakeClock(now))
    }

    #[tokio::test]
    async fn miss_fetches_once_and_inserts() {
        let store = MemoryStore::default();
        let orchestrator = orchestrator_at(t0());
        let calls = AtomicUsize::new(0);

        let out = orchestrator
            .resolve(ResourceKind::Weather, &1, &store, || {
                calls.fetch_add(1, Ordering::SeqCst);
                std::future::ready(Ok(vec!["overcast".to_string()]))
            })
            .await
            .unwrap();

        assert_eq!(out, vec!["overcast".to_string()]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.ops(), vec!["find", "insert"]);
        assert_eq!(store.rows.lock().unwrap().len(), 1);
        assert_eq!(store.rows.lock().unwrap()[0].created_at, t0());
    }

    #[tokio::test]
    async fn fresh_hit_returns_stored_without_fetching() {
        let store = MemoryStore::seeded("stored", t0());
        let orchestrator = orchestrator_at(t0() + Duration::seconds(800));
        let calls = AtomicUsize::new(0);

        let out = orchestrator
            .resolve(ResourceKind::Weather, &1, &store, || {
                calls.fetch_add(1, Ordering::SeqCst);
                std::future::ready(Ok(vec!["fresh".to_string()]))
            })
            .await
            .unwrap();

        assert_eq!(out, vec!["stored".to_string()]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.ops(), vec!["find"]);
    }

    #[tokio::test]
    async fn fresh_hit_is_idempotent() {
        let store = MemoryStore::seeded("stored", t0());
        let orchestrator = orchestrator_at(t0() + Duration::seconds(10));

        let first = orchestrator
            .resolve(ResourceKind::Weather, &1, &store, || {
                std::future::ready(Ok(vec![]))
            })
            .await
            .unwrap();
        let second = orchestrator
            .resolve(ResourceKind::Weather, &1, &store, || {
                std::future::ready(Ok(vec![]))
            })
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(store.ops(), vec!["find", "find"]);
    }

    #[tokio::test]
    async fn stale_rows_are_deleted_before_the_replacement_insert() {
        let store = MemoryStore::seeded("stale", t0());
        // Default weather TTL is 900s; 1000s after insertion is past it.
        let now = t0() + Duration::seconds(1000);
        let orchestrator = orchestrator_at(now);

        let out = orchestrator
            .resolve(ResourceKind::Weather, &1, &store, || {
                std::future::ready(Ok(vec!["replacement".to_string()]))
            })
            .await
            .unwrap();

        assert_eq!(out, vec!["replacement".to_string()]);
        assert_eq!(store.ops(), vec!["find", "delete", "insert"]);

        // The replacement generation starts at age zero.
        let rows = store.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].payload, "replacement");
        assert_eq!(rows[0].created_at, now);
    }

    #[tokio::test]
    async fn weather_scenario_hit_then_stale() {
        let store = MemoryStore::default();

        // t=0: populate.
        orchestrator_at(t0())
            .resolve(ResourceKind::Weather, &1, &store, || {
                std::future::ready(Ok(vec!["day one".to_string()]))
            })
            .await
            .unwrap();

        // t=800: hit, no fetch.
        let calls = AtomicUsize::new(0);
        let out = orchestrator_at(t0() + Duration::seconds(800))
            .resolve(ResourceKind::Weather, &1, &store, || {
                calls.fetch_add(1, Ordering::SeqCst);
                std::future::ready(Ok(vec!["day two".to_string()]))
            })
            .await
            .unwrap();
        assert_eq!(out, vec!["day one".to_string()]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // t=1000: stale, delete then fetch then insert.
        let out = orchestrator_at(t0() + Duration::seconds(1000))
            .resolve(ResourceKind::Weather, &1, &store, || {
                std::future::ready(Ok(vec!["day two".to_string()]))
            })
            .await
            .unwrap();
        assert_eq!(out, vec!["day two".to_string()]);
        assert_eq!(
            store.ops(),
            vec!["find", "insert", "find", "find", "delete", "insert"]
        );
    }

    #[tokio::test]
    async fn fetch_failure_surfaces_and_leaves_no_row() {
        let store = MemoryStore::default();
        let orchestrator = orchestrator_at(t0());

        let err = orchestrator
            .resolve(ResourceKind::Events, &7, &store, || {
                std::future::ready(Err(FetchError::EmptyResponse { service: "Geocode" }))
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CacheError::FetchFailed(_)));
        assert!(store.rows.lock().unwrap().is_empty());
        assert_eq!(store.ops(), vec!["find"]);
    }

    #[tokio::test]
    async fn future_created_at_is_served_as_fresh() {
        let store = MemoryStore::seeded("skewed", t0() + Duration::hours(6));
        let orchestrator = orchestrator_at(t0());
        let calls = AtomicUsize::new(0);

        let out = orchestrator
            .resolve(ResourceKind::Weather, &1, &store, || {
                calls.fetch_add(1, Ordering::SeqCst);
                std::future::ready(Ok(vec![]))
            })
            .await
            .unwrap();

        assert_eq!(out, vec!["skewed".to_string()]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
