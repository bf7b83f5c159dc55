//! Cache layer tests against a real SQLite store: orchestrator semantics,
//! repository contracts, and the locations table's cascade behavior.

use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use wayfarer::cache::{
    CacheError, CacheOrchestrator, Clock, FreshnessPolicy, ResourceKind, ResourceStore,
};
use wayfarer::config::CacheConfig;
use wayfarer::db::{Store, StoreError};
use wayfarer::models::{GeocodedLocation, Weather};

#[derive(Clone)]
struct FakeClock(DateTime<Utc>);

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

async fn test_store() -> Store {
    // A single connection keeps every query on the same in-memory database.
    Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("failed to open in-memory store")
}

fn orchestrator_at(now: DateTime<Utc>) -> CacheOrchestrator<FakeClock> {
    CacheOrchestrator::with_clock(FreshnessPolicy::new(CacheConfig::default()), FakeClock(now))
}

fn geocoded() -> GeocodedLocation {
    GeocodedLocation {
        formatted_address: "Seattle, WA, USA".to_string(),
        latitude: 47.6062,
        longitude: -122.3321,
    }
}

fn forecasts() -> Vec<Weather> {
    vec![
        Weather {
            forecast: "Light rain".to_string(),
            time: "Sun Mar 01 2026".to_string(),
        },
        Weather {
            forecast: "Overcast".to_string(),
            time: "Mon Mar 02 2026".to_string(),
        },
    ]
}

#[tokio::test]
async fn miss_fetches_inserts_and_persists() {
    let store = test_store().await;
    let location = store
        .locations()
        .insert("seattle", &geocoded(), Utc::now())
        .await
        .unwrap();

    let now = Utc::now();
    let orchestrator = orchestrator_at(now);
    let repo = store.weather();
    let calls = AtomicUsize::new(0);

    let out = orchestrator
        .resolve(ResourceKind::Weather, &location.id, &repo, || {
            calls.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Ok(forecasts()))
        })
        .await
        .unwrap();

    assert_eq!(out, forecasts());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let stored = repo.find(&location.id).await.unwrap();
    assert_eq!(stored.len(), 2);
    for row in &stored {
        assert_eq!(row.created_at.timestamp(), now.timestamp());
    }
}

#[tokio::test]
async fn fresh_rows_are_served_without_a_fetch() {
    let store = test_store().await;
    let location = store
        .locations()
        .insert("seattle", &geocoded(), Utc::now())
        .await
        .unwrap();

    let t0 = Utc::now();
    let repo = store.weather();
    repo.insert(&location.id, &forecasts(), t0).await.unwrap();

    let orchestrator = orchestrator_at(t0 + Duration::seconds(800));
    let calls = AtomicUsize::new(0);

    let out = orchestrator
        .resolve(ResourceKind::Weather, &location.id, &repo, || {
            calls.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Ok(vec![]))
        })
        .await
        .unwrap();

    assert_eq!(out, forecasts());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn stale_rows_are_replaced_by_a_fresh_generation() {
    let store = test_store().await;
    let location = store
        .locations()
        .insert("seattle", &geocoded(), Utc::now())
        .await
        .unwrap();

    let t0 = Utc::now();
    let repo = store.weather();
    repo.insert(&location.id, &forecasts(), t0).await.unwrap();

    let replacement = vec![Weather {
        forecast: "Clear".to_string(),
        time: "Tue Mar 03 2026".to_string(),
    }];

    let now = t0 + Duration::seconds(1000);
    let out = orchestrator_at(now)
        .resolve(ResourceKind::Weather, &location.id, &repo, || {
            std::future::ready(Ok(replacement.clone()))
        })
        .await
        .unwrap();

    assert_eq!(out, replacement);

    // Only the replacement generation remains, aged zero at fetch time.
    let stored = repo.find(&location.id).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].payload, replacement[0]);
    assert_eq!(stored[0].created_at.timestamp(), now.timestamp());
}

#[tokio::test]
async fn failed_fetch_leaves_no_rows_behind() {
    let store = test_store().await;
    let location = store
        .locations()
        .insert("seattle", &geocoded(), Utc::now())
        .await
        .unwrap();

    let repo = store.weather();
    let err = orchestrator_at(Utc::now())
        .resolve(ResourceKind::Weather, &location.id, &repo, || {
            std::future::ready(Err(wayfarer::clients::FetchError::EmptyResponse {
                service: "Dark Sky",
            }))
        })
        .await
        .unwrap_err();

    assert!(matches!(err, CacheError::FetchFailed(_)));
    assert!(repo.find(&location.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_with_no_matching_rows_is_not_an_error() {
    let store = test_store().await;
    let repo = store.weather();

    let removed = repo.delete(&42).await.unwrap();
    assert_eq!(removed, 0);
}

#[tokio::test]
async fn find_with_no_rows_returns_an_empty_sequence() {
    let store = test_store().await;
    let repo = store.events();

    let rows = repo.find(&42).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn location_roundtrip_and_key_uniqueness() {
    let store = test_store().await;
    let repo = store.locations();

    let inserted = repo
        .insert("seattle", &geocoded(), Utc::now())
        .await
        .unwrap();
    assert!(inserted.id > 0);

    let (found, _) = repo.find_by_query("seattle").await.unwrap().unwrap();
    assert_eq!(found, inserted);

    // One canonical row per key: a duplicate insert violates the schema.
    let err = repo
        .insert("seattle", &geocoded(), Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::ConstraintViolation(_)));
}

#[tokio::test]
async fn inserting_under_an_unknown_location_key_is_a_constraint_violation() {
    let store = test_store().await;
    let repo = store.weather();

    let err = repo
        .insert(&9999, &forecasts(), Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::ConstraintViolation(_)));
}

#[tokio::test]
async fn deleting_a_location_cascades_to_its_resources() {
    let store = test_store().await;
    let location = store
        .locations()
        .insert("seattle", &geocoded(), Utc::now())
        .await
        .unwrap();

    let weather = store.weather();
    weather
        .insert(&location.id, &forecasts(), Utc::now())
        .await
        .unwrap();
    assert_eq!(weather.find(&location.id).await.unwrap().len(), 2);

    let removed = store.locations().delete_by_query("seattle").await.unwrap();
    assert_eq!(removed, 1);

    assert!(weather.find(&location.id).await.unwrap().is_empty());
}
