//! Domain service turning an inbound search query into cached resources.
//!
//! Every lookup first resolves the query to a canonical location (itself
//! cache-backed), then drives the orchestrator for the requested kind
//! keyed by the location's row id.

use metrics::counter;
use std::sync::Arc;
use tracing::{debug, info};

use crate::cache::{CacheError, CacheOrchestrator, ResourceKind};
use crate::clients::{
    DarkSkyClient, EventbriteClient, GeocodeClient, HikingProjectClient, TmdbClient, YelpClient,
};
use crate::db::Store;
use crate::models::{Event, Location, Movie, Review, Trail, Weather};

pub struct ExploreService {
    store: Store,
    orchestrator: CacheOrchestrator,
    geocode: Arc<GeocodeClient>,
    darksky: Arc<DarkSkyClient>,
    eventbrite: Arc<EventbriteClient>,
    tmdb: Arc<TmdbClient>,
    yelp: Arc<YelpClient>,
    hiking: Arc<HikingProjectClient>,
}

impl ExploreService {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub const fn new(
        store: Store,
        orchestrator: CacheOrchestrator,
        geocode: Arc<GeocodeClient>,
        darksky: Arc<DarkSkyClient>,
        eventbrite: Arc<EventbriteClient>,
        tmdb: Arc<TmdbClient>,
        yelp: Arc<YelpClient>,
        hiking: Arc<HikingProjectClient>,
    ) -> Self {
        Self {
            store,
            orchestrator,
            geocode,
            darksky,
            eventbrite,
            tmdb,
            yelp,
            hiking,
        }
    }

    /// Resolve a search query to its canonical location.
    ///
    /// This is the one cache path not routed through the generic
    /// orchestrator: the insert must return the generated row id that
    /// keys every other kind, so the find → policy → delete → fetch →
    /// insert sequence is driven here against the locations table.
    /// Deleting a stale location cascades to its dependent resource rows.
    pub async fn location(&self, raw_query: &str) -> Result<Location, CacheError> {
        let query = normalize_query(raw_query);
        let repo = self.store.locations();

        if let Some((location, created_at)) = repo.find_by_query(&query).await? {
            if self
                .orchestrator
                .is_fresh(ResourceKind::Location, created_at)
            {
                debug!(query = %query, "location cache hit");
                counter!("cache_lookups_total", "kind" => "location", "outcome" => "hit")
                    .increment(1);
                return Ok(location);
            }

            let removed = repo.delete_by_query(&query).await?;
            debug!(query = %query, removed, "evicted stale location");
            counter!("cache_lookups_total", "kind" => "location", "outcome" => "stale")
                .increment(1);
        } else {
            counter!("cache_lookups_total", "kind" => "location", "outcome" => "miss")
                .increment(1);
        }

        let geocoded = self
            .geocode
            .lookup(&query)
            .await
            .map_err(CacheError::FetchFailed)?;
        let location = repo.insert(&query, &geocoded, self.orchestrator.now()).await?;

        info!(query = %query, address = %location.formatted_address, "geocoded new location");
        Ok(location)
    }

    pub async fn weather(&self, raw_query: &str) -> Result<Vec<Weather>, CacheError> {
        let location = self.location(raw_query).await?;
        let repo = self.store.weather();
        let client = Arc::clone(&self.darksky);
        let (lat, lng) = (location.latitude, location.longitude);

        self.orchestrator
            .resolve(ResourceKind::Weather, &location.id, &repo, move || async move {
                client.daily_forecast(lat, lng).await
            })
            .await
    }

    pub async fn events(&self, raw_query: &str) -> Result<Vec<Event>, CacheError> {
        let location = self.location(raw_query).await?;
        let repo = self.store.events();
        let client = Arc::clone(&self.eventbrite);
        let (lat, lng) = (location.latitude, location.longitude);

        self.orchestrator
            .resolve(ResourceKind::Events, &location.id, &repo, move || async move {
                client.search(lat, lng).await
            })
            .await
    }

    pub async fn movies(&self, raw_query: &str) -> Result<Vec<Movie>, CacheError> {
        let location = self.location(raw_query).await?;
        let repo = self.store.movies();
        let client = Arc::clone(&self.tmdb);
        let query = location.search_query.clone();

        self.orchestrator
            .resolve(ResourceKind::Movies, &location.id, &repo, move || async move {
                client.search(&query).await
            })
            .await
    }

    pub async fn reviews(&self, raw_query: &str) -> Result<Vec<Review>, CacheError> {
        let location = self.location(raw_query).await?;
        let repo = self.store.reviews();
        let client = Arc::clone(&self.yelp);
        let (lat, lng) = (location.latitude, location.longitude);

        self.orchestrator
            .resolve(ResourceKind::Reviews, &location.id, &repo, move || async move {
                client.search(lat, lng).await
            })
            .await
    }

    pub async fn trails(&self, raw_query: &str) -> Result<Vec<Trail>, CacheError> {
        let location = self.location(raw_query).await?;
        let repo = self.store.trails();
        let client = Arc::clone(&self.hiking);
        let (lat, lng) = (location.latitude, location.longitude);

        self.orchestrator
            .resolve(ResourceKind::Trails, &location.id, &repo, move || async move {
                client.trails(lat, lng).await
            })
            .await
    }
}

/// Collapse whitespace and case so "  Seattle  WA" and "seattle wa" share
/// one cache key.
fn normalize_query(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::normalize_query;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_query("  Seattle,  WA "), "seattle, wa");
        assert_eq!(normalize_query("PORTLAND"), "portland");
        assert_eq!(normalize_query("portland"), "portland");
    }
}
