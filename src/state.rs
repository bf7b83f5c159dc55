use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

use crate::cache::{CacheOrchestrator, FreshnessPolicy};
use crate::clients::{
    DarkSkyClient, EventbriteClient, GeocodeClient, HikingProjectClient, TmdbClient, YelpClient,
};
use crate::config::Config;
use crate::db::Store;
use crate::services::ExploreService;

/// Build a shared HTTP client with reasonable defaults for API calls.
/// This client is reused across all provider clients to enable
/// connection pooling and avoid socket exhaustion.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("Wayfarer/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub store: Store,

    pub explore: Arc<ExploreService>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub async fn new(
        config: Config,
        prometheus_handle: Option<PrometheusHandle>,
    ) -> anyhow::Result<Arc<Self>> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let http_client = build_shared_http_client(config.providers.request_timeout_seconds)?;

        let geocode = Arc::new(GeocodeClient::with_shared_client(
            http_client.clone(),
            &config.providers.geocode,
        ));
        let darksky = Arc::new(DarkSkyClient::with_shared_client(
            http_client.clone(),
            &config.providers.weather,
        ));
        let eventbrite = Arc::new(EventbriteClient::with_shared_client(
            http_client.clone(),
            &config.providers.events,
        ));
        let tmdb = Arc::new(TmdbClient::with_shared_client(
            http_client.clone(),
            &config.providers.movies,
        ));
        let yelp = Arc::new(YelpClient::with_shared_client(
            http_client.clone(),
            &config.providers.yelp,
        ));
        let hiking = Arc::new(HikingProjectClient::with_shared_client(
            http_client,
            &config.providers.trails,
        ));

        let orchestrator = CacheOrchestrator::new(FreshnessPolicy::new(config.cache.clone()));

        let explore = Arc::new(ExploreService::new(
            store.clone(),
            orchestrator,
            geocode,
            darksky,
            eventbrite,
            tmdb,
            yelp,
            hiking,
        ));

        Ok(Arc::new(Self {
            config: Arc::new(config),
            store,
            explore,
            start_time: std::time::Instant::now(),
            prometheus_handle,
        }))
    }
}
