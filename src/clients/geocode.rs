use reqwest::Client;
use serde::Deserialize;

use super::{FetchError, require_key, transport};
use crate::config::ProviderConfig;
use crate::models::GeocodedLocation;

const SERVICE: &str = "Geocode";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeocodeClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Geocode a free-form query to a canonical address and coordinates.
    /// Zero results from upstream is an error, not an empty location.
    pub async fn lookup(&self, query: &str) -> Result<GeocodedLocation, FetchError> {
        let key = require_key(&self.api_key, SERVICE)?;
        let url = format!(
            "{}/json?address={}&key={}",
            self.base_url,
            urlencoding::encode(query),
            key
        );

        let response = self.client.get(&url).send().await.map_err(transport)?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                service: SERVICE,
                status: response.status(),
            });
        }

        let body: GeocodeResponse = response.json().await.map_err(transport)?;

        let first = body
            .results
            .into_iter()
            .next()
            .ok_or(FetchError::EmptyResponse { service: SERVICE })?;

        Ok(GeocodedLocation {
            formatted_address: first.formatted_address,
            latitude: first.geometry.location.lat,
            longitude: first.geometry.location.lng,
        })
    }
}
