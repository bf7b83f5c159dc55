use reqwest::Client;
use serde::Deserialize;

use super::{FetchError, require_key, transport};
use crate::config::ProviderConfig;
use crate::models::Trail;

const SERVICE: &str = "Hiking Project";

/// Search radius in miles, matching the upstream API's unit.
const MAX_DISTANCE_MILES: u32 = 200;

#[derive(Debug, Deserialize)]
struct TrailsResponse {
    #[serde(default)]
    trails: Vec<RawTrail>,
}

#[derive(Debug, Deserialize)]
struct RawTrail {
    name: String,
    location: Option<String>,
    length: Option<f64>,
    stars: Option<f64>,
    #[serde(rename = "starVotes")]
    star_votes: Option<i64>,
    summary: Option<String>,
    url: String,
    #[serde(rename = "conditionStatus")]
    condition_status: Option<String>,
    #[serde(rename = "conditionDate")]
    condition_date: Option<String>,
}

#[derive(Clone)]
pub struct HikingProjectClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HikingProjectClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub async fn trails(&self, latitude: f64, longitude: f64) -> Result<Vec<Trail>, FetchError> {
        let key = require_key(&self.api_key, SERVICE)?;
        let url = format!(
            "{}/get-trails?lat={}&lon={}&maxDistance={}&key={}",
            self.base_url, latitude, longitude, MAX_DISTANCE_MILES, key
        );

        let response = self.client.get(&url).send().await.map_err(transport)?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                service: SERVICE,
                status: response.status(),
            });
        }

        let body: TrailsResponse = response.json().await.map_err(transport)?;

        Ok(body.trails.into_iter().map(normalize).collect())
    }
}

fn normalize(raw: RawTrail) -> Trail {
    // Upstream reports "2026-03-01 14:12:33"; keep the halves separate.
    let (condition_date, condition_time) = raw.condition_date.map_or((None, None), |stamp| {
        let mut parts = stamp.splitn(2, ' ');
        let date = parts.next().map(ToString::to_string);
        let time = parts.next().map(ToString::to_string);
        (date, time)
    });

    Trail {
        name: raw.name,
        location: raw.location.unwrap_or_default(),
        length: raw.length.unwrap_or_default(),
        stars: raw.stars.unwrap_or_default(),
        star_votes: raw.star_votes.unwrap_or_default(),
        summary: raw.summary.unwrap_or_default(),
        trail_url: raw.url,
        conditions: raw.condition_status,
        condition_date,
        condition_time,
    }
}
