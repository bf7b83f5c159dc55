use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;

use super::{FetchError, require_key, transport};
use crate::config::ProviderConfig;
use crate::models::Event;

const SERVICE: &str = "Eventbrite";

/// Upper bound on events returned per location. Upstream may return
/// fewer; the mapping never assumes a fixed count.
pub const MAX_EVENTS: usize = 20;

#[derive(Debug, Deserialize)]
struct EventSearchResponse {
    #[serde(default)]
    events: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    url: Option<String>,
    name: Option<TextField>,
    start: Option<StartField>,
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextField {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StartField {
    local: Option<String>,
}

#[derive(Clone)]
pub struct EventbriteClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl EventbriteClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub async fn search(&self, latitude: f64, longitude: f64) -> Result<Vec<Event>, FetchError> {
        let key = require_key(&self.api_key, SERVICE)?;
        let url = format!(
            "{}/events/search/?location.latitude={}&location.longitude={}&token={}",
            self.base_url, latitude, longitude, key
        );

        let response = self.client.get(&url).send().await.map_err(transport)?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                service: SERVICE,
                status: response.status(),
            });
        }

        let body: EventSearchResponse = response.json().await.map_err(transport)?;

        Ok(body
            .events
            .into_iter()
            .take(MAX_EVENTS)
            .map(normalize)
            .collect())
    }
}

fn normalize(raw: RawEvent) -> Event {
    Event {
        link: raw.url.unwrap_or_default(),
        name: raw
            .name
            .and_then(|n| n.text)
            .unwrap_or_else(|| "Untitled event".to_string()),
        event_date: raw
            .start
            .and_then(|s| s.local)
            .map(|local| format_local_date(&local))
            .unwrap_or_default(),
        summary: raw.summary,
    }
}

fn format_local_date(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map_or_else(|_| raw.to_string(), |t| t.format("%a %b %d %Y").to_string())
}
