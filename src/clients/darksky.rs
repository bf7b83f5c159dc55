use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;

use super::{FetchError, require_key, transport};
use crate::config::ProviderConfig;
use crate::models::Weather;

const SERVICE: &str = "Dark Sky";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    daily: DailyBlock,
}

#[derive(Debug, Default, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    data: Vec<DailyPoint>,
}

#[derive(Debug, Deserialize)]
struct DailyPoint {
    summary: Option<String>,
    time: i64,
}

#[derive(Clone)]
pub struct DarkSkyClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl DarkSkyClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub async fn daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<Weather>, FetchError> {
        let key = require_key(&self.api_key, SERVICE)?;
        let url = format!(
            "{}/forecast/{}/{},{}",
            self.base_url, key, latitude, longitude
        );

        let response = self.client.get(&url).send().await.map_err(transport)?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                service: SERVICE,
                status: response.status(),
            });
        }

        let body: ForecastResponse = response.json().await.map_err(transport)?;

        Ok(body
            .daily
            .data
            .into_iter()
            .map(|day| Weather {
                forecast: day.summary.unwrap_or_else(|| "No forecast".to_string()),
                time: format_day(day.time),
            })
            .collect())
    }
}

fn format_day(epoch: i64) -> String {
    DateTime::from_timestamp(epoch, 0)
        .map_or_else(|| epoch.to_string(), |t| t.format("%a %b %d %Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_epoch_as_calendar_day() {
        // 2026-03-01T00:00:00Z is a Sunday.
        assert_eq!(format_day(1_772_323_200), "Sun Mar 01 2026");
    }

    #[test]
    fn maps_daily_points() {
        let raw = r#"{"daily":{"data":[{"summary":"Light rain","time":1772323200},{"time":1772409600}]}}"#;
        let parsed: ForecastResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.daily.data.len(), 2);
        assert_eq!(parsed.daily.data[0].summary.as_deref(), Some("Light rain"));
        assert!(parsed.daily.data[1].summary.is_none());
    }
}
