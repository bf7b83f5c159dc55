use reqwest::Client;
use serde::Deserialize;

use super::{FetchError, require_key, transport};
use crate::config::ProviderConfig;
use crate::models::Review;

const SERVICE: &str = "Yelp";

#[derive(Debug, Deserialize)]
struct BusinessSearchResponse {
    #[serde(default)]
    businesses: Vec<RawBusiness>,
}

#[derive(Debug, Deserialize)]
struct RawBusiness {
    name: String,
    image_url: Option<String>,
    price: Option<String>,
    rating: Option<f64>,
    url: String,
}

#[derive(Clone)]
pub struct YelpClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YelpClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub async fn search(&self, latitude: f64, longitude: f64) -> Result<Vec<Review>, FetchError> {
        let key = require_key(&self.api_key, SERVICE)?;
        let url = format!(
            "{}/businesses/search?latitude={}&longitude={}",
            self.base_url, latitude, longitude
        );

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {key}"))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                service: SERVICE,
                status: response.status(),
            });
        }

        let body: BusinessSearchResponse = response.json().await.map_err(transport)?;

        Ok(body
            .businesses
            .into_iter()
            .map(|b| Review {
                name: b.name,
                image_url: b.image_url,
                price: b.price,
                rating: b.rating.unwrap_or_default(),
                url: b.url,
            })
            .collect())
    }
}
