use reqwest::Client;
use serde::Deserialize;

use super::{FetchError, require_key, transport};
use crate::config::ProviderConfig;
use crate::models::Movie;

const SERVICE: &str = "TMDb";

const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";

#[derive(Debug, Deserialize)]
struct MovieSearchResponse {
    #[serde(default)]
    results: Vec<RawMovie>,
}

#[derive(Debug, Deserialize)]
struct RawMovie {
    title: String,
    overview: Option<String>,
    vote_average: Option<f64>,
    vote_count: Option<i64>,
    poster_path: Option<String>,
    popularity: Option<f64>,
    release_date: Option<String>,
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Search movies related to a place name (typically the city from the
    /// geocoded query).
    pub async fn search(&self, query: &str) -> Result<Vec<Movie>, FetchError> {
        let key = require_key(&self.api_key, SERVICE)?;
        let url = format!(
            "{}/search/movie?api_key={}&query={}",
            self.base_url,
            key,
            urlencoding::encode(query)
        );

        let response = self.client.get(&url).send().await.map_err(transport)?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                service: SERVICE,
                status: response.status(),
            });
        }

        let body: MovieSearchResponse = response.json().await.map_err(transport)?;

        Ok(body
            .results
            .into_iter()
            .map(|m| Movie {
                title: m.title,
                overview: m.overview.unwrap_or_default(),
                average_votes: m.vote_average.unwrap_or_default(),
                total_votes: m.vote_count.unwrap_or_default(),
                image_url: m.poster_path.map(|p| format!("{POSTER_BASE}{p}")),
                popularity: m.popularity.unwrap_or_default(),
                released_on: m.release_date,
            })
            .collect())
    }
}
