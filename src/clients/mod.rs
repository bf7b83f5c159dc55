use thiserror::Error;

pub mod darksky;
pub mod eventbrite;
pub mod geocode;
pub mod hiking;
pub mod tmdb;
pub mod yelp;

pub use darksky::DarkSkyClient;
pub use eventbrite::EventbriteClient;
pub use geocode::GeocodeClient;
pub use hiking::HikingProjectClient;
pub use tmdb::TmdbClient;
pub use yelp::YelpClient;

/// Upstream fetch failures. Timeouts surface through `Transport`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(reqwest::Error),

    #[error("{service} returned {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("{service} response missing expected data")]
    EmptyResponse { service: &'static str },

    #[error("{service} API key is not configured")]
    MissingCredentials { service: &'static str },
}

/// Provider keys ride in request URLs; drop the URL before the error can
/// reach a log line.
pub(crate) fn transport(err: reqwest::Error) -> FetchError {
    FetchError::Transport(err.without_url())
}

pub(crate) fn require_key<'a>(
    api_key: &'a str,
    service: &'static str,
) -> Result<&'a str, FetchError> {
    if api_key.is_empty() {
        Err(FetchError::MissingCredentials { service })
    } else {
        Ok(api_key)
    }
}
