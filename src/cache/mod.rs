//! Cache-backed lookup layer: decides per request whether stored rows can
//! be served or a provider must be asked again, and keeps the store in a
//! single-generation state per kind and location.

use thiserror::Error;

pub mod clock;
pub mod freshness;
pub mod orchestrator;

pub use clock::{Clock, SystemClock};
pub use freshness::FreshnessPolicy;
pub use orchestrator::{CacheOrchestrator, ResourceStore, Stored};

use crate::clients::FetchError;
use crate::db::StoreError;

/// Category of cached data. Every kind carries its own time-to-live,
/// sourced from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Location,
    Weather,
    Events,
    Movies,
    Reviews,
    Trails,
}

impl ResourceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Weather => "weather",
            Self::Events => "events",
            Self::Movies => "movies",
            Self::Reviews => "reviews",
            Self::Trails => "trails",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors a cache lookup can surface to its caller.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("upstream fetch failed: {0}")]
    FetchFailed(#[from] FetchError),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}

impl From<StoreError> for CacheError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => Self::StoreUnavailable(msg),
            StoreError::ConstraintViolation(msg) => Self::ConstraintViolation(msg),
        }
    }
}
