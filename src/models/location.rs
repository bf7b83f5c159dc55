use serde::{Deserialize, Serialize};

/// Canonical location record, as persisted. `id` is the Location Key that
/// scopes every other cached resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub search_query: String,
    pub formatted_address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Provider-normalized geocoding result, not yet persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedLocation {
    pub formatted_address: String,
    pub latitude: f64,
    pub longitude: f64,
}
