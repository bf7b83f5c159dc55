use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::parse_timestamp;
use crate::db::StoreError;
use crate::entities::{locations, prelude::*};
use crate::models::{GeocodedLocation, Location};

/// Canonical Location Key table. Keyed by the normalized search query;
/// the generated row id scopes every dependent resource table.
pub struct LocationRepository {
    conn: DatabaseConnection,
}

impl LocationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: locations::Model) -> (Location, DateTime<Utc>) {
        let created_at = parse_timestamp(&model.created_at);
        (
            Location {
                id: model.id,
                search_query: model.search_query,
                formatted_address: model.formatted_address,
                latitude: model.latitude,
                longitude: model.longitude,
            },
            created_at,
        )
    }

    pub async fn find_by_query(
        &self,
        query: &str,
    ) -> Result<Option<(Location, DateTime<Utc>)>, StoreError> {
        let model = Locations::find()
            .filter(locations::Column::SearchQuery.eq(query))
            .one(&self.conn)
            .await
            .map_err(StoreError::from)?;

        Ok(model.map(Self::map_model))
    }

    pub async fn insert(
        &self,
        query: &str,
        geocoded: &GeocodedLocation,
        fetched_at: DateTime<Utc>,
    ) -> Result<Location, StoreError> {
        let active_model = locations::ActiveModel {
            search_query: Set(query.to_string()),
            formatted_address: Set(geocoded.formatted_address.clone()),
            latitude: Set(geocoded.latitude),
            longitude: Set(geocoded.longitude),
            created_at: Set(fetched_at.to_rfc3339()),
            ..Default::default()
        };

        let result = Locations::insert(active_model)
            .exec(&self.conn)
            .await
            .map_err(StoreError::from)?;

        Ok(Location {
            id: result.last_insert_id,
            search_query: query.to_string(),
            formatted_address: geocoded.formatted_address.clone(),
            latitude: geocoded.latitude,
            longitude: geocoded.longitude,
        })
    }

    /// Removes the canonical row for `query`. Dependent resource rows go
    /// with it via the FK cascade. Zero matches is not an error.
    pub async fn delete_by_query(&self, query: &str) -> Result<u64, StoreError> {
        let result = Locations::delete_many()
            .filter(locations::Column::SearchQuery.eq(query))
            .exec(&self.conn)
            .await
            .map_err(StoreError::from)?;

        Ok(result.rows_affected)
    }
}
