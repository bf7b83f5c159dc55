use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use super::parse_timestamp;
use crate::cache::{ResourceStore, Stored};
use crate::db::StoreError;
use crate::entities::{prelude::*, weather_reports};
use crate::models::Weather;

pub struct WeatherRepository {
    conn: DatabaseConnection,
}

impl WeatherRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl ResourceStore for WeatherRepository {
    type Key = i64;
    type Payload = Weather;

    async fn find(&self, key: &i64) -> Result<Vec<Stored<Weather>>, StoreError> {
        let rows = WeatherReports::find()
            .filter(weather_reports::Column::LocationId.eq(*key))
            .order_by_asc(weather_reports::Column::Id)
            .all(&self.conn)
            .await
            .map_err(StoreError::from)?;

        Ok(rows
            .into_iter()
            .map(|m| Stored {
                created_at: parse_timestamp(&m.created_at),
                payload: Weather {
                    forecast: m.forecast,
                    time: m.time,
                },
            })
            .collect())
    }

    async fn delete(&self, key: &i64) -> Result<u64, StoreError> {
        let result = WeatherReports::delete_many()
            .filter(weather_reports::Column::LocationId.eq(*key))
            .exec(&self.conn)
            .await
            .map_err(StoreError::from)?;

        Ok(result.rows_affected)
    }

    async fn insert(
        &self,
        key: &i64,
        items: &[Weather],
        fetched_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        if items.is_empty() {
            return Ok(());
        }

        let created_at = fetched_at.to_rfc3339();
        let models: Vec<weather_reports::ActiveModel> = items
            .iter()
            .map(|w| weather_reports::ActiveModel {
                location_id: Set(*key),
                forecast: Set(w.forecast.clone()),
                time: Set(w.time.clone()),
                created_at: Set(created_at.clone()),
                ..Default::default()
            })
            .collect();

        WeatherReports::insert_many(models)
            .exec(&self.conn)
            .await
            .map_err(StoreError::from)?;

        Ok(())
    }
}
