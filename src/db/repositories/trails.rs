use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use super::parse_timestamp;
use crate::cache::{ResourceStore, Stored};
use crate::db::StoreError;
use crate::entities::{prelude::*, trails};
use crate::models::Trail;

pub struct TrailRepository {
    conn: DatabaseConnection,
}

impl TrailRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl ResourceStore for TrailRepository {
    type Key = i64;
    type Payload = Trail;

    async fn find(&self, key: &i64) -> Result<Vec<Stored<Trail>>, StoreError> {
        let rows = Trails::find()
            .filter(trails::Column::LocationId.eq(*key))
            .order_by_asc(trails::Column::Id)
            .all(&self.conn)
            .await
            .map_err(StoreError::from)?;

        Ok(rows
            .into_iter()
            .map(|m| Stored {
                created_at: parse_timestamp(&m.created_at),
                payload: Trail {
                    name: m.name,
                    location: m.location,
                    length: m.length,
                    stars: m.stars,
                    star_votes: m.star_votes,
                    summary: m.summary,
                    trail_url: m.trail_url,
                    conditions: m.conditions,
                    condition_date: m.condition_date,
                    condition_time: m.condition_time,
                },
            })
            .collect())
    }

    async fn delete(&self, key: &i64) -> Result<u64, StoreError> {
        let result = Trails::delete_many()
            .filter(trails::Column::LocationId.eq(*key))
            .exec(&self.conn)
            .await
            .map_err(StoreError::from)?;

        Ok(result.rows_affected)
    }

    async fn insert(
        &self,
        key: &i64,
        items: &[Trail],
        fetched_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        if items.is_empty() {
            return Ok(());
        }

        let created_at = fetched_at.to_rfc3339();
        let models: Vec<trails::ActiveModel> = items
            .iter()
            .map(|t| trails::ActiveModel {
                location_id: Set(*key),
                name: Set(t.name.clone()),
                location: Set(t.location.clone()),
                length: Set(t.length),
                stars: Set(t.stars),
                star_votes: Set(t.star_votes),
                summary: Set(t.summary.clone()),
                trail_url: Set(t.trail_url.clone()),
                conditions: Set(t.conditions.clone()),
                condition_date: Set(t.condition_date.clone()),
                condition_time: Set(t.condition_time.clone()),
                created_at: Set(created_at.clone()),
                ..Default::default()
            })
            .collect();

        Trails::insert_many(models)
            .exec(&self.conn)
            .await
            .map_err(StoreError::from)?;

        Ok(())
    }
}
