use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use super::parse_timestamp;
use crate::cache::{ResourceStore, Stored};
use crate::db::StoreError;
use crate::entities::{prelude::*, reviews};
use crate::models::Review;

pub struct ReviewRepository {
    conn: DatabaseConnection,
}

impl ReviewRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl ResourceStore for ReviewRepository {
    type Key = i64;
    type Payload = Review;

    async fn find(&self, key: &i64) -> Result<Vec<Stored<Review>>, StoreError> {
        let rows = Reviews::find()
            .filter(reviews::Column::LocationId.eq(*key))
            .order_by_asc(reviews::Column::Id)
            .all(&self.conn)
            .await
            .map_err(StoreError::from)?;

        Ok(rows
            .into_iter()
            .map(|m| Stored {
                created_at: parse_timestamp(&m.created_at),
                payload: Review {
                    name: m.name,
                    image_url: m.image_url,
                    price: m.price,
                    rating: m.rating,
                    url: m.url,
                },
            })
            .collect())
    }

    async fn delete(&self, key: &i64) -> Result<u64, StoreError> {
        let result = Reviews::delete_many()
            .filter(reviews::Column::LocationId.eq(*key))
            .exec(&self.conn)
            .await
            .map_err(StoreError::from)?;

        Ok(result.rows_affected)
    }

    async fn insert(
        &self,
        key: &i64,
        items: &[Review],
        fetched_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        if items.is_empty() {
            return Ok(());
        }

        let created_at = fetched_at.to_rfc3339();
        let models: Vec<reviews::ActiveModel> = items
            .iter()
            .map(|r| reviews::ActiveModel {
                location_id: Set(*key),
                name: Set(r.name.clone()),
                image_url: Set(r.image_url.clone()),
                price: Set(r.price.clone()),
                rating: Set(r.rating),
                url: Set(r.url.clone()),
                created_at: Set(created_at.clone()),
                ..Default::default()
            })
            .collect();

        Reviews::insert_many(models)
            .exec(&self.conn)
            .await
            .map_err(StoreError::from)?;

        Ok(())
    }
}
