use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use super::parse_timestamp;
use crate::cache::{ResourceStore, Stored};
use crate::db::StoreError;
use crate::entities::{movies, prelude::*};
use crate::models::Movie;

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl ResourceStore for MovieRepository {
    type Key = i64;
    type Payload = Movie;

    async fn find(&self, key: &i64) -> Result<Vec<Stored<Movie>>, StoreError> {
        let rows = Movies::find()
            .filter(movies::Column::LocationId.eq(*key))
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await
            .map_err(StoreError::from)?;

        Ok(rows
            .into_iter()
            .map(|m| Stored {
                created_at: parse_timestamp(&m.created_at),
                payload: Movie {
                    title: m.title,
                    overview: m.overview,
                    average_votes: m.average_votes,
                    total_votes: m.total_votes,
                    image_url: m.image_url,
                    popularity: m.popularity,
                    released_on: m.released_on,
                },
            })
            .collect())
    }

    async fn delete(&self, key: &i64) -> Result<u64, StoreError> {
        let result = Movies::delete_many()
            .filter(movies::Column::LocationId.eq(*key))
            .exec(&self.conn)
            .await
            .map_err(StoreError::from)?;

        Ok(result.rows_affected)
    }

    async fn insert(
        &self,
        key: &i64,
        items: &[Movie],
        fetched_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        if items.is_empty() {
            return Ok(());
        }

        let created_at = fetched_at.to_rfc3339();
        let models: Vec<movies::ActiveModel> = items
            .iter()
            .map(|m| movies::ActiveModel {
                location_id: Set(*key),
                title: Set(m.title.clone()),
                overview: Set(m.overview.clone()),
                average_votes: Set(m.average_votes),
                total_votes: Set(m.total_votes),
                image_url: Set(m.image_url.clone()),
                popularity: Set(m.popularity),
                released_on: Set(m.released_on.clone()),
                created_at: Set(created_at.clone()),
                ..Default::default()
            })
            .collect();

        Movies::insert_many(models)
            .exec(&self.conn)
            .await
            .map_err(StoreError::from)?;

        Ok(())
    }
}
