use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use super::parse_timestamp;
use crate::cache::{ResourceStore, Stored};
use crate::db::StoreError;
use crate::entities::{events, prelude::*};
use crate::models::Event;

pub struct EventRepository {
    conn: DatabaseConnection,
}

impl EventRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl ResourceStore for EventRepository {
    type Key = i64;
    type Payload = Event;

    async fn find(&self, key: &i64) -> Result<Vec<Stored<Event>>, StoreError> {
        let rows = Events::find()
            .filter(events::Column::LocationId.eq(*key))
            .order_by_asc(events::Column::Id)
            .all(&self.conn)
            .await
            .map_err(StoreError::from)?;

        Ok(rows
            .into_iter()
            .map(|m| Stored {
                created_at: parse_timestamp(&m.created_at),
                payload: Event {
                    link: m.link,
                    name: m.name,
                    event_date: m.event_date,
                    summary: m.summary,
                },
            })
            .collect())
    }

    async fn delete(&self, key: &i64) -> Result<u64, StoreError> {
        let result = Events::delete_many()
            .filter(events::Column::LocationId.eq(*key))
            .exec(&self.conn)
            .await
            .map_err(StoreError::from)?;

        Ok(result.rows_affected)
    }

    async fn insert(
        &self,
        key: &i64,
        items: &[Event],
        fetched_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        if items.is_empty() {
            return Ok(());
        }

        let created_at = fetched_at.to_rfc3339();
        let models: Vec<events::ActiveModel> = items
            .iter()
            .map(|e| events::ActiveModel {
                location_id: Set(*key),
                link: Set(e.link.clone()),
                name: Set(e.name.clone()),
                event_date: Set(e.event_date.clone()),
                summary: Set(e.summary.clone()),
                created_at: Set(created_at.clone()),
                ..Default::default()
            })
            .collect();

        Events::insert_many(models)
            .exec(&self.conn)
            .await
            .map_err(StoreError::from)?;

        Ok(())
    }
}
