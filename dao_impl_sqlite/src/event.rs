use std::sync::Arc;

use crate::ResultDbErrorExt;
use async_trait::async_trait;
use dao::event::{CalendarEventEntity, EventDao};
use dao::DaoError;
use sqlx::query_as;
use tracing::debug;

#[derive(sqlx::FromRow)]
struct CalendarEventDb {
    id: i64,
    title: Option<String>,
    alias: Option<String>,
    location: Option<String>,
    teaser: Option<String>,
    add_time: Option<String>,
    start_time: Option<i64>,
    end_time: Option<i64>,
    start_date: Option<i64>,
    end_date: Option<i64>,
}

impl From<&CalendarEventDb> for CalendarEventEntity {
    fn from(event: &CalendarEventDb) -> Self {
        Self {
            id: event.id,
            title: event.title.as_deref().unwrap_or_default().into(),
            alias: event.alias.as_deref().unwrap_or_default().into(),
            location: event.location.as_deref().unwrap_or_default().into(),
            teaser: event.teaser.as_deref().unwrap_or_default().into(),
            add_time: event.add_time.as_deref().map(str::trim) == Some("1"),
            start_time: event.start_time.unwrap_or_default(),
            end_time: event.end_time.unwrap_or_default(),
            start_date: event.start_date,
            end_date: event.end_date,
        }
    }
}

pub struct EventDaoImpl {
    pub pool: Arc<sqlx::SqlitePool>,
}
impl EventDaoImpl {
    pub fn new(pool: Arc<sqlx::SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventDao for EventDaoImpl {
    async fn find_published_by_id(
        &self,
        id: i64,
    ) -> Result<Arc<[CalendarEventEntity]>, DaoError> {
        let rows = query_as::<_, CalendarEventDb>(
            r#"
            SELECT id, title, CAST(alias AS TEXT) AS alias, location, teaser,
                   CAST(addTime AS TEXT) AS add_time,
                   startTime AS start_time, endTime AS end_time,
                   startDate AS start_date, endDate AS end_date
            FROM tl_calendar_events
            WHERE id = ? AND published = '1'
            "#,
        )
        .bind(id)
        .fetch_all(self.pool.as_ref())
        .await
        .map_db_error()?;
        debug!("Found {} published rows for event {id}", rows.len());
        Ok(rows.iter().map(CalendarEventEntity::from).collect())
    }
}
