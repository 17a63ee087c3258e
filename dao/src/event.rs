use crate::DaoError;
use async_trait::async_trait;
use mockall::automock;
use std::sync::Arc;

/// A row of the event table. Instants are seconds since the Unix epoch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarEventEntity {
    pub id: i64,
    pub title: Arc<str>,
    pub alias: Arc<str>,
    pub location: Arc<str>,
    pub teaser: Arc<str>,
    /// Set when `start_time` and `end_time` carry a time of day.
    pub add_time: bool,
    pub start_time: i64,
    pub end_time: i64,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
}

#[automock]
#[async_trait]
pub trait EventDao {
    /// All published rows with the given id. More than one row means the
    /// table is inconsistent, the caller decides how to treat it.
    async fn find_published_by_id(&self, id: i64)
        -> Result<Arc<[CalendarEventEntity]>, DaoError>;
}
