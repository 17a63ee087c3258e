use std::sync::Arc;

use async_trait::async_trait;
use dao::event::{CalendarEventEntity, EventDao};
use export_utils::html::{plain_title, strip_tags};
use service::{
    event::{CalendarEvent, EventSchedule, EventService},
    ServiceError,
};
use time::{Duration, OffsetDateTime};
use time_tz::{timezones, Offset, TimeZone};
use tracing::{instrument, warn};

use crate::gen_service_impl;

/// End time of day which editors enter for events without a defined end.
const OPEN_END_MARKER: (u8, u8) = (23, 23);

/// Duration assumed for timed events without a usable end.
const DEFAULT_DURATION: Duration = Duration::hours(2);

gen_service_impl! {
    struct EventServiceImpl: EventService = EventServiceDeps {
        EventDao: dao::event::EventDao = event_dao
    }
}

#[async_trait]
impl<Deps: EventServiceDeps> EventService for EventServiceImpl<Deps> {
    #[instrument(skip(self))]
    async fn load(&self, id: i64, uri: Arc<str>) -> Result<CalendarEvent, ServiceError> {
        let entities = self.event_dao.find_published_by_id(id).await?;
        let entity = match entities.as_ref() {
            [entity] => entity,
            entities => {
                warn!(
                    "Expected exactly one published event {id}, found {}",
                    entities.len()
                );
                return Err(ServiceError::EntityNotFound(id));
            }
        };

        Ok(CalendarEvent {
            id: entity.id,
            summary: plain_title(&entity.title).into(),
            description: strip_tags(&entity.teaser).into(),
            address: entity.location.clone(),
            uri,
            filename: strip_tags(&format!("{}.ics", entity.alias)).into(),
            schedule: resolve_schedule(entity)?,
        })
    }
}

fn to_local(timestamp: i64) -> Result<OffsetDateTime, ServiceError> {
    let utc = OffsetDateTime::from_unix_timestamp(timestamp)?;
    let offset = timezones::db::europe::BERLIN.get_offset_utc(&utc).to_utc();
    utc.checked_to_offset(offset).ok_or(ServiceError::DateOutOfRange)
}

/// Picks the all-day or the timed form depending on the time flag and
/// repairs missing or implausible ends.
pub fn resolve_schedule(entity: &CalendarEventEntity) -> Result<EventSchedule, ServiceError> {
    if entity.add_time {
        let start = to_local(entity.start_time)?;
        let stored_end = (entity.end_time != 0 && entity.end_time > entity.start_time)
            .then(|| to_local(entity.end_time))
            .transpose()?
            .filter(|end| (end.hour(), end.minute()) != OPEN_END_MARKER);
        let end = match stored_end {
            Some(end) => end,
            None => to_local(
                entity
                    .start_time
                    .checked_add(DEFAULT_DURATION.whole_seconds())
                    .ok_or(ServiceError::DateOutOfRange)?,
            )?,
        };
        Ok(EventSchedule::Timed { start, end })
    } else {
        let start_timestamp = entity.start_date.unwrap_or(entity.start_time);
        let start = to_local(start_timestamp)?.date();
        let last_day = match entity.end_date {
            Some(end_date) if end_date != 0 && end_date > start_timestamp => {
                to_local(end_date)?.date()
            }
            _ => start,
        };
        let end = last_day.next_day().ok_or(ServiceError::DateOutOfRange)?;
        Ok(EventSchedule::AllDay { start, end })
    }
}
