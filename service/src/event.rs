//! The event record handed from the loader to the renderer.

use std::sync::Arc;

use crate::ServiceError;
use async_trait::async_trait;
use mockall::automock;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// The only zone events are expressed in.
pub const EVENT_TIMEZONE: &str = "Europe/Berlin";

/// Start and end of an event. Both boundaries always share one form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventSchedule {
    /// Whole days. `end` is exclusive.
    AllDay { start: Date, end: Date },
    /// Instants carrying the offset of [`EVENT_TIMEZONE`] at that time.
    Timed {
        start: OffsetDateTime,
        end: OffsetDateTime,
    },
}

impl EventSchedule {
    pub fn start_value(&self) -> Result<String, ServiceError> {
        match self {
            EventSchedule::AllDay { start, .. } => format_date(*start),
            EventSchedule::Timed { start, .. } => format_local_date_time(*start),
        }
    }

    pub fn end_value(&self) -> Result<String, ServiceError> {
        match self {
            EventSchedule::AllDay { end, .. } => format_date(*end),
            EventSchedule::Timed { end, .. } => format_local_date_time(*end),
        }
    }

    /// The complete `DTSTART` content line.
    pub fn start_property(&self) -> Result<String, ServiceError> {
        Ok(format!("DTSTART{}:{}", self.parameters(), self.start_value()?))
    }

    /// The complete `DTEND` content line.
    pub fn end_property(&self) -> Result<String, ServiceError> {
        Ok(format!("DTEND{}:{}", self.parameters(), self.end_value()?))
    }

    fn parameters(&self) -> String {
        match self {
            EventSchedule::AllDay { .. } => ";VALUE=DATE".to_string(),
            EventSchedule::Timed { .. } => format!(";TZID={EVENT_TIMEZONE}"),
        }
    }
}

fn format_date(date: Date) -> Result<String, ServiceError> {
    let date_format = format_description!("[year][month][day]");
    Ok(date.format(&date_format)?)
}

fn format_local_date_time(date_time: OffsetDateTime) -> Result<String, ServiceError> {
    let datetime_format = format_description!("[year][month][day]T[hour][minute][second]");
    Ok(date_time.format(&datetime_format)?)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarEvent {
    pub id: i64,
    pub summary: Arc<str>,
    pub description: Arc<str>,
    pub address: Arc<str>,
    pub uri: Arc<str>,
    pub filename: Arc<str>,
    pub schedule: EventSchedule,
}

impl CalendarEvent {
    pub fn date_start_property(&self) -> Result<String, ServiceError> {
        self.schedule.start_property()
    }

    pub fn date_end_property(&self) -> Result<String, ServiceError> {
        self.schedule.end_property()
    }
}

#[automock]
#[async_trait]
pub trait EventService {
    /// Loads the published event `id`. `uri` is the page the download was
    /// requested from.
    async fn load(&self, id: i64, uri: Arc<str>) -> Result<CalendarEvent, ServiceError>;
}
