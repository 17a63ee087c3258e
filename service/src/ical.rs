//! Service which provides iCalendar data.

use crate::event::CalendarEvent;
use crate::ServiceError;
use mockall::automock;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub product_id: Arc<str>,
    /// Fold content lines longer than 75 octets.
    pub fold_lines: bool,
    /// Fill `DTSTAMP` with the start value instead of the generation time.
    pub legacy_dtstamp: bool,
}

#[automock]
pub trait IcalService {
    fn render(
        &self,
        event: &CalendarEvent,
        options: &RenderOptions,
    ) -> Result<Arc<str>, ServiceError>;
}
