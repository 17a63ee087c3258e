use std::sync::Arc;

use export_utils::ical_text::{escape_text, fold_line, CRLF};
use service::{
    clock::ClockService,
    event::{CalendarEvent, EVENT_TIMEZONE},
    ical::{IcalService, RenderOptions},
    ServiceError,
};
use time::macros::format_description;

use crate::gen_service_impl;

gen_service_impl! {
    struct IcalServiceImpl: IcalService = IcalServiceDeps {
        ClockService: service::clock::ClockService = clock_service
    }
}

/// Rules of the Central European zone as in effect since 1996.
const BERLIN_TIMEZONE: &[&str] = &[
    "BEGIN:DAYLIGHT",
    "TZOFFSETFROM:+0100",
    "TZOFFSETTO:+0200",
    "DTSTART:19810329T020000",
    "RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=-1SU",
    "TZNAME:MESZ",
    "END:DAYLIGHT",
    "BEGIN:STANDARD",
    "TZOFFSETFROM:+0200",
    "TZOFFSETTO:+0100",
    "DTSTART:19961027T030000",
    "RRULE:FREQ=YEARLY;BYMONTH=10;BYDAY=-1SU",
    "TZNAME:MEZ",
    "END:STANDARD",
];

struct DocumentWriter {
    document: String,
    fold_lines: bool,
}

impl DocumentWriter {
    fn new(fold_lines: bool) -> Self {
        Self {
            document: String::with_capacity(1024),
            fold_lines,
        }
    }

    fn line(&mut self, line: &str) {
        if self.fold_lines {
            self.document.push_str(&fold_line(line));
        } else {
            self.document.push_str(line);
        }
        self.document.push_str(CRLF);
    }

    fn finish(self) -> Arc<str> {
        self.document.into()
    }
}

impl<Deps: IcalServiceDeps> IcalServiceImpl<Deps> {
    fn dtstamp(
        &self,
        event: &CalendarEvent,
        options: &RenderOptions,
    ) -> Result<String, ServiceError> {
        if options.legacy_dtstamp {
            return event.schedule.start_value();
        }
        let utc_format = format_description!("[year][month][day]T[hour][minute][second]Z");
        Ok(self.clock_service.date_time_now().format(&utc_format)?)
    }
}

impl<Deps: IcalServiceDeps> IcalService for IcalServiceImpl<Deps> {
    fn render(
        &self,
        event: &CalendarEvent,
        options: &RenderOptions,
    ) -> Result<Arc<str>, ServiceError> {
        let mut writer = DocumentWriter::new(options.fold_lines);

        writer.line("BEGIN:VCALENDAR");
        writer.line("VERSION:2.0");
        writer.line(&format!("PRODID:{}", options.product_id));
        writer.line("CALSCALE:GREGORIAN");

        writer.line("BEGIN:VTIMEZONE");
        writer.line(&format!("TZID:{EVENT_TIMEZONE}"));
        for line in BERLIN_TIMEZONE {
            writer.line(line);
        }
        writer.line("END:VTIMEZONE");

        writer.line("BEGIN:VEVENT");
        writer.line(&event.date_end_property()?);
        writer.line(&format!("UID:{}", event.id));
        writer.line(&format!("DTSTAMP:{}", self.dtstamp(event, options)?));
        writer.line(&format!("LOCATION:{}", escape_text(&event.address)));
        writer.line(&format!("DESCRIPTION:{}", escape_text(&event.description)));
        writer.line(&format!("URL;VALUE=URI:{}", event.uri));
        writer.line(&format!("SUMMARY:{}", escape_text(&event.summary)));
        writer.line(&event.date_start_property()?);
        writer.line("END:VEVENT");
        writer.line("END:VCALENDAR");

        Ok(writer.finish())
    }
}
