use crate::ical::{IcalServiceDeps, IcalServiceImpl};
use export_utils::ical_text::{unescape_text, unfold, CRLF, MAX_LINE_OCTETS};
use icalendar::parser::read_calendar;
use service::clock::MockClockService;
use service::event::{CalendarEvent, EventSchedule};
use service::ical::{IcalService, RenderOptions};
use time::macros::{date, datetime};

pub struct IcalServiceDependencies {
    pub clock_service: MockClockService,
}

impl IcalServiceDeps for IcalServiceDependencies {
    type ClockService = MockClockService;
}

impl IcalServiceDependencies {
    pub fn build_service(self) -> IcalServiceImpl<IcalServiceDependencies> {
        IcalServiceImpl {
            clock_service: self.clock_service.into(),
        }
    }
}

fn build_service() -> IcalServiceImpl<IcalServiceDependencies> {
    let mut clock_service = MockClockService::new();
    clock_service
        .expect_date_time_now()
        .returning(|| datetime!(2024-05-20 08:15:30));
    IcalServiceDependencies { clock_service }.build_service()
}

fn default_options() -> RenderOptions {
    RenderOptions {
        product_id: "-//Town Hall//Events//DE".into(),
        fold_lines: true,
        legacy_dtstamp: false,
    }
}

fn default_event() -> CalendarEvent {
    CalendarEvent {
        id: 42,
        summary: "Summer Fest".into(),
        description: "Bring a hat".into(),
        address: "Market Square".into(),
        uri: "https://example.org/events/summer-fest.html".into(),
        filename: "summer-fest.ics".into(),
        schedule: EventSchedule::Timed {
            start: datetime!(2024-06-01 10:00 +2),
            end: datetime!(2024-06-01 12:00 +2),
        },
    }
}

#[test]
fn test_render_timed_event() {
    let document = build_service()
        .render(&default_event(), &default_options())
        .unwrap();

    let expected = [
        "BEGIN:VCALENDAR",
        "VERSION:2.0",
        "PRODID:-//Town Hall//Events//DE",
        "CALSCALE:GREGORIAN",
        "BEGIN:VTIMEZONE",
        "TZID:Europe/Berlin",
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
        "END:VTIMEZONE",
        "BEGIN:VEVENT",
        "DTEND;TZID=Europe/Berlin:20240601T120000",
        "UID:42",
        "DTSTAMP:20240520T081530Z",
        "LOCATION:Market Square",
        "DESCRIPTION:Bring a hat",
        "URL;VALUE=URI:https://example.org/events/summer-fest.html",
        "SUMMARY:Summer Fest",
        "DTSTART;TZID=Europe/Berlin:20240601T100000",
        "END:VEVENT",
        "END:VCALENDAR",
        "",
    ]
    .join(CRLF);
    assert_eq!(expected, document.as_ref());
}

#[test]
fn test_render_all_day_event() {
    let event = CalendarEvent {
        schedule: EventSchedule::AllDay {
            start: date!(2024 - 06 - 01),
            end: date!(2024 - 06 - 02),
        },
        ..default_event()
    };
    let document = build_service().render(&event, &default_options()).unwrap();

    assert!(document.contains("\r\nDTSTART;VALUE=DATE:20240601\r\n"));
    assert!(document.contains("\r\nDTEND;VALUE=DATE:20240602\r\n"));
    assert!(!document.contains("DTSTART;TZID"));
}

#[test]
fn test_render_escapes_text_values() {
    let event = CalendarEvent {
        summary: "Bach, Händel; more".into(),
        description: "First line\nsecond line".into(),
        address: "Hall A, 1st floor".into(),
        ..default_event()
    };
    let document = build_service().render(&event, &default_options()).unwrap();

    assert!(document.contains("\r\nSUMMARY:Bach\\, Händel\\; more\r\n"));
    assert!(document.contains("\r\nDESCRIPTION:First line\\nsecond line\r\n"));
    assert!(document.contains("\r\nLOCATION:Hall A\\, 1st floor\r\n"));
}

#[test]
fn test_render_legacy_dtstamp_reuses_start_value() {
    let mut clock_service = MockClockService::new();
    clock_service.expect_date_time_now().never();
    let service = IcalServiceDependencies { clock_service }.build_service();
    let options = RenderOptions {
        legacy_dtstamp: true,
        ..default_options()
    };

    let document = service.render(&default_event(), &options).unwrap();
    assert!(document.contains("\r\nDTSTAMP:20240601T100000\r\n"));
}

#[test]
fn test_render_folds_long_lines() {
    let event = CalendarEvent {
        description: "A rather long teaser which keeps going. ".repeat(5).into(),
        ..default_event()
    };
    let document = build_service().render(&event, &default_options()).unwrap();

    for line in document.split(CRLF) {
        assert!(line.len() <= MAX_LINE_OCTETS, "line too long: {line:?}");
    }
    let unfolded = unfold(&document);
    assert!(unfolded.contains(&format!("\r\nDESCRIPTION:{}\r\n", event.description)));
}

#[test]
fn test_render_without_folding() {
    let event = CalendarEvent {
        description: "x".repeat(200).into(),
        ..default_event()
    };
    let options = RenderOptions {
        fold_lines: false,
        ..default_options()
    };
    let document = build_service().render(&event, &options).unwrap();

    assert!(document.contains(&format!("\r\nDESCRIPTION:{}\r\n", "x".repeat(200))));
}

#[test]
fn test_render_every_line_ends_with_crlf() {
    let document = build_service()
        .render(&default_event(), &default_options())
        .unwrap();

    assert!(document.ends_with("END:VCALENDAR\r\n"));
    assert_eq!(
        document.matches('\n').count(),
        document.matches(CRLF).count()
    );
}

#[test]
fn test_render_is_readable_by_a_calendar_parser() {
    let event = CalendarEvent {
        description: "Music and food all day long on the market square "
            .repeat(3)
            .trim_end()
            .into(),
        summary: "Bach, Händel; more".into(),
        address: "Hall A, 1st floor; entrance B".into(),
        ..default_event()
    };
    let document = build_service().render(&event, &default_options()).unwrap();
    let unfolded = unfold(&document);
    let calendar = read_calendar(&unfolded).unwrap();

    let vevent = calendar
        .components
        .iter()
        .find(|component| component.name == "VEVENT")
        .unwrap();
    assert_eq!("42", vevent.find_prop("UID").unwrap().val.to_string());
    assert_eq!(
        "Bach, Händel; more",
        unescape_text(&vevent.find_prop("SUMMARY").unwrap().val.to_string())
    );
    assert_eq!(
        "Hall A, 1st floor; entrance B",
        unescape_text(&vevent.find_prop("LOCATION").unwrap().val.to_string())
    );
    assert_eq!(
        event.description.as_ref(),
        vevent.find_prop("DESCRIPTION").unwrap().val.to_string()
    );
    assert!(calendar
        .components
        .iter()
        .any(|component| component.name == "VTIMEZONE"));
}
