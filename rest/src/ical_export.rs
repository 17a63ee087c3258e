use axum::{
    body::Body,
    extract::{rejection::QueryRejection, Query, State},
    response::Response,
};
use export_utils::parse_int_lenient;
use http::{header, HeaderMap, StatusCode};
use serde::Deserialize;
use service::{config::ConfigService, event::EventService, ical::IcalService};
use tracing::{debug, instrument};
use utoipa::OpenApi;

use crate::{error_handler, RestStateDef};

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(rename = "eventId")]
    pub event_id: Option<String>,
}

/// Positive event id from the raw query value, if any.
fn requested_event_id(query: &ExportQuery) -> Option<i64> {
    query
        .event_id
        .as_deref()
        .map(parse_int_lenient)
        .filter(|id| *id > 0)
}

/// Replaces everything which cannot appear in an unquoted header parameter.
fn header_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && !matches!(c, '"' | ';' | ',' | '\\') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[instrument(skip(rest_state, headers))]
#[utoipa::path(
    get,
    path = "/ical-export",
    params(
        ("eventId" = Option<String>, Query, description = "Id of the published event to export")
    ),
    responses(
        (status = 200, description = "The event as a calendar file", content_type = "text/calendar", body = String),
        (status = 204, description = "No usable event id given"),
        (status = 404, description = "No published event with this id"),
        (status = 500, description = "Internal server error")
    ),
    tag = "ical-export"
)]
pub async fn download_event<RestState: RestStateDef>(
    rest_state: State<RestState>,
    query: Result<Query<ExportQuery>, QueryRejection>,
    headers: HeaderMap,
) -> Response {
    error_handler(
        async {
            let query = match &query {
                Ok(Query(query)) => Some(query),
                Err(rejection) => {
                    debug!("Ignoring unreadable query: {rejection}");
                    None
                }
            };
            let Some(id) = query.and_then(requested_event_id) else {
                debug!("No usable event id, nothing to export");
                return Ok(Response::builder()
                    .status(StatusCode::NO_CONTENT)
                    .body(Body::empty())?);
            };
            let uri = headers
                .get(header::REFERER)
                .and_then(|referer| referer.to_str().ok())
                .unwrap_or_default();

            let config = rest_state.config_service().get_config().await?;
            let event = rest_state.event_service().load(id, uri.into()).await?;
            let document = rest_state
                .ical_service()
                .render(&event, &config.render_options())?;

            Ok(Response::builder()
                .status(StatusCode::OK)
                .header(
                    header::CONTENT_TYPE,
                    format!("text/calendar; charset={}", config.output_charset),
                )
                .header(
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename={}", header_filename(&event.filename)),
                )
                .body(Body::from(config.output_charset.encode(&document)))?)
        }
        .await,
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        download_event,
    ),
    tags(
        (name = "ical-export", description = "Download single events as iCalendar files")
    )
)]
pub struct IcalExportApiDoc;
