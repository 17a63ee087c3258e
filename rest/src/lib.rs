use std::{net::SocketAddr, sync::Arc};

mod ical_export;

use axum::{body::Body, response::Response, routing::get, Router};
use http::StatusCode;
use thiserror::Error;
use tracing::{error, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use ical_export::IcalExportApiDoc;

#[derive(Debug, Error)]
pub enum RestError {
    #[error("Service error")]
    ServiceError(#[from] service::ServiceError),

    #[error("Could not build response: {0}")]
    HttpError(#[from] http::Error),
}

fn text_response(status: StatusCode, body: &'static str) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response
}

fn error_handler(result: Result<Response, RestError>) -> Response {
    match result {
        Ok(response) => response,
        Err(RestError::ServiceError(service::ServiceError::EntityNotFound(id))) => {
            warn!("Event {id} not available for export");
            text_response(StatusCode::NOT_FOUND, "Event not found")
        }
        Err(RestError::ServiceError(service::ServiceError::DatabaseQueryError(err))) => {
            error!("Database query failed: {err}");
            text_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
        Err(err) => {
            error!("Export failed: {err:?}");
            text_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

pub trait RestStateDef: Clone + Send + Sync + 'static {
    type EventService: service::event::EventService + Send + Sync + 'static;
    type IcalService: service::ical::IcalService + Send + Sync + 'static;
    type ConfigService: service::config::ConfigService + Send + Sync + 'static;

    fn event_service(&self) -> Arc<Self::EventService>;
    fn ical_service(&self) -> Arc<Self::IcalService>;
    fn config_service(&self) -> Arc<Self::ConfigService>;
}

pub fn router<RestState: RestStateDef>(rest_state: RestState) -> Router {
    Router::new()
        .route(
            "/ical-export",
            get(ical_export::download_event::<RestState>),
        )
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", IcalExportApiDoc::openapi()),
        )
        .with_state(rest_state)
}

pub async fn start_server<RestState: RestStateDef>(
    rest_state: RestState,
    address: SocketAddr,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("Listening on {address}");
    axum::serve(listener, router(rest_state)).await
}
