mod settings;

use std::{process, sync::Arc};

use dao_impl_sqlite::event::EventDaoImpl;
use service_impl::{
    event::{EventServiceDeps, EventServiceImpl},
    ical::{IcalServiceDeps, IcalServiceImpl},
};
use settings::Settings;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{error, info};
#[cfg(feature = "json_logging")]
use tracing_subscriber::fmt::format::FmtSpan;

type EventDao = EventDaoImpl;
type ClockService = service_impl::clock::ClockServiceImpl;
type ConfigService = service_impl::config::ConfigServiceImpl;

pub struct EventServiceDependencies;
impl EventServiceDeps for EventServiceDependencies {
    type EventDao = EventDao;
}
type EventService = EventServiceImpl<EventServiceDependencies>;

pub struct IcalServiceDependencies;
impl IcalServiceDeps for IcalServiceDependencies {
    type ClockService = ClockService;
}
type IcalService = IcalServiceImpl<IcalServiceDependencies>;

#[derive(Clone)]
pub struct RestStateImpl {
    event_service: Arc<EventService>,
    ical_service: Arc<IcalService>,
    config_service: Arc<ConfigService>,
}
impl rest::RestStateDef for RestStateImpl {
    type EventService = EventService;
    type IcalService = IcalService;
    type ConfigService = ConfigService;

    fn event_service(&self) -> Arc<Self::EventService> {
        self.event_service.clone()
    }
    fn ical_service(&self) -> Arc<Self::IcalService> {
        self.ical_service.clone()
    }
    fn config_service(&self) -> Arc<Self::ConfigService> {
        self.config_service.clone()
    }
}
impl RestStateImpl {
    pub fn new(pool: Arc<sqlx::Pool<sqlx::Sqlite>>) -> Self {
        let event_dao = Arc::new(EventDao::new(pool));
        let clock_service = Arc::new(service_impl::clock::ClockServiceImpl);
        let event_service = Arc::new(EventServiceImpl { event_dao });
        let ical_service = Arc::new(IcalServiceImpl { clock_service });
        let config_service = Arc::new(service_impl::config::ConfigServiceImpl);
        Self {
            event_service,
            ical_service,
            config_service,
        }
    }
}

#[tokio::main]
async fn main() {
    let version = env!("CARGO_PKG_VERSION");

    #[cfg(feature = "local_logging")]
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::TRACE)
        .pretty()
        .with_file(true)
        .finish();

    #[cfg(feature = "json_logging")]
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_span_list(true)
        .with_file(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("ical-export version: {version}");
    dotenvy::dotenv().ok();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            error!("Invalid settings: {err}");
            process::exit(1);
        }
    };

    let pool = match SqlitePoolOptions::new()
        .acquire_timeout(settings.acquire_timeout)
        .connect(&settings.database_url)
        .await
    {
        Ok(pool) => Arc::new(pool),
        Err(err) => {
            error!("Could not connect to the event database: {err}");
            process::exit(1);
        }
    };

    let rest_state = RestStateImpl::new(pool);
    if let Err(err) = rest::start_server(rest_state, settings.server_address).await {
        error!("Server stopped: {err}");
        process::exit(1);
    }
}
