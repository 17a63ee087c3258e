use thiserror::Error;

pub mod clock;
pub mod config;
pub mod event;
pub mod ical;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database query error: {0}")]
    DatabaseQueryError(#[from] dao::DaoError),

    #[error("Entity {0} not found")]
    EntityNotFound(i64),

    #[error("Time component out of range: {0}")]
    TimeComponentRange(#[from] time::error::ComponentRange),

    #[error("Time format error: {0}")]
    TimeFormatError(#[from] time::error::Format),

    #[error("Date out of range")]
    DateOutOfRange,
}
