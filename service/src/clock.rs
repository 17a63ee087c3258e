use mockall::automock;

#[automock]
pub trait ClockService {
    /// Current date and time in UTC.
    fn date_time_now(&self) -> time::PrimitiveDateTime;
}
