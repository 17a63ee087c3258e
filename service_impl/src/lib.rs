pub mod clock;
pub mod config;
pub mod event;
pub mod ical;
pub mod macros;

#[cfg(test)]
mod test;
