#[cfg(test)]
pub mod ical;
