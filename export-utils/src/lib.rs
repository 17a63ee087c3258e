pub mod charset;
pub mod html;
pub mod ical_text;
pub mod number;

pub use charset::Charset;
pub use number::{parse_flag, parse_int_lenient};
