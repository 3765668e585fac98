//! Utility functions shared by the parsers and formatters.
//!
//! - **Date/time codec**: RFC 3339 and lenient RFC 822 parsing and formatting
//! - **Text processing**: whitespace collapsing used by the date parser
//!
//! # Examples
//!
//! ```
//! use syndfeed::util::{to_rfc1123, try_parse_date};
//!
//! let date = try_parse_date("Sun, 13 Aug 1998 04:27:00 A").unwrap();
//! assert_eq!(to_rfc1123(&date), "Thu, 13 Aug 1998 05:27:00 GMT");
//! ```

mod datetime;
mod text;

pub use datetime::{normalize_time_zone, to_rfc1123, to_rfc3339, try_parse_date};
pub use text::collapse_whitespace;
pub(crate) use text::non_blank;
