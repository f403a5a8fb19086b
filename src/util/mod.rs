//! Small helpers shared by the presenter and the terminal UI.
//!
//! - **Link validation**: decide whether a record's link may be opened
//! - **Text processing**: Unicode-aware width, truncation and sanitizing
//!
//! # Examples
//!
//! ```
//! use instacats::util::{truncate_to_width, validate_link};
//!
//! let url = validate_link("https://instagram.com/felix").unwrap();
//! assert_eq!(url.scheme(), "https");
//!
//! assert_eq!(truncate_to_width("Professor Whiskers", 10), "Profess...");
//! ```

mod link;
mod text;

pub use link::{validate_link, LinkError};
pub use text::{display_width, strip_control_chars, truncate_to_width};
