//! Text reports over OBD code lookups.
//!
//! Everything here is presentation: the lookups themselves live in
//! [`wrench_codes`]. A [`Reporter`] turns an [`Analysis`](wrench_codes::models::Analysis)
//! into a diagnostic prompt or a chat-ready summary, and the database into
//! listings and category overviews.

pub mod error;
mod keywords;
mod report;
pub mod templates;

pub use crate::keywords::{DIAGNOSTIC_KEYWORDS, detect_keywords};
pub use crate::report::{Limits, Reporter};
