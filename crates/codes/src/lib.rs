mod consts;
mod database;
mod enrich;
pub mod error;
mod extract;
pub mod models;

use std::path::Path;

pub use crate::database::Database;
pub use crate::enrich::{analyze, enrich};
use crate::error::Result;
pub use crate::extract::{Extractor, Mode, extract_codes};
use crate::models::CodeRecord;

/// Loads the code database a service should build once at startup and share
/// read-only afterwards. See [`Database::load`] for the accepted layouts and
/// failure modes.
pub fn load_database(path: impl AsRef<Path>) -> Result<Database> {
    Database::load(path)
}

/// Looks up a single code; `None` for codes the database doesn't know.
pub fn lookup_code<'db>(database: &'db Database, code: &str) -> Option<&'db CodeRecord> {
    database.lookup(code)
}
