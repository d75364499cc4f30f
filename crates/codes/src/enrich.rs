//! Attaching database records to extracted codes.

use tracing::instrument;

use crate::database::Database;
use crate::extract::Extractor;
use crate::models::{Analysis, Code, LookupResult};

/// Looks up each code, keeping input order and keeping codes the database
/// doesn't know (with `found() == false`).
///
/// Records are copies, so nothing a caller does to a result can reach the
/// database.
///
/// # Examples
///
/// ```rust
/// use wrench_codes::{Database, enrich};
/// let database: Database = r#"{"P0301": {"description": "Cylinder 1 Misfire Detected"}}"#.parse().unwrap();
/// let results = enrich(["P9999", "p0301"], &database);
/// assert_eq!(results.len(), 2);
/// assert!(!results[0].found());
/// assert_eq!(results[1].code, "P0301");
/// assert_eq!(results[1].description(), Some("Cylinder 1 Misfire Detected"));
/// ```
pub fn enrich<I>(codes: I, database: &Database) -> Vec<LookupResult>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    codes
        .into_iter()
        .map(|code| {
            let code = Code::normalize(code.as_ref());
            let record = database.lookup(&code).cloned();
            LookupResult { code, record }
        })
        .collect()
}

/// Extracts codes from `text` with `extractor`, then [`enrich`]es them.
#[instrument(level = "debug", skip_all, fields(text_size = text.len(), total, unrecognized))]
pub fn analyze(text: &str, database: &Database, extractor: &Extractor) -> Analysis {
    let analysis = Analysis::from(enrich(extractor.extract(text), database));
    let span = tracing::Span::current();
    span.record("total", analysis.total());
    span.record("unrecognized", analysis.unrecognized().count());
    analysis
}
