//! The in-memory OBD code database.

mod source;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::str::FromStr;

use exn::ResultExt;
use tracing::instrument;

use self::source::Source;
use crate::error::{Error, ErrorKind, Result};
use crate::models::{Category, Code, CodeRecord, LookupResult};

/// Read-only mapping from canonical code to [`CodeRecord`].
///
/// Built once (usually with [`Database::load`]) and never modified afterwards;
/// no method takes `&mut self`. It is `Send + Sync`, so wrap it in an
/// [`Arc`](std::sync::Arc) or hand out `&Database` to share it between threads.
///
/// # Examples
///
/// ```rust
/// use wrench_codes::Database;
/// let database: Database = r#"{"P0301": {"description": "Cylinder 1 Misfire Detected"}}"#.parse().unwrap();
/// assert_eq!(database.lookup(" p0301").unwrap().description, "Cylinder 1 Misfire Detected");
/// assert!(database.lookup("P0302").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Database {
    records: BTreeMap<Code, CodeRecord>,
}

/// Construction
impl Database {
    /// Loads a database from a JSON file.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Unreadable`] if the file is missing or can't be read,
    /// - [`ErrorKind::Malformed`] if it isn't a list of records or an object keyed by code,
    /// - [`ErrorKind::MissingField`] / [`ErrorKind::InvalidCode`] for a bad record,
    /// - [`ErrorKind::DuplicateCode`] if two records normalize to the same code.
    #[instrument(skip_all, fields(path = %path.as_ref().display(), codes))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).or_raise(|| ErrorKind::Unreadable(path.to_path_buf()))?;
        let database = Self::from_slice(&bytes)?;
        tracing::Span::current().record("codes", database.len());
        tracing::info!(codes = database.len(), "loaded OBD code database");
        Ok(database)
    }

    /// Parses a database from raw JSON bytes.
    pub fn from_slice(json: &[u8]) -> Result<Self> {
        let source: Source = serde_json::from_slice(json)
            .or_raise(|| ErrorKind::Malformed("not a list of records or an object keyed by code".to_string()))?;
        Self::from_records(source.into_records()?)
    }

    /// Builds a database from records, rejecting duplicate codes and blank
    /// descriptions.
    pub fn from_records(records: impl IntoIterator<Item = CodeRecord>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for record in records {
            if record.description.trim().is_empty() {
                exn::bail!(ErrorKind::MissingField {
                    record: record.code.to_string(),
                    field: "description",
                });
            }
            if map.contains_key(&record.code) {
                tracing::warn!(code = %record.code, "duplicate code in database source");
                exn::bail!(ErrorKind::DuplicateCode(record.code.to_string()));
            }
            map.insert(record.code.clone(), record);
        }
        Ok(Self { records: map })
    }
}
impl FromStr for Database {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_slice(s.as_bytes())
    }
}

/// Queries
impl Database {
    /// Case-insensitive lookup that ignores surrounding whitespace. Unknown
    /// and malformed codes are simply absent.
    pub fn lookup(&self, code: &str) -> Option<&CodeRecord> {
        self.records.get(Code::normalize(code).as_str())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.lookup(code).is_some()
    }

    /// Every known code.
    pub fn all_codes(&self) -> BTreeSet<&str> {
        self.records.keys().map(Code::as_str).collect()
    }

    /// Every record, in code order.
    pub fn records(&self) -> impl ExactSizeIterator<Item = &CodeRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose description or causes contain `keyword`, ignoring case,
    /// in code order. A blank keyword matches nothing.
    #[instrument(level = "debug", skip(self))]
    pub fn search(&self, keyword: &str) -> Vec<&CodeRecord> {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.records.values().filter(|record| record.mentions(&needle)).collect()
    }

    /// Known codes grouped by category. All four categories are present,
    /// even when empty; codes within a category are sorted.
    pub fn categories(&self) -> BTreeMap<Category, Vec<&Code>> {
        let mut categories: BTreeMap<Category, Vec<&Code>> =
            Category::ALL.into_iter().map(|category| (category, Vec::new())).collect();
        for code in self.records.keys() {
            categories.entry(code.category()).or_default().push(code);
        }
        categories
    }

    /// See [`enrich`](crate::enrich()).
    pub fn enrich<I>(&self, codes: I) -> Vec<LookupResult>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        crate::enrich::enrich(codes, self)
    }
}
