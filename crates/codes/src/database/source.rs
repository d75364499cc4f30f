//! On-disk layouts of the code database.
//!
//! Two JSON layouts are accepted:
//!
//! ```json
//! [{"code": "P0301", "description": "Cylinder 1 Misfire Detected", "causes": ["Faulty spark plug"]}]
//! ```
//!
//! ```json
//! {"P0301": {"description": "Cylinder 1 Misfire Detected", "causes": ["Faulty spark plug"]}}
//! ```
//!
//! Entries are kept in source order (instead of going through a map) so that
//! repeated keys in the keyed layout reach the duplicate check.

use std::fmt::{Formatter, Result as FmtResult};

use exn::OptionExt;
use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};

use crate::error::{ErrorKind, Result};
use crate::models::{Code, CodeRecord};

#[derive(Debug)]
pub(crate) enum Source {
    List(Vec<RawRecord>),
    Keyed(Vec<(String, RawRecord)>),
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRecord {
    code: Option<String>,
    description: Option<String>,
    causes: Option<Vec<String>>,
    severity: Option<String>,
    solutions: Option<Vec<String>>,
}

impl Source {
    /// Validates every entry, in source order.
    pub(crate) fn into_records(self) -> Result<Vec<CodeRecord>> {
        match self {
            Self::List(raws) => raws
                .into_iter()
                .enumerate()
                .map(|(index, raw)| {
                    let code = raw.code.as_deref().ok_or_raise(|| ErrorKind::MissingField {
                        record: format!("#{index}"),
                        field: "code",
                    })?;
                    let code: Code = code.parse()?;
                    raw.into_record(code)
                })
                .collect(),
            Self::Keyed(entries) => entries
                .into_iter()
                .map(|(key, raw)| {
                    let code: Code = key.parse()?;
                    if let Some(declared) = raw.code.as_deref()
                        && Code::normalize(declared) != code.as_str()
                    {
                        exn::bail!(ErrorKind::Malformed(format!("entry {key} declares a different code {declared:?}")));
                    }
                    raw.into_record(code)
                })
                .collect(),
        }
    }
}

impl RawRecord {
    fn into_record(self, code: Code) -> Result<CodeRecord> {
        let description = self.description.filter(|d| !d.trim().is_empty()).ok_or_raise(|| ErrorKind::MissingField {
            record: code.to_string(),
            field: "description",
        })?;
        Ok(CodeRecord {
            code,
            description,
            causes: self.causes.unwrap_or_default(),
            severity: self.severity,
            solutions: self.solutions.unwrap_or_default(),
        })
    }
}

impl<'de> Deserialize<'de> for Source {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(SourceVisitor)
    }
}

struct SourceVisitor;
impl<'de> Visitor<'de> for SourceVisitor {
    type Value = Source;

    fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("a list of code records, or an object of records keyed by code")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
        let mut records = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(record) = seq.next_element::<RawRecord>()? {
            records.push(record);
        }
        Ok(Source::List(records))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<String, RawRecord>()? {
            entries.push(entry);
        }
        Ok(Source::Keyed(entries))
    }
}
