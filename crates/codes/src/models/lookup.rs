use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::CodeRecord;

/// The outcome of looking up one queried code.
///
/// An unknown code is a normal outcome: `record` is `None` and callers are
/// expected to report the code as unrecognized rather than drop it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    /// The queried code, trimmed and uppercased
    pub code: String,
    /// A copy of the stored record, when the code is known
    pub record: Option<CodeRecord>,
}
impl LookupResult {
    pub fn found(&self) -> bool {
        self.record.is_some()
    }

    pub fn description(&self) -> Option<&str> {
        self.record.as_ref().map(|record| record.description.as_str())
    }

    pub fn causes(&self) -> &[String] {
        self.record.as_ref().map(|record| record.causes.as_slice()).unwrap_or_default()
    }
}

// Serialized as `{"code", "found", "record"?}` so consumers don't have to
// infer `found` from the presence of `record`.
impl Serialize for LookupResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LookupResult", if self.found() { 3 } else { 2 })?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("found", &self.found())?;
        match &self.record {
            Some(record) => state.serialize_field("record", record)?,
            None => state.skip_field("record")?,
        }
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_has_no_details() {
        let result = LookupResult { code: "P9999".to_string(), record: None };
        assert!(!result.found());
        assert_eq!(result.description(), None);
        assert!(result.causes().is_empty());
        assert_eq!(serde_json::to_string(&result).unwrap(), r#"{"code":"P9999","found":false}"#);
    }

    #[test]
    fn test_found_serializes_record() {
        let record = CodeRecord::new("P0300".parse().unwrap(), "Random/Multiple Cylinder Misfire Detected");
        let result = LookupResult { code: "P0300".to_string(), record: Some(record) };
        assert!(result.found());
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.starts_with(r#"{"code":"P0300","found":true,"record":{"code":"P0300""#));
    }
}
