use serde::Serialize;

use super::LookupResult;

/// Every code found in a piece of text, looked up, in order of first mention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub results: Vec<LookupResult>,
}
impl Analysis {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Results for codes the database knows.
    pub fn found(&self) -> impl Iterator<Item = &LookupResult> {
        self.results.iter().filter(|result| result.found())
    }

    /// Results for codes the database doesn't know (often manufacturer-specific).
    pub fn unrecognized(&self) -> impl Iterator<Item = &LookupResult> {
        self.results.iter().filter(|result| !result.found())
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|result| result.code.as_str())
    }
}
impl From<Vec<LookupResult>> for Analysis {
    fn from(results: Vec<LookupResult>) -> Self {
        Self { results }
    }
}
impl IntoIterator for Analysis {
    type Item = LookupResult;
    type IntoIter = std::vec::IntoIter<LookupResult>;
    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}
