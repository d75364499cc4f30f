use serde::Serialize;

use super::{Category, Code};

/// Everything the database knows about one diagnostic trouble code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeRecord {
    /// Canonical code, unique within a database
    pub code: Code,
    /// Short human-readable meaning, never blank
    pub description: String,
    /// Likely causes, most common first (may be empty)
    pub causes: Vec<String>,
    /// Free-text severity, when the source provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    /// Suggested fixes, when the source provides them
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub solutions: Vec<String>,
}
impl CodeRecord {
    pub fn new(code: Code, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            causes: Vec::new(),
            severity: None,
            solutions: Vec::new(),
        }
    }

    pub fn with_causes<S: Into<String>>(mut self, causes: impl IntoIterator<Item = S>) -> Self {
        self.causes = causes.into_iter().map(Into::into).collect();
        self
    }

    pub fn category(&self) -> Category {
        self.code.category()
    }

    /// Case-insensitive substring match against the description and causes.
    /// `needle` must already be lowercase.
    pub(crate) fn mentions(&self, needle: &str) -> bool {
        self.description.to_lowercase().contains(needle)
            || self.causes.iter().any(|cause| cause.to_lowercase().contains(needle))
    }
}
