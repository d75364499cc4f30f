//! Pulling OBD-II trouble codes out of free text.

use std::collections::HashSet;

use tracing::instrument;

use crate::consts;
use crate::models::Code;

/// How forgiving the [`Extractor`] is about code formatting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Only contiguous codes such as `P0301`.
    #[default]
    Strict,
    /// Also accepts one hyphen, space or tab after the category letter
    /// (`P-0301`, `P 0301`). Line breaks still separate tokens.
    Lenient,
}

/// Finds trouble codes in text (chat messages, scanner exports, uploaded
/// files).
///
/// A code is a category letter (`P`, `B`, `C` or `U`), a digit from 0 to 3,
/// then three hexadecimal digits, matched case-insensitively. It must stand
/// on its own: `XP0301Y` contains no code, while `P0301,` and `(P0301)` do.
///
/// The output is uppercased and deduplicated, in order of first appearance.
/// Text without codes gives an empty list, never an error.
///
/// # Examples
///
/// ```rust
/// use wrench_codes::Extractor;
/// let codes = Extractor::new().extract("Saw P0420 then p0301 then P0420 again");
/// assert_eq!(codes, ["P0420", "P0301"]);
///
/// assert!(Extractor::new().extract("code P-0301").is_empty());
/// assert_eq!(Extractor::lenient().extract("code P-0301"), ["P0301"]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extractor {
    mode: Mode,
}
impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lenient() -> Self {
        Self::with_mode(Mode::Lenient)
    }

    pub fn with_mode(mode: Mode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[instrument(level = "trace", skip(text), fields(text_size = text.len(), codes))]
    pub fn extract(&self, text: &str) -> Vec<Code> {
        let candidates: Vec<String> = match self.mode {
            Mode::Strict => consts::CODE_REGEX.find_iter(text).map(|m| m.as_str().to_ascii_uppercase()).collect(),
            Mode::Lenient => consts::LENIENT_CODE_REGEX
                .captures_iter(text)
                .map(|captures| format!("{}{}", &captures[1], &captures[2]).to_ascii_uppercase())
                .collect(),
        };
        let mut seen = HashSet::new();
        let codes: Vec<Code> = candidates
            .into_iter()
            .filter(|candidate| seen.insert(candidate.clone()))
            .map(Code::from_canonical)
            .collect();
        tracing::Span::current().record("codes", codes.len());
        codes
    }
}

/// Extracts codes with the default (strict) [`Extractor`].
pub fn extract_codes(text: &str) -> Vec<Code> {
    Extractor::new().extract(text)
}
