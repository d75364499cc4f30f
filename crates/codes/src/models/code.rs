use std::borrow::Borrow;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Category;
use crate::consts;
use crate::error::{Error, ErrorKind};

/// A validated OBD-II diagnostic trouble code in canonical form.
///
/// The only way to get one is by parsing, which trims surrounding whitespace,
/// uppercases ASCII letters and checks the `[PBCU][0-3][0-9A-F]{3}` shape.
/// Two codes that differ only by case or padding therefore compare equal.
///
/// # Examples
///
/// ```rust
/// use wrench_codes::models::{Category, Code};
/// let code: Code = " p0a1f ".parse().unwrap();
/// assert_eq!(code, "P0A1F");
/// assert_eq!(code.category(), Category::Powertrain);
/// assert!("P9301".parse::<Code>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code(String);

impl Code {
    /// Trims and uppercases a raw code without validating it.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_ascii_uppercase()
    }

    /// Returns `true` if `raw` would parse into a [`Code`].
    pub fn is_valid(raw: &str) -> bool {
        consts::CANONICAL_CODE_REGEX.is_match(&Self::normalize(raw))
    }

    /// Wraps a string already known to be canonical (an uppercased regex match).
    pub(crate) fn from_canonical(canonical: String) -> Self {
        debug_assert!(consts::CANONICAL_CODE_REGEX.is_match(&canonical));
        Self(canonical)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn category(&self) -> Category {
        // Validation guarantees the first byte is one of the four letters.
        match self.0.as_bytes()[0] {
            b'P' => Category::Powertrain,
            b'B' => Category::Body,
            b'C' => Category::Chassis,
            _ => Category::Network,
        }
    }

    /// `true` for SAE-defined codes (second character `0` or `2`), `false`
    /// for manufacturer-specific ones (`1` or `3`).
    pub fn is_generic(&self) -> bool {
        matches!(self.0.as_bytes()[1], b'0' | b'2')
    }
}

impl FromStr for Code {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = Self::normalize(s);
        if !consts::CANONICAL_CODE_REGEX.is_match(&normalized) {
            exn::bail!(ErrorKind::InvalidCode(s.to_string()));
        }
        Ok(Self(normalized))
    }
}
impl TryFrom<String> for Code {
    type Error = Error;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.as_str().parse()
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
impl Borrow<str> for Code {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}
impl PartialEq<str> for Code {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
impl PartialEq<&str> for Code {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.0
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Code {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
impl<'de> Deserialize<'de> for Code {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|err: Error| serde::de::Error::custom(&*err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("P0301", "P0301")]
    #[case("p0301", "P0301")]
    #[case("  u0100\n", "U0100")]
    #[case("b1a2f", "B1A2F")]
    #[case("C3FFF", "C3FFF")]
    fn test_parse_valid(#[case] input: &str, #[case] expected: &str) {
        let code: Code = input.parse().unwrap();
        assert_eq!(code.as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("P")]
    #[case("P030")]
    #[case("P03011")]
    #[case("P9301")]
    #[case("P4301")]
    #[case("X0301")]
    #[case("P0G01")]
    #[case("P 0301")]
    fn test_parse_invalid(#[case] input: &str) {
        let err = input.parse::<Code>().unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidCode(_)));
    }

    #[rstest]
    #[case("P0301", Category::Powertrain, true)]
    #[case("B1200", Category::Body, false)]
    #[case("C2100", Category::Chassis, true)]
    #[case("U3000", Category::Network, false)]
    fn test_category_and_origin(#[case] input: &str, #[case] category: Category, #[case] generic: bool) {
        let code: Code = input.parse().unwrap();
        assert_eq!(code.category(), category);
        assert_eq!(code.is_generic(), generic);
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut codes: Vec<Code> = ["P0420", "B0001", "P0301", "U0100"].iter().map(|s| s.parse().unwrap()).collect();
        codes.sort();
        let sorted: Vec<&str> = codes.iter().map(Code::as_str).collect();
        assert_eq!(sorted, ["B0001", "P0301", "P0420", "U0100"]);
    }

    #[test]
    fn test_serde_uses_plain_string() {
        let code: Code = "p0171".parse().unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), r#""P0171""#);
        let back: Code = serde_json::from_str(r#"" p0171""#).unwrap();
        assert_eq!(back, code);
        assert!(serde_json::from_str::<Code>(r#""not a code""#).is_err());
    }
}
