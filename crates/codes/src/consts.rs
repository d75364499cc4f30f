use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

/// Category letter.
const CODE_LETTER: &str = "[PBCU]";
/// Standard/manufacturer digit (0-3), then three hex digits.
const CODE_DIGITS: &str = "[0-3][0-9A-F]{3}";

// A normalized (trimmed, uppercased) code, nothing else.
regex!(CANONICAL_CODE_REGEX, &format!("^{CODE_LETTER}{CODE_DIGITS}$"));
// Codes inside free text. `\b` stops "XP0301Y" from matching.
regex!(CODE_REGEX, &format!(r"(?i)\b{CODE_LETTER}{CODE_DIGITS}\b"));
// Scanner exports and people both write "P-0301" and "P 0301". The
// separator is a hyphen, space or tab; a code never spans two lines.
regex!(LENIENT_CODE_REGEX, &format!(r"(?i)\b({CODE_LETTER})[-\t ]?({CODE_DIGITS})\b"));
