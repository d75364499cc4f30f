//! Spotting automotive content in uploads that contain no trouble codes.

/// Words that suggest a file is a diagnostic report even without codes.
pub const DIAGNOSTIC_KEYWORDS: [&str; 13] = [
    "engine",
    "transmission",
    "abs",
    "airbag",
    "check engine",
    "malfunction",
    "error",
    "fault",
    "trouble",
    "diagnostic",
    "scanner",
    "obd",
    "dtc",
];

/// Returns the [`DIAGNOSTIC_KEYWORDS`] found in `content` (case-insensitive
/// substring match), in list order.
pub fn detect_keywords(content: &str) -> Vec<&'static str> {
    let content = content.to_lowercase();
    DIAGNOSTIC_KEYWORDS.into_iter().filter(|keyword| content.contains(keyword)).collect()
}
