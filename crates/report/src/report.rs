//! Rendering core lookup results into assistant-facing text.

use exn::ResultExt;
use tracing::instrument;
use upon::{Engine, Template, Value};
use wrench_codes::Database;
use wrench_codes::models::{Analysis, Category, Code, CodeRecord, LookupResult};

use crate::error::{ErrorKind, Result};
use crate::{keywords, templates};

/// How much of a file, a search, or the database a report shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum bytes of uploaded content echoed back as a preview
    pub preview_bytes: usize,
    /// Maximum records listed in a search summary
    pub search_results: usize,
    /// Maximum records listed in a database listing
    pub listing_entries: usize,
}
impl Default for Limits {
    fn default() -> Self {
        Self {
            preview_bytes: 400,
            search_results: 10,
            listing_entries: 20,
        }
    }
}

struct Templates {
    diagnostic_prompt: Template<'static>,
    code_summary: Template<'static>,
    analysis_summary: Template<'static>,
    file_analysis: Template<'static>,
    search_summary: Template<'static>,
    listing: Template<'static>,
    category_overview: Template<'static>,
}

/// Renders lookups, analyses and database overviews with the built-in
/// [`templates`].
///
/// All templates are compiled once in [`Reporter::new`], so a broken template
/// fails at construction rather than on the first request. A `Reporter` can
/// be shared as freely as the [`Database`] it reports on.
///
/// # Example
///
/// ```
/// use wrench_codes::{Database, Extractor, analyze};
/// use wrench_report::Reporter;
///
/// let database: Database = r#"{"P0301": {"description": "Cylinder 1 Misfire Detected"}}"#.parse().unwrap();
/// let analysis = analyze("my scanner says p0301", &database, &Extractor::new());
/// let reporter = Reporter::new().unwrap();
/// let summary = reporter.analysis_summary(&analysis).unwrap();
/// assert!(summary.contains("• P0301: Cylinder 1 Misfire Detected"));
/// ```
pub struct Reporter {
    engine: Engine<'static>,
    templates: Templates,
    limits: Limits,
}

impl Reporter {
    pub fn new() -> Result<Self> {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Result<Self> {
        let mut engine = Engine::new();
        addons::configure(&mut engine);
        let compile =
            |name: &'static str, source: &'static str| engine.compile(source).or_raise(|| ErrorKind::Template(name));
        let templates = Templates {
            diagnostic_prompt: compile("diagnostic_prompt", templates::DIAGNOSTIC_PROMPT)?,
            code_summary: compile("code_summary", templates::CODE_SUMMARY)?,
            analysis_summary: compile("analysis_summary", templates::ANALYSIS_SUMMARY)?,
            file_analysis: compile("file_analysis", templates::FILE_ANALYSIS)?,
            search_summary: compile("search_summary", templates::SEARCH_SUMMARY)?,
            listing: compile("listing", templates::LISTING)?,
            category_overview: compile("category_overview", templates::CATEGORY_OVERVIEW)?,
        };
        Ok(Self { engine, templates, limits })
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// The 5-step diagnostic walkthrough for every code in `analysis`, ready
    /// to hand to a language model (or a person).
    #[instrument(skip_all, fields(codes = analysis.total()))]
    pub fn diagnostic_prompt(&self, analysis: &Analysis) -> Result<String> {
        let parameters = upon::value! {
            empty: analysis.is_empty(),
            multiple: analysis.total() > 1,
            total: analysis.total() as u64,
            codes: Value::List(analysis.results.iter().map(Self::result_value).collect()),
        };
        self.render(&self.templates.diagnostic_prompt, "diagnostic_prompt", parameters)
    }

    /// `OBD Code P0301: Cylinder 1 Misfire Detected. Possible causes: ...`
    pub fn code_summary(&self, result: &LookupResult) -> Result<String> {
        self.render(&self.templates.code_summary, "code_summary", Self::result_value(result))
    }

    /// Every code extracted from a message, with descriptions and causes.
    pub fn analysis_summary(&self, analysis: &Analysis) -> Result<String> {
        let parameters = upon::value! {
            empty: analysis.is_empty(),
            total: analysis.total() as u64,
            codes: Value::List(analysis.results.iter().map(Self::result_value).collect()),
        };
        self.render(&self.templates.analysis_summary, "analysis_summary", parameters)
    }

    /// Report for an uploaded file: the codes it contains, or, when there are
    /// none, whether it looks automotive at all.
    #[instrument(skip(self, content, analysis), fields(content_size = content.len(), codes = analysis.total()))]
    pub fn file_analysis(&self, file_name: &str, content: &str, analysis: &Analysis) -> Result<String> {
        let (preview, truncated) = preview(content, self.limits.preview_bytes);
        let keywords = if analysis.is_empty() { keywords::detect_keywords(content) } else { Vec::new() };
        let parameters = upon::value! {
            file_name: file_name,
            blank: content.trim().is_empty(),
            empty: analysis.is_empty(),
            total: analysis.total() as u64,
            code_list: strings(&analysis.codes().collect::<Vec<_>>()),
            codes: Value::List(analysis.results.iter().map(Self::result_value).collect()),
            has_keywords: !keywords.is_empty(),
            keywords: strings(&keywords),
            preview: preview,
            truncated: truncated,
        };
        self.render(&self.templates.file_analysis, "file_analysis", parameters)
    }

    /// Keyword search results, capped at [`Limits::search_results`].
    pub fn search_summary(&self, keyword: &str, records: &[&CodeRecord]) -> Result<String> {
        let shown = records.len().min(self.limits.search_results);
        let parameters = upon::value! {
            keyword: keyword.trim(),
            empty: records.is_empty(),
            total: records.len() as u64,
            records: Value::List(records[..shown].iter().map(|record| Self::record_value(record)).collect()),
            has_more: records.len() > shown,
            more: (records.len() - shown) as u64,
        };
        self.render(&self.templates.search_summary, "search_summary", parameters)
    }

    /// The first [`Limits::listing_entries`] records of the database.
    pub fn listing(&self, database: &Database) -> Result<String> {
        let shown = database.len().min(self.limits.listing_entries);
        let parameters = upon::value! {
            total: database.len() as u64,
            records: Value::List(database.records().take(shown).map(Self::record_value).collect()),
            has_more: database.len() > shown,
            more: (database.len() - shown) as u64,
        };
        self.render(&self.templates.listing, "listing", parameters)
    }

    /// How many known codes fall in each category.
    pub fn category_overview(&self, database: &Database) -> Result<String> {
        let categories = database.categories();
        let categories = Category::ALL
            .into_iter()
            .map(|category| {
                upon::value! {
                    letter: category.letter().to_string(),
                    name: category.display_name(),
                    description: category.description(),
                    count: categories.get(&category).map(Vec::len).unwrap_or_default() as u64,
                }
            })
            .collect();
        let parameters = upon::value! {
            categories: Value::List(categories),
        };
        self.render(&self.templates.category_overview, "category_overview", parameters)
    }

    fn render(&self, template: &Template<'static>, name: &'static str, parameters: Value) -> Result<String> {
        template.render(&self.engine, parameters).to_string().or_raise(|| ErrorKind::Render(name))
    }

    fn result_value(result: &LookupResult) -> Value {
        let category = result.code.parse::<Code>().map(|code| code.category().as_str()).unwrap_or("Unknown");
        let description = result.description().unwrap_or_default();
        let subject = if result.found() { format!("{} {}", result.code, description) } else { result.code.clone() };
        upon::value! {
            code: result.code.as_str(),
            category: category,
            found: result.found(),
            description: description,
            has_causes: !result.causes().is_empty(),
            causes: strings(result.causes()),
            video_query: format!("{subject} repair"),
            parts_query: format!("{subject} replacement parts"),
        }
    }

    fn record_value(record: &CodeRecord) -> Value {
        upon::value! {
            code: record.code.as_str(),
            description: record.description.as_str(),
        }
    }
}

fn strings<S: AsRef<str>>(items: &[S]) -> Value {
    Value::List(items.iter().map(|item| Value::from(item.as_ref())).collect())
}

/// Cuts `content` to at most `max_bytes` without splitting a character.
/// The flag says whether anything was cut.
fn preview(content: &str, max_bytes: usize) -> (&str, bool) {
    if content.len() <= max_bytes {
        return (content, false);
    }
    (&content[..content.floor_char_boundary(max_bytes)], true)
}

/// Custom [`upon`] extensions.
mod addons {
    use std::fmt::Write;
    use upon::{Engine, Value, fmt as upon_fmt};

    /// Joins a list with `", "`; anything else is formatted as usual.
    fn join_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
        match value {
            Value::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    upon_fmt::default(f, item)?;
                }
            },
            v => upon_fmt::default(f, v)?,
        };
        Ok(())
    }

    /// Registers the `join` formatter on the given engine.
    pub(crate) fn configure(engine: &mut Engine<'_>) {
        engine.add_formatter("join", join_formatter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrench_codes::{Extractor, analyze};

    fn database() -> Database {
        r#"{
            "P0301": {"description": "Cylinder 1 Misfire Detected", "causes": ["Faulty spark plug", "Faulty ignition coil"]},
            "P0420": {"description": "Catalyst System Efficiency Below Threshold", "causes": ["Failing catalytic converter"]},
            "P0171": {"description": "System Too Lean (Bank 1)", "causes": ["Vacuum leak"]},
            "B0001": {"description": "Driver Frontal Stage 1 Deployment Control"},
            "U0100": {"description": "Lost Communication With ECM/PCM A", "causes": ["CAN bus wiring fault"]}
        }"#
        .parse()
        .unwrap()
    }

    fn reporter() -> Reporter {
        Reporter::new().unwrap()
    }

    #[test]
    fn test_code_summary_found() {
        let database = database();
        let result = &database.enrich(["p0301"])[0];
        assert_eq!(
            reporter().code_summary(result).unwrap(),
            "OBD Code P0301: Cylinder 1 Misfire Detected. Possible causes: Faulty spark plug, Faulty ignition coil"
        );
    }

    #[test]
    fn test_code_summary_without_causes() {
        let database = database();
        let result = &database.enrich(["B0001"])[0];
        assert_eq!(reporter().code_summary(result).unwrap(), "OBD Code B0001: Driver Frontal Stage 1 Deployment Control.");
    }

    #[test]
    fn test_code_summary_unknown() {
        let database = database();
        let result = &database.enrich(["P9999"])[0];
        assert_eq!(reporter().code_summary(result).unwrap(), "OBD Code P9999 not found in database.");
    }

    #[test]
    fn test_analysis_summary() {
        let database = database();
        let analysis = analyze("P0420 and P1690", &database, &Extractor::new());
        let summary = reporter().analysis_summary(&analysis).unwrap();
        assert!(summary.starts_with("Found 2 OBD codes in the text:"));
        assert!(summary.contains("• P0420: Catalyst System Efficiency Below Threshold"));
        assert!(summary.contains("Possible causes: Failing catalytic converter"));
        assert!(summary.contains("• P1690: Code not found in database"));
        assert!(summary.find("P0420").unwrap() < summary.find("P1690").unwrap());
    }

    #[test]
    fn test_analysis_summary_empty() {
        let analysis = analyze("no codes here", &database(), &Extractor::new());
        assert_eq!(
            reporter().analysis_summary(&analysis).unwrap(),
            "No OBD diagnostic trouble codes found in the provided text."
        );
    }

    #[test]
    fn test_diagnostic_prompt_has_five_steps_per_code() {
        let database = database();
        let analysis = analyze("p0301, P0420 and P1690", &database, &Extractor::new());
        let prompt = reporter().diagnostic_prompt(&analysis).unwrap();
        for step in [
            "STEP 1 - WHAT IT MEANS",
            "STEP 2 - WHAT MIGHT CAUSE IT",
            "STEP 3 - HOW TO FIX IT AT HOME",
            "STEP 4 - DIFFICULTY LEVEL",
            "STEP 5 - COST & TIME ESTIMATE",
        ] {
            assert_eq!(prompt.matches(step).count(), 3, "{step}");
        }
        assert!(prompt.contains("━━━ P0301 (Powertrain) ━━━"));
        assert!(prompt.contains("• Faulty ignition coil"));
        assert!(prompt.contains(r#""P0301 Cylinder 1 Misfire Detected repair""#));
        assert!(prompt.contains(r#""P0420 Catalyst System Efficiency Below Threshold replacement parts""#));
        assert!(prompt.contains("P1690 is not in the diagnostic database (may be manufacturer-specific)"));
        assert_eq!(prompt.matches("LOCAL REPAIR SHOPS").count(), 1);
    }

    #[test]
    fn test_diagnostic_prompt_single_code_has_no_shop_section() {
        let analysis = analyze("B0001", &database(), &Extractor::new());
        let prompt = reporter().diagnostic_prompt(&analysis).unwrap();
        assert!(prompt.contains("━━━ B0001 (Body) ━━━"));
        assert!(prompt.contains("I don't have recorded causes for this code"));
        assert!(!prompt.contains("LOCAL REPAIR SHOPS"));
    }

    #[test]
    fn test_diagnostic_prompt_without_codes() {
        let prompt = reporter().diagnostic_prompt(&Analysis::default()).unwrap();
        assert!(prompt.contains("No OBD-II trouble codes were found"));
        assert!(!prompt.contains("STEP 1"));
    }

    #[test]
    fn test_file_analysis_with_codes() {
        let database = database();
        let content = "ECM  P0171  confirmed\nBCM  U0100  pending\n";
        let analysis = analyze(content, &database, &Extractor::new());
        let report = reporter().file_analysis("scan.txt", content, &analysis).unwrap();
        assert!(report.contains("File Analysis Results for scan.txt"));
        assert!(report.contains("Found 2 OBD diagnostic codes:** P0171, U0100"));
        assert!(report.contains("**P0171:** System Too Lean (Bank 1)"));
        assert!(report.contains("• **Possible causes:** CAN bus wiring fault"));
        assert!(report.contains("ECM  P0171  confirmed"));
        assert!(!report.contains("..."));
    }

    #[test]
    fn test_file_analysis_keywords_without_codes() {
        let content = "Check engine light came on, scanner could not read the fault";
        let analysis = analyze(content, &database(), &Extractor::new());
        let report = reporter().file_analysis("notes.txt", content, &analysis).unwrap();
        assert!(report.contains("No OBD codes found"));
        assert!(report.contains("**Keywords found:** engine, check engine, fault, scanner"));
        assert!(report.contains("Suggestions"));
    }

    #[test]
    fn test_file_analysis_non_automotive() {
        let content = "Dear diary, today was sunny.";
        let analysis = analyze(content, &database(), &Extractor::new());
        let report = reporter().file_analysis("diary.txt", content, &analysis).unwrap();
        assert!(report.contains("No OBD codes or automotive content detected"));
        assert!(report.contains("non-automotive file"));
    }

    #[test]
    fn test_file_analysis_blank() {
        let report = reporter().file_analysis("empty.txt", "  \n", &Analysis::default()).unwrap();
        assert_eq!(report, "The uploaded file appears to be empty or unreadable.");
    }

    #[test]
    fn test_file_analysis_truncates_preview() {
        let reporter = Reporter::with_limits(Limits { preview_bytes: 8, ..Limits::default() }).unwrap();
        let content = "P0301 ééé and more text";
        let analysis = analyze(content, &database(), &Extractor::new());
        let report = reporter.file_analysis("long.txt", content, &analysis).unwrap();
        assert!(report.contains("P0301 é..."));
        assert!(!report.contains("and more text"));
    }

    #[test]
    fn test_search_summary_caps_results() {
        let database = database();
        let reporter = Reporter::with_limits(Limits { search_results: 1, ..Limits::default() }).unwrap();
        let records = database.search("fault");
        assert_eq!(records.len(), 2);
        let summary = reporter.search_summary("fault", &records).unwrap();
        assert!(summary.starts_with("Found 2 OBD codes matching 'fault':"));
        assert!(summary.contains("• P0301: Cylinder 1 Misfire Detected"));
        assert!(!summary.contains("U0100"));
        assert!(summary.contains("... and 1 more codes"));
    }

    #[test]
    fn test_search_summary_empty() {
        let summary = reporter().search_summary("flux capacitor", &[]).unwrap();
        assert_eq!(summary, "No OBD codes found matching keyword 'flux capacitor'.");
    }

    #[test]
    fn test_listing() {
        let reporter = Reporter::with_limits(Limits { listing_entries: 2, ..Limits::default() }).unwrap();
        let listing = reporter.listing(&database()).unwrap();
        assert!(listing.starts_with("Database contains 5 OBD codes:"));
        assert!(listing.contains("• B0001: Driver Frontal Stage 1 Deployment Control"));
        assert!(listing.contains("• P0171: System Too Lean (Bank 1)"));
        assert!(!listing.contains("P0301"));
        assert!(listing.contains("... and 3 more codes"));
    }

    #[test]
    fn test_category_overview() {
        let overview = reporter().category_overview(&database()).unwrap();
        assert!(overview.contains("• P (Powertrain): 3 codes"));
        assert!(overview.contains("• B (Body): 1 codes"));
        assert!(overview.contains("• C (Chassis): 0 codes"));
        assert!(overview.contains("• U (Network/Communication): 1 codes\n  Communication between control modules"));
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        assert_eq!(preview("héllo", 2), ("h", true));
        assert_eq!(preview("héllo", 3), ("hé", true));
        assert_eq!(preview("hello", 5), ("hello", false));
        assert_eq!(preview("", 0), ("", false));
    }
}
