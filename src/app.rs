use crate::cli::Command;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use serde::Serialize;
use std::io::Write;
use tracing::instrument;
use wrench_codes::models::Code;
use wrench_codes::{Database, Extractor, analyze};
use wrench_config::Config;
use wrench_report::{Limits, Reporter};

/// Everything a command needs, built once per process.
pub struct App {
    database: Database,
    extractor: Extractor,
    reporter: Reporter,
}

impl App {
    pub fn new(config: &Config, database: Database) -> Result<Self> {
        let extractor = if config.extract.lenient { Extractor::lenient() } else { Extractor::new() };
        let reporter = Reporter::with_limits(Limits {
            preview_bytes: config.report.preview_bytes,
            search_results: config.report.search_limit,
            listing_entries: config.report.listing_limit,
        })
        .or_raise(|| ErrorKind::Report)?;
        Ok(Self { database, extractor, reporter })
    }

    /// Runs `command`, writing text (or JSON when `json` is set) to `out`.
    #[instrument(skip(self, out))]
    pub fn execute(&self, command: &Command, json: bool, out: &mut impl Write) -> Result<()> {
        match command {
            Command::Lookup { codes } => {
                let results = self.database.enrich(codes);
                if json {
                    return write_json(out, &results);
                }
                let summaries = results
                    .iter()
                    .map(|result| self.reporter.code_summary(result))
                    .collect::<wrench_report::error::Result<Vec<_>>>()
                    .or_raise(|| ErrorKind::Report)?;
                write_text(out, &summaries.join("\n"))
            },
            Command::Extract(input) => {
                let input = input.read()?;
                let codes = self.extractor.extract(&input.content);
                if json {
                    return write_json(out, &codes);
                }
                write_text(out, &codes.iter().map(Code::as_str).collect::<Vec<_>>().join("\n"))
            },
            Command::Analyze(input) => {
                let input = input.read()?;
                let analysis = analyze(&input.content, &self.database, &self.extractor);
                if json {
                    return write_json(out, &analysis);
                }
                let report = match &input.name {
                    Some(name) => self.reporter.file_analysis(name, &input.content, &analysis),
                    None => self.reporter.analysis_summary(&analysis),
                };
                write_text(out, &report.or_raise(|| ErrorKind::Report)?)
            },
            Command::Prompt(input) => {
                let input = input.read()?;
                let analysis = analyze(&input.content, &self.database, &self.extractor);
                let prompt = self.reporter.diagnostic_prompt(&analysis).or_raise(|| ErrorKind::Report)?;
                if json {
                    return write_json(out, &PromptOutput { prompt: &prompt, analysis: &analysis });
                }
                write_text(out, &prompt)
            },
            Command::Search { keyword } => {
                let records = self.database.search(keyword);
                if json {
                    return write_json(out, &records);
                }
                write_text(out, &self.reporter.search_summary(keyword, &records).or_raise(|| ErrorKind::Report)?)
            },
            Command::List => {
                if json {
                    return write_json(out, &self.database.records().collect::<Vec<_>>());
                }
                write_text(out, &self.reporter.listing(&self.database).or_raise(|| ErrorKind::Report)?)
            },
            Command::Categories => {
                if json {
                    return write_json(out, &self.database.categories());
                }
                write_text(out, &self.reporter.category_overview(&self.database).or_raise(|| ErrorKind::Report)?)
            },
        }
    }
}

#[derive(Serialize)]
struct PromptOutput<'a> {
    prompt: &'a str,
    analysis: &'a wrench_codes::models::Analysis,
}

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).or_raise(|| ErrorKind::Output)?;
    writeln!(out).or_raise(|| ErrorKind::Output)
}

fn write_text(out: &mut impl Write, text: &str) -> Result<()> {
    let text = text.trim_end();
    if text.is_empty() {
        return Ok(());
    }
    writeln!(out, "{text}").or_raise(|| ErrorKind::Output)
}
