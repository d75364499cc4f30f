use crate::error::{ErrorKind, Result};
use clap::{ArgAction, Parser, Subcommand};
use exn::ResultExt;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wrench", version)]
#[command(about = "Find OBD-II trouble codes in text and explain them")]
pub struct Args {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, global = true, env = "WRENCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Code database to load instead of the configured one
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Also recognise codes written as "P-0301" or "P 0301"
    #[arg(long, global = true)]
    pub lenient: bool,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Look up one or more codes
    Lookup {
        #[arg(required = true)]
        codes: Vec<String>,
    },
    /// Print the codes found in some text, one per line
    Extract(InputArgs),
    /// Summarise the codes found in some text (or a scanner report file)
    Analyze(InputArgs),
    /// Build the 5-step diagnostic prompt for the codes found in some text
    Prompt(InputArgs),
    /// Search descriptions and causes for a symptom
    Search { keyword: String },
    /// List the codes in the database
    List,
    /// Count the known codes per category
    Categories,
}

/// Where a command reads its text from: arguments, a file, or stdin.
#[derive(clap::Args, Debug, Default, PartialEq, Eq)]
pub struct InputArgs {
    /// Text to scan; read from stdin when neither TEXT nor --file is given
    #[arg(conflicts_with = "file")]
    pub text: Vec<String>,

    /// Scan a file, such as a scanner export
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Text to analyze and, for files, the name to report it under.
#[derive(Debug, PartialEq, Eq)]
pub struct Input {
    pub name: Option<String>,
    pub content: String,
}

impl InputArgs {
    pub fn read(&self) -> Result<Input> {
        self.read_or(io::stdin().lock())
    }

    /// Like [`InputArgs::read`], with `stdin` standing in for standard input.
    fn read_or(&self, mut stdin: impl Read) -> Result<Input> {
        if let Some(path) = &self.file {
            // Scanner exports are not always clean UTF-8.
            let bytes = std::fs::read(path).or_raise(|| ErrorKind::Input(path.clone()))?;
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            return Ok(Input {
                name: Some(name),
                content: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        if !self.text.is_empty() {
            return Ok(Input { name: None, content: self.text.join(" ") });
        }
        let mut bytes = Vec::new();
        stdin.read_to_end(&mut bytes).or_raise(|| ErrorKind::Stdin)?;
        Ok(Input { name: None, content: String::from_utf8_lossy(&bytes).into_owned() })
    }
}
