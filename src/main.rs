//! `wrench`: find OBD-II trouble codes in text and explain them.
//!
//! Usage:
//!   wrench lookup P0301
//!   wrench analyze --file scan.txt
//!   echo "check engine, P0420" | wrench prompt
//!
//! Environment variables:
//!   WRENCH_CONFIG    - Configuration file
//!   WRENCH_*         - Any setting, e.g. WRENCH_REPORT__SEARCH_LIMIT=5
//!   RUST_LOG         - Log filter (logs go to stderr)

mod app;
mod cli;
mod error;

use crate::app::App;
use crate::cli::Args;
use crate::error::{ErrorKind, Result};
use clap::Parser;
use exn::ResultExt;
use std::io;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use wrench_codes::Database;
use wrench_config::Config;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        },
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::builder().with_default_directive(level.into()).from_env_lossy())
        .with_writer(io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::load(args.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    if let Some(database) = args.database {
        config.database = database;
    }
    if args.lenient {
        config.extract.lenient = true;
    }

    // Loaded before any command runs; nothing is served from a bad source.
    let database = Database::load(&config.database).or_raise(|| ErrorKind::Database(config.database.clone()))?;
    let app = App::new(&config, database)?;
    app.execute(&args.command, args.json, &mut io::stdout().lock())
}
