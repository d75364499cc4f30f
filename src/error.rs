//! Command-line error types.

use derive_more::{Display, Error};
use std::path::PathBuf;

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Fix the configuration file or `WRENCH_*` environment.
    #[display("could not load configuration")]
    Config,
    /// Fix or point `--database` at a valid code database.
    #[display("could not load code database from {}", _0.display())]
    Database(#[error(not(source))] PathBuf),
    /// The file given with `--file` can't be read.
    #[display("could not read input file {}", _0.display())]
    Input(#[error(not(source))] PathBuf),
    #[display("could not read standard input")]
    Stdin,
    #[display("could not render report")]
    Report,
    #[display("could not write output")]
    Output,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Stdin | Self::Output)
    }
}
