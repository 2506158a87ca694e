//! Command handlers for the lrkit CLI.
//!
//! Every handler writes its report to `out` and returns whether the command
//! succeeded; the binary maps `false` to a non-zero exit status. Errors are
//! reserved for conditions that stop a command before it can report.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use lrkit_lexer::{CharSource, LexError};
use lrkit_parse::LoadError;

use crate::language::Language;

mod check;
mod debug;

pub use check::check_language;
pub use debug::{lex_file, parse_file};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("cannot open '{}': {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("error reading input: {0}")]
    Lex(#[from] LexError),
    #[error("cannot write report: {0}")]
    Output(#[from] io::Error),
}

fn load(dir: &Path, name: &str) -> Result<Language, CommandError> {
    Ok(Language::load(dir, name)?)
}

/// Characters of `path`, decoded as they are read.
fn open(path: &Path) -> Result<CharSource<'static>, CommandError> {
    let file = File::open(path).map_err(|source| CommandError::Open {
        path: path.to_owned(),
        source,
    })?;
    Ok(CharSource::from_reader(BufReader::new(file)))
}
