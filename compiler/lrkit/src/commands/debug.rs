//! `lex` and `parse`: run a language over a file.

use std::io::Write;
use std::path::Path;

use lrkit_lexer::LexError;

use super::{load, open, CommandError};

/// Print every token of `file`. Unrecognized input is reported and skipped.
pub fn lex_file(out: &mut impl Write, dir: &Path, name: &str, file: &Path) -> Result<bool, CommandError> {
    let language = load(dir, name)?;
    let mut clean = true;
    writeln!(out, "Tokens for '{}':", file.display())?;
    for token in language.tokenize(open(file)?) {
        match token {
            Ok(token) => writeln!(out, "  {token}")?,
            Err(error @ LexError::Unrecognized { .. }) => {
                clean = false;
                writeln!(out, "  error: {error}")?;
            }
            Err(error) => return Err(error.into()),
        }
    }
    Ok(clean)
}

/// Parse `file`, printing the reductions, then the tree or the errors.
pub fn parse_file(out: &mut impl Write, dir: &Path, name: &str, file: &Path) -> Result<bool, CommandError> {
    let language = load(dir, name)?;
    let report = language.parse(open(file)?)?;

    writeln!(out, "Reductions for '{}':", file.display())?;
    for production in &report.reductions {
        writeln!(out, "  {production}")?;
    }
    writeln!(out)?;
    if report.is_success() {
        match &report.tree {
            Some(tree) => writeln!(out, "Accepted: {tree}")?,
            None => writeln!(out, "Accepted")?,
        }
    } else {
        writeln!(out, "Errors:")?;
        for error in &report.errors {
            writeln!(out, "  {error}")?;
        }
    }
    Ok(report.is_success())
}
