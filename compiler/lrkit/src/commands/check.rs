//! `check`: load a language and summarise it.

use std::io::Write;
use std::path::Path;

use super::{load, CommandError};

/// Load `name` from `dir` and print its productions and table size.
pub fn check_language(out: &mut impl Write, dir: &Path, name: &str) -> Result<bool, CommandError> {
    let language = load(dir, name)?;
    let table = language.table();
    let mut terminals: Vec<&str> = table.terminals().into_iter().map(String::as_str).collect();
    terminals.sort_unstable();

    writeln!(
        out,
        "Language '{}': {} productions, {} states",
        language.name(),
        table.grammar().len(),
        table.states().len()
    )?;
    writeln!(out, "Terminals: {}", terminals.join(" "))?;
    writeln!(out)?;
    writeln!(out, "Productions:")?;
    for (id, production) in table.grammar().iter() {
        writeln!(out, "  {id:>3}  {production}")?;
    }
    Ok(true)
}
