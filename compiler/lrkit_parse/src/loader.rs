//! Text formats for grammars, parsing tables and error messages.
//!
//! A language lives in a directory as three files sharing a name:
//!
//! - `<name>.grammar`: one production per line, `LHS -> sym sym ...`, with
//!   `''` as the whole right-hand side of an epsilon production. Blank lines
//!   and lines starting with `#` are skipped.
//! - `<name>.table`: tab-separated. The header row has an empty first cell
//!   followed by one symbol per column. Every following row starts with its
//!   state number, counting from 0, and holds `sN`, `rN`, `eN` or `acc` under
//!   terminal columns and a bare state number under nonterminal columns.
//!   Lines starting with `#` are skipped.
//! - `<name>.error` (optional): `code=message` per line, `eN` entries refer
//!   to these codes.

use std::fmt;
use std::fs;
use std::hash::Hash;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::grammar::{Grammar, Production, ProductionId};
use crate::symbol::Symbol;
use crate::table::{ParsingTable, ParsingTableBuilder, StateBuilder, StateId, TableError};

const ARROW: &str = "->";
const EPSILON: &str = "''";

/// Maps symbol names in language files to grammar symbols.
pub trait SymbolResolver<T, N> {
    fn terminal(&self, text: &str) -> Option<T>;
    fn nonterminal(&self, text: &str) -> Option<N>;
}

impl<T, N, FT, FN> SymbolResolver<T, N> for (FT, FN)
where
    FT: Fn(&str) -> Option<T>,
    FN: Fn(&str) -> Option<N>,
{
    fn terminal(&self, text: &str) -> Option<T> {
        (self.0)(text)
    }

    fn nonterminal(&self, text: &str) -> Option<N> {
        (self.1)(text)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Production with less than 3 symbols: {line}")]
    ShortProduction { line: String },
    #[error("Left hand symbol \"{symbol}\" in production \"{line}\" was not recognized as a non-terminal")]
    LeftHandSide { symbol: String, line: String },
    #[error("Expected \"->\" after the left hand symbol: {line}")]
    MissingArrow { line: String },
    #[error("Epsilon symbol must be the only one in the right hand side of a production: {line}")]
    EpsilonNotAlone { line: String },
    #[error("Symbol \"{symbol}\" in production \"{line}\" is not valid")]
    InvalidSymbol { symbol: String, line: String },
    #[error("Could not find header row for table")]
    MissingHeader,
    #[error("\"{symbol}\" in parse table is not a valid symbol")]
    InvalidColumn { symbol: String },
    #[error("Expected state \"{expected}\" but found \"{found}\"")]
    UnexpectedState { expected: usize, found: String },
    #[error("Invalid action \"{action}\" in row \"{row}\" and column \"{column}\"")]
    InvalidAction {
        action: String,
        row: String,
        column: String,
    },
    #[error("Row \"{row}\" has more cells than the header")]
    ExtraCell { row: String },
    #[error("Could not find error message for error code \"{code}\"")]
    MissingMessage { code: usize },
    #[error("Malformed error message entry: {line}")]
    MalformedMessage { line: String },
    #[error("Could not read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Parse a grammar file.
///
/// Right-hand symbols resolve as nonterminals first, then as terminals.
pub fn load_grammar<T, N>(text: &str, resolver: &impl SymbolResolver<T, N>) -> Result<Grammar<T, N>, LoadError>
where
    T: fmt::Display,
    N: fmt::Display,
{
    let mut grammar = Grammar::new();
    for line in text.lines() {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        grammar.push(production(line, resolver)?);
    }
    debug!(productions = grammar.len(), "loaded grammar");
    Ok(grammar)
}

fn production<T, N>(line: &str, resolver: &impl SymbolResolver<T, N>) -> Result<Production<T, N>, LoadError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(LoadError::ShortProduction { line: line.to_owned() });
    }
    let Some(lhs) = resolver.nonterminal(parts[0]) else {
        return Err(LoadError::LeftHandSide {
            symbol: parts[0].to_owned(),
            line: line.to_owned(),
        });
    };
    if parts[1] != ARROW {
        return Err(LoadError::MissingArrow { line: line.to_owned() });
    }

    let mut rhs = Vec::with_capacity(parts.len() - 2);
    for &part in &parts[2..] {
        if let Some(nonterminal) = resolver.nonterminal(part) {
            rhs.push(Symbol::Nonterminal(nonterminal));
        } else if let Some(terminal) = resolver.terminal(part) {
            rhs.push(Symbol::Terminal(terminal));
        } else if part == EPSILON {
            if parts.len() != 3 {
                return Err(LoadError::EpsilonNotAlone { line: line.to_owned() });
            }
        } else {
            return Err(LoadError::InvalidSymbol {
                symbol: part.to_owned(),
                line: line.to_owned(),
            });
        }
    }
    Ok(Production::new(lhs, rhs))
}

/// Error messages by numeric code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorMessages {
    messages: FxHashMap<usize, String>,
}

impl ErrorMessages {
    /// Parse `code=message` lines; `:` also separates. Blank lines and lines
    /// starting with `#` or `!` are skipped.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let mut messages = ErrorMessages::default();
        for line in text.lines() {
            let entry = line.trim_start();
            if entry.is_empty() || entry.starts_with('#') || entry.starts_with('!') {
                continue;
            }
            let malformed = || LoadError::MalformedMessage { line: line.to_owned() };
            let split = entry.find(['=', ':']).ok_or_else(malformed)?;
            let code = entry[..split].trim().parse().map_err(|_| malformed())?;
            messages.insert(code, entry[split + 1..].trim());
        }
        Ok(messages)
    }

    pub fn get(&self, code: usize) -> Option<&str> {
        self.messages.get(&code).map(String::as_str)
    }

    pub fn insert(&mut self, code: usize, message: impl Into<String>) {
        self.messages.insert(code, message.into());
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// A table column: which symbol it holds.
enum Column<T, N> {
    Terminal(T, String),
    Nonterminal(N, String),
}

impl<T, N> Column<T, N> {
    fn name(&self) -> &str {
        match self {
            Column::Terminal(_, name) | Column::Nonterminal(_, name) => name,
        }
    }
}

/// Parse a table file over `grammar`.
///
/// Header symbols resolve as terminals first, then as nonterminals.
pub fn load_table<T, N>(
    text: &str,
    grammar: Grammar<T, N>,
    resolver: &impl SymbolResolver<T, N>,
    messages: &ErrorMessages,
) -> Result<ParsingTable<T, N>, LoadError>
where
    T: Clone + Eq + Hash,
    N: Clone + Eq + Hash,
{
    let mut rows = text
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'));
    let header = rows.next().ok_or(LoadError::MissingHeader)?;
    let columns = header_columns(header, resolver)?;

    let mut builder = ParsingTableBuilder::new(grammar);
    for row in rows {
        let mut cells = row.split('\t');
        let label = cells.next().unwrap_or_default().trim();
        let expected = builder.len();
        if label.parse::<usize>().ok() != Some(expected) {
            return Err(LoadError::UnexpectedState {
                expected,
                found: label.to_owned(),
            });
        }

        let mut state = builder.new_state();
        for (index, cell) in cells.enumerate() {
            let cell = cell.trim();
            let Some(column) = columns.get(index) else {
                if cell.is_empty() {
                    continue;
                }
                return Err(LoadError::ExtraCell { row: label.to_owned() });
            };
            if cell.is_empty() {
                continue;
            }
            state = table_cell(state, cell, label, column, messages)?;
        }
        builder.push_state(state);
    }
    let table = builder.build()?;
    debug!(states = table.states().len(), "loaded table");
    Ok(table)
}

fn header_columns<T, N>(header: &str, resolver: &impl SymbolResolver<T, N>) -> Result<Vec<Column<T, N>>, LoadError> {
    let mut cells = header.split('\t');
    if !cells.next().unwrap_or_default().trim().is_empty() {
        return Err(LoadError::MissingHeader);
    }
    cells
        .map(|cell| {
            let name = cell.trim();
            if let Some(terminal) = resolver.terminal(name) {
                Ok(Column::Terminal(terminal, name.to_owned()))
            } else if let Some(nonterminal) = resolver.nonterminal(name) {
                Ok(Column::Nonterminal(nonterminal, name.to_owned()))
            } else {
                Err(LoadError::InvalidColumn { symbol: name.to_owned() })
            }
        })
        .collect()
}

fn table_cell<T, N>(
    state: StateBuilder<T, N>,
    cell: &str,
    row: &str,
    column: &Column<T, N>,
    messages: &ErrorMessages,
) -> Result<StateBuilder<T, N>, LoadError>
where
    T: Clone + Eq + Hash,
    N: Clone + Eq + Hash,
{
    let invalid = || LoadError::InvalidAction {
        action: cell.to_owned(),
        row: row.to_owned(),
        column: column.name().to_owned(),
    };
    match column {
        Column::Nonterminal(nonterminal, _) => {
            let target = cell.parse().map_err(|_| invalid())?;
            Ok(state.goto(nonterminal.clone(), StateId(target)))
        }
        Column::Terminal(terminal, _) => {
            let terminal = terminal.clone();
            if cell == "acc" {
                return Ok(state.accept(terminal));
            }
            let (kind, number) = cell.split_at(cell.chars().next().map_or(0, char::len_utf8));
            let number: usize = number.parse().map_err(|_| invalid())?;
            match kind {
                "s" => Ok(state.shift(terminal, StateId(number))),
                "r" => Ok(state.reduce(terminal, ProductionId(number))),
                "e" => {
                    let message = messages
                        .get(number)
                        .ok_or(LoadError::MissingMessage { code: number })?;
                    Ok(state.error(terminal, message))
                }
                _ => Err(invalid()),
            }
        }
    }
}

/// Load `<name>.grammar`, `<name>.table` and, if present, `<name>.error`
/// from `dir`.
pub fn load_language<T, N>(
    dir: impl AsRef<Path>,
    name: &str,
    resolver: &impl SymbolResolver<T, N>,
) -> Result<ParsingTable<T, N>, LoadError>
where
    T: Clone + Eq + Hash + fmt::Display,
    N: Clone + Eq + Hash + fmt::Display,
{
    let dir = dir.as_ref();
    let grammar = load_grammar(&read(&dir.join(format!("{name}.grammar")))?, resolver)?;
    let messages = match read(&dir.join(format!("{name}.error"))) {
        Ok(text) => ErrorMessages::parse(&text)?,
        Err(LoadError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => ErrorMessages::default(),
        Err(error) => return Err(error),
    };
    let table = load_table(&read(&dir.join(format!("{name}.table")))?, grammar, resolver, &messages)?;
    debug!(
        language = name,
        productions = table.grammar().len(),
        states = table.states().len(),
        messages = messages.len(),
        "loaded language"
    );
    Ok(table)
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })
}
