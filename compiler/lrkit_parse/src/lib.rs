//! LR parse engine for lrkit.
//!
//! The engine drives a shift/reduce/goto automaton supplied as a
//! [`ParsingTable`]. Tables are built ahead of time, either programmatically
//! through [`ParsingTableBuilder`] or from text with the [`loader`] functions;
//! this crate does not compute LR tables from a grammar.
//!
//! # Architecture
//!
//! - [`Grammar`]: ordered productions, addressable by index or display string
//! - [`ParsingTable`]: one [`State`] per row, each mapping terminals to
//!   [`Action`]s and nonterminals to goto targets
//! - [`Parser`]: binds a table to a tokenizer factory and runs invocations
//! - [`ReduceListener`]: user semantic actions, typically a [`Listeners`] set
//!
//! A parse halts at the first syntax or semantic error. Such errors are
//! diagnostics in the [`ParseResult`], not Rust errors; only tokenizer
//! failures abort [`Parser::parse`] with `Err`.

mod engine;
mod grammar;
mod listener;
pub mod loader;
mod symbol;
mod table;

pub use engine::{ParseResult, Parser};
pub use grammar::{Grammar, GrammarError, Production, ProductionId};
pub use listener::{Listeners, ListenersBuilder, ReduceError, ReduceListener, StackValue};
pub use loader::{load_grammar, load_language, load_table, ErrorMessages, LoadError, SymbolResolver};
pub use symbol::Symbol;
pub use table::{Action, DEFAULT_SYNTAX_ERROR, ParsingTable, ParsingTableBuilder, State, StateBuilder, StateId, TableError};
