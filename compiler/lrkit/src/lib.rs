//! lrkit: LR languages defined by files on disk.
//!
//! A language directory holds `<name>.grammar`, `<name>.table` and an
//! optional `<name>.error` (see [`lrkit_parse::loader`]). Symbols are plain
//! strings: names starting with an uppercase letter are nonterminals, `''`
//! marks an epsilon production and `$` is end of input. The tokenizer is
//! derived from the terminals the table uses.
//!
//! # Tracing
//!
//! - `LRKIT_LOG=lrkit_parse=trace`: every action and reduction
//! - `LRKIT_LOG=lrkit_lexer=debug`: unrecognized input
//!
//! `RUST_LOG` is read when `LRKIT_LOG` is unset.

use std::sync::Once;

pub mod commands;
mod language;

pub use language::{tokenizer_for, DynamicSymbols, Language, ParseReport, SyntaxTree, END_OF_INPUT};

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical tracing subscriber if `LRKIT_LOG` or `RUST_LOG`
/// is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        let Ok(filter) = EnvFilter::try_from_env("LRKIT_LOG").or_else(|_| EnvFilter::try_from_default_env())
        else {
            return;
        };
        tracing_subscriber::registry()
            .with(HierarchicalLayer::new(2).with_targets(true))
            .with(filter)
            .init();
    });
}
