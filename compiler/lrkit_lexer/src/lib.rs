//! Longest-match tokenizer for lrkit.
//!
//! A [`Tokenizer`] races an ordered set of [`Recognizer`]s over a character
//! stream, one character at a time. The recognizer that confirms the longest
//! match wins; ties go to the recognizer registered first, which is how a
//! keyword registered before the identifier pattern claims its own text.
//!
//! # Architecture
//!
//! - [`CharSource`]: characters from a string or any `io::Read`
//! - [`Recognizer`]: closed set of pattern automata (plus a custom escape hatch)
//! - [`Tokenizer`]: the scanning engine with pushback and one-token peek
//! - [`TokenizerBuilder`]: ordered recognizer prototypes, the tokenizer factory
//!
//! Recognizers whose matches are ignored (whitespace, comments) are consumed
//! silently; every other match becomes a [`Token`].

mod error;
mod recognizer;
mod source;
mod token;
mod tokenizer;

pub use error::LexError;
pub use recognizer::{
    BlockCommentRecognizer, BooleanRecognizer, CharRecognizer, IdentifierRecognizer,
    LineCommentRecognizer, MatchResult, NumberRecognizer, Recognize, Recognizer, ScanContext,
    StringRecognizer, SymbolRecognizer, WhitespaceRecognizer,
};
pub use source::CharSource;
pub use token::{Token, TokenValue};
pub use tokenizer::{Tokenizer, TokenizerBuilder, TokenizerFactory};
