//! Pattern recognizers raced by the tokenizer.
//!
//! A recognizer is a small state machine that is reset before every scan and
//! then fed one character at a time. It answers with a [`MatchResult`]; once it
//! has answered `NotAMatch` or `Failure` it keeps answering `NotAMatch` until
//! the next reset. End of input is fed exactly once, as `None`.
//!
//! [`Recognizer`] is the closed set of recognizers the tokenizer knows about.
//! User-defined recognizers plug in through the [`Recognize`] trait and the
//! [`Recognizer::custom`] variant.

mod boolean;
mod character;
mod comment;
mod identifier;
mod number;
mod string;
mod symbol;
mod whitespace;

pub use boolean::BooleanRecognizer;
pub use character::CharRecognizer;
pub use comment::{BlockCommentRecognizer, LineCommentRecognizer};
pub use identifier::IdentifierRecognizer;
pub use number::NumberRecognizer;
pub use string::StringRecognizer;
pub use symbol::SymbolRecognizer;
pub use whitespace::WhitespaceRecognizer;

use std::fmt;
use std::sync::Arc;

use crate::token::{Token, TokenValue};

/// Outcome of feeding one character to a recognizer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MatchResult {
    /// The input read so far cannot be (a prefix of) this pattern.
    NotAMatch,
    /// Consistent with the pattern, but more input is needed.
    PartialMatch,
    /// The pattern is satisfied at this length. Longer input may still match.
    Match,
    /// The pattern detected an unrecoverable input error.
    Failure,
}

/// Syntactic position handed to recognizers on every character.
///
/// The parse engine fills in its current automaton state so context-sensitive
/// recognizers (see [`Recognizer::when`]) can switch themselves on or off.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScanContext {
    pub state: Option<usize>,
}

impl ScanContext {
    /// Context for a scan requested from automaton state `state`.
    pub fn in_state(state: usize) -> Self {
        ScanContext { state: Some(state) }
    }
}

/// The recognizer contract.
pub trait Recognize<K> {
    /// Clear all per-scan state.
    fn reset(&mut self);

    /// Advance by one character (`None` is end of input).
    fn test(&mut self, c: Option<char>, context: &ScanContext) -> MatchResult;

    /// Whether a winning match is discarded instead of surfaced as a token.
    fn is_ignored(&self) -> bool {
        false
    }

    /// Why the current scan failed, when this recognizer knows.
    fn failure_reason(&self) -> Option<&str> {
        None
    }

    /// Build the token for `text` once this recognizer has won a scan.
    ///
    /// Ignored recognizers return `None`.
    fn token(&self, text: &str) -> Option<Token<K>>;
}

/// Token-kind-agnostic half of the built-in recognizers.
pub(crate) trait Pattern {
    fn reset(&mut self);

    fn test(&mut self, c: Option<char>) -> MatchResult;

    fn failure_reason(&self) -> Option<&str> {
        None
    }

    fn value(&self, _text: &str) -> Option<TokenValue> {
        None
    }
}

type Predicate = Arc<dyn Fn(&ScanContext) -> bool + Send + Sync>;
type ValueMap = Arc<dyn Fn(Option<TokenValue>) -> Option<TokenValue> + Send + Sync>;
type Factory<K> = Arc<dyn Fn() -> Box<dyn Recognize<K> + Send + Sync> + Send + Sync>;

/// Every kind of recognizer the tokenizer can race.
pub enum Recognizer<K> {
    Identifier(K, IdentifierRecognizer),
    Number(K, NumberRecognizer),
    String(K, StringRecognizer),
    Char(K, CharRecognizer),
    Boolean(K, BooleanRecognizer),
    /// Fixed character sequence: operators, punctuation and keywords.
    Symbol(K, SymbolRecognizer),
    LineComment(LineCommentRecognizer),
    BlockComment(BlockCommentRecognizer),
    Whitespace(WhitespaceRecognizer),
    /// Only active while `predicate` holds for the scan context.
    Conditional {
        inner: Box<Recognizer<K>>,
        predicate: Predicate,
    },
    /// Rewrites the value of every token `inner` produces.
    Transforming {
        inner: Box<Recognizer<K>>,
        transform: ValueMap,
    },
    /// User recognizer; `factory` creates fresh state for every clone.
    Custom {
        factory: Factory<K>,
        state: Box<dyn Recognize<K> + Send + Sync>,
    },
}

impl<K> Recognizer<K> {
    pub fn identifier(kind: K) -> Self {
        Recognizer::Identifier(kind, IdentifierRecognizer::default())
    }

    pub fn number(kind: K) -> Self {
        Recognizer::Number(kind, NumberRecognizer::default())
    }

    /// Double-quoted string literal with the default escapes.
    pub fn string(kind: K) -> Self {
        Recognizer::String(kind, StringRecognizer::default())
    }

    /// String literal enclosed by `delimiter` instead of `"`.
    pub fn string_delimited(kind: K, delimiter: char) -> Self {
        Recognizer::String(kind, StringRecognizer::default().delimiter(delimiter))
    }

    pub fn character(kind: K) -> Self {
        Recognizer::Char(kind, CharRecognizer::default())
    }

    pub fn boolean(kind: K) -> Self {
        Recognizer::Boolean(kind, BooleanRecognizer::default())
    }

    pub fn symbol(text: &str, kind: K) -> Self {
        Recognizer::Symbol(kind, SymbolRecognizer::new(text))
    }

    /// `//` comments up to (not including) the end of the line.
    pub fn line_comment() -> Self {
        Recognizer::LineComment(LineCommentRecognizer::default())
    }

    pub fn line_comment_with(start: &str) -> Self {
        Recognizer::LineComment(LineCommentRecognizer::new(start))
    }

    /// `/* ... */` comments.
    pub fn block_comment() -> Self {
        Recognizer::BlockComment(BlockCommentRecognizer::default())
    }

    /// Block comments delimited by `start` and `end`; `end` defaults to
    /// `start` reversed.
    pub fn block_comment_with(start: &str, end: Option<&str>) -> Self {
        Recognizer::BlockComment(BlockCommentRecognizer::new(start, end))
    }

    pub fn whitespace() -> Self {
        Recognizer::Whitespace(WhitespaceRecognizer::default())
    }

    /// Wrap a user recognizer. `factory` is called once per tokenizer so
    /// recognizer state is never shared between inputs.
    pub fn custom<R, F>(make: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
        R: Recognize<K> + Send + Sync + 'static,
    {
        let factory: Factory<K> =
            Arc::new(move || -> Box<dyn Recognize<K> + Send + Sync> { Box::new(make()) });
        let state = factory();
        Recognizer::Custom { factory, state }
    }

    /// Enable this recognizer only when `predicate` holds.
    #[must_use]
    pub fn when(self, predicate: impl Fn(&ScanContext) -> bool + Send + Sync + 'static) -> Self {
        Recognizer::Conditional {
            inner: Box::new(self),
            predicate: Arc::new(predicate),
        }
    }

    /// Map the value of every token this recognizer produces.
    #[must_use]
    pub fn map_value(
        self,
        transform: impl Fn(Option<TokenValue>) -> Option<TokenValue> + Send + Sync + 'static,
    ) -> Self {
        Recognizer::Transforming {
            inner: Box::new(self),
            transform: Arc::new(transform),
        }
    }

    fn kind(&self) -> Option<&K> {
        match self {
            Recognizer::Identifier(kind, _)
            | Recognizer::Number(kind, _)
            | Recognizer::String(kind, _)
            | Recognizer::Char(kind, _)
            | Recognizer::Boolean(kind, _)
            | Recognizer::Symbol(kind, _) => Some(kind),
            Recognizer::LineComment(_)
            | Recognizer::BlockComment(_)
            | Recognizer::Whitespace(_)
            | Recognizer::Conditional { .. }
            | Recognizer::Transforming { .. }
            | Recognizer::Custom { .. } => None,
        }
    }

    fn pattern(&self) -> Option<&dyn Pattern> {
        match self {
            Recognizer::Identifier(_, p) => Some(p),
            Recognizer::Number(_, p) => Some(p),
            Recognizer::String(_, p) => Some(p),
            Recognizer::Char(_, p) => Some(p),
            Recognizer::Boolean(_, p) => Some(p),
            Recognizer::Symbol(_, p) => Some(p),
            Recognizer::LineComment(p) => Some(p),
            Recognizer::BlockComment(p) => Some(p),
            Recognizer::Whitespace(p) => Some(p),
            Recognizer::Conditional { .. }
            | Recognizer::Transforming { .. }
            | Recognizer::Custom { .. } => None,
        }
    }

    fn pattern_mut(&mut self) -> Option<&mut dyn Pattern> {
        match self {
            Recognizer::Identifier(_, p) => Some(p),
            Recognizer::Number(_, p) => Some(p),
            Recognizer::String(_, p) => Some(p),
            Recognizer::Char(_, p) => Some(p),
            Recognizer::Boolean(_, p) => Some(p),
            Recognizer::Symbol(_, p) => Some(p),
            Recognizer::LineComment(p) => Some(p),
            Recognizer::BlockComment(p) => Some(p),
            Recognizer::Whitespace(p) => Some(p),
            Recognizer::Conditional { .. }
            | Recognizer::Transforming { .. }
            | Recognizer::Custom { .. } => None,
        }
    }
}

impl<K: Clone> Recognize<K> for Recognizer<K> {
    fn reset(&mut self) {
        match self {
            Recognizer::Conditional { inner, .. } | Recognizer::Transforming { inner, .. } => {
                inner.reset();
            }
            Recognizer::Custom { state, .. } => state.reset(),
            builtin => {
                if let Some(pattern) = builtin.pattern_mut() {
                    pattern.reset();
                }
            }
        }
    }

    fn test(&mut self, c: Option<char>, context: &ScanContext) -> MatchResult {
        match self {
            Recognizer::Conditional { inner, predicate } => {
                if predicate(context) {
                    inner.test(c, context)
                } else {
                    MatchResult::NotAMatch
                }
            }
            Recognizer::Transforming { inner, .. } => inner.test(c, context),
            Recognizer::Custom { state, .. } => state.test(c, context),
            builtin => builtin
                .pattern_mut()
                .map_or(MatchResult::NotAMatch, |pattern| pattern.test(c)),
        }
    }

    fn is_ignored(&self) -> bool {
        match self {
            Recognizer::LineComment(_) | Recognizer::BlockComment(_) | Recognizer::Whitespace(_) => {
                true
            }
            Recognizer::Conditional { inner, .. } | Recognizer::Transforming { inner, .. } => {
                inner.is_ignored()
            }
            Recognizer::Custom { state, .. } => state.is_ignored(),
            Recognizer::Identifier(..)
            | Recognizer::Number(..)
            | Recognizer::String(..)
            | Recognizer::Char(..)
            | Recognizer::Boolean(..)
            | Recognizer::Symbol(..) => false,
        }
    }

    fn failure_reason(&self) -> Option<&str> {
        match self {
            Recognizer::Conditional { inner, .. } | Recognizer::Transforming { inner, .. } => {
                inner.failure_reason()
            }
            Recognizer::Custom { state, .. } => state.failure_reason(),
            builtin => builtin.pattern()?.failure_reason(),
        }
    }

    fn token(&self, text: &str) -> Option<Token<K>> {
        match self {
            Recognizer::Conditional { inner, .. } => inner.token(text),
            Recognizer::Transforming { inner, transform } => {
                let token = inner.token(text)?;
                Some(Token {
                    value: transform(token.value),
                    ..token
                })
            }
            Recognizer::Custom { state, .. } => state.token(text),
            builtin => {
                let kind = builtin.kind()?.clone();
                let value = builtin.pattern()?.value(text);
                Some(Token::new(kind, text, value))
            }
        }
    }
}

impl<K: Clone> Clone for Recognizer<K> {
    fn clone(&self) -> Self {
        match self {
            Recognizer::Identifier(kind, p) => Recognizer::Identifier(kind.clone(), p.clone()),
            Recognizer::Number(kind, p) => Recognizer::Number(kind.clone(), p.clone()),
            Recognizer::String(kind, p) => Recognizer::String(kind.clone(), p.clone()),
            Recognizer::Char(kind, p) => Recognizer::Char(kind.clone(), p.clone()),
            Recognizer::Boolean(kind, p) => Recognizer::Boolean(kind.clone(), p.clone()),
            Recognizer::Symbol(kind, p) => Recognizer::Symbol(kind.clone(), p.clone()),
            Recognizer::LineComment(p) => Recognizer::LineComment(p.clone()),
            Recognizer::BlockComment(p) => Recognizer::BlockComment(p.clone()),
            Recognizer::Whitespace(p) => Recognizer::Whitespace(p.clone()),
            Recognizer::Conditional { inner, predicate } => Recognizer::Conditional {
                inner: inner.clone(),
                predicate: Arc::clone(predicate),
            },
            Recognizer::Transforming { inner, transform } => Recognizer::Transforming {
                inner: inner.clone(),
                transform: Arc::clone(transform),
            },
            Recognizer::Custom { factory, .. } => Recognizer::Custom {
                factory: Arc::clone(factory),
                state: factory(),
            },
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Recognizer<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recognizer::Identifier(kind, _) => f.debug_tuple("Identifier").field(kind).finish(),
            Recognizer::Number(kind, _) => f.debug_tuple("Number").field(kind).finish(),
            Recognizer::String(kind, p) => f.debug_tuple("String").field(kind).field(p).finish(),
            Recognizer::Char(kind, _) => f.debug_tuple("Char").field(kind).finish(),
            Recognizer::Boolean(kind, _) => f.debug_tuple("Boolean").field(kind).finish(),
            Recognizer::Symbol(kind, p) => f.debug_tuple("Symbol").field(kind).field(p).finish(),
            Recognizer::LineComment(p) => f.debug_tuple("LineComment").field(p).finish(),
            Recognizer::BlockComment(p) => f.debug_tuple("BlockComment").field(p).finish(),
            Recognizer::Whitespace(_) => f.write_str("Whitespace"),
            Recognizer::Conditional { inner, .. } => {
                f.debug_struct("Conditional").field("inner", inner).finish_non_exhaustive()
            }
            Recognizer::Transforming { inner, .. } => {
                f.debug_struct("Transforming").field("inner", inner).finish_non_exhaustive()
            }
            Recognizer::Custom { .. } => f.write_str("Custom"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
