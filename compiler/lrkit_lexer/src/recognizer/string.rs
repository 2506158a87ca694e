//! Delimited string literals with backslash-style escapes.

use super::{MatchResult, Pattern};
use crate::token::TokenValue;

/// Characters that may follow the escape character by default.
pub(crate) const DEFAULT_ESCAPES: &[char] = &['n', '"', '\'', 't', '\\', 'r'];

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum State {
    #[default]
    Initial,
    Body,
    Escape,
    Done,
}

#[derive(Clone, Debug)]
pub struct StringRecognizer {
    delimiter: char,
    escape: char,
    escapes: Vec<char>,
    state: State,
    reason: Option<&'static str>,
}

impl Default for StringRecognizer {
    fn default() -> Self {
        StringRecognizer {
            delimiter: '"',
            escape: '\\',
            escapes: DEFAULT_ESCAPES.to_vec(),
            state: State::Initial,
            reason: None,
        }
    }
}

impl StringRecognizer {
    #[must_use]
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn escape(mut self, escape: char) -> Self {
        self.escape = escape;
        self
    }

    /// Replace the set of characters allowed after the escape character.
    #[must_use]
    pub fn escapes(mut self, escapes: &[char]) -> Self {
        self.escapes = escapes.to_vec();
        self
    }

    fn fail(&mut self, reason: Option<&'static str>) -> MatchResult {
        self.reason = reason;
        self.state = State::Done;
        MatchResult::NotAMatch
    }
}

impl Pattern for StringRecognizer {
    fn reset(&mut self) {
        self.state = State::Initial;
        self.reason = None;
    }

    fn test(&mut self, c: Option<char>) -> MatchResult {
        match (self.state, c) {
            (State::Initial, Some(c)) if c == self.delimiter => {
                self.state = State::Body;
                MatchResult::PartialMatch
            }
            (State::Body, Some(c)) if c == self.delimiter => {
                self.state = State::Done;
                MatchResult::Match
            }
            (State::Body, Some(c)) if c == self.escape => {
                self.state = State::Escape;
                MatchResult::PartialMatch
            }
            (State::Body, None | Some('\n')) => {
                self.fail(Some("Unterminated string literal"));
                MatchResult::Failure
            }
            (State::Body, Some(_)) => MatchResult::PartialMatch,
            (State::Escape, Some(c)) if self.escapes.contains(&c) => {
                self.state = State::Body;
                MatchResult::PartialMatch
            }
            (State::Escape, _) => {
                self.fail(Some("Not a valid escape sequence"));
                MatchResult::Failure
            }
            (State::Initial | State::Done, _) => self.fail(self.reason),
        }
    }

    fn failure_reason(&self) -> Option<&str> {
        self.reason
    }

    fn value(&self, text: &str) -> Option<TokenValue> {
        let mut chars = text.chars();
        chars.next();
        chars.next_back();
        Some(TokenValue::Text(unescape(chars.as_str(), self.escape)))
    }
}

/// Resolve escape sequences in a literal body.
pub(crate) fn unescape(body: &str, escape: char) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != escape {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push(c),
        }
    }
    out
}
