//! Identifiers: a letter, `_` or `$`, followed by letters, digits, `_` or `$`.

use super::{MatchResult, Pattern};
use crate::token::TokenValue;

#[derive(Clone, Debug, Default)]
pub struct IdentifierRecognizer {
    len: usize,
    failed: bool,
}

fn is_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

impl Pattern for IdentifierRecognizer {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn test(&mut self, c: Option<char>) -> MatchResult {
        if self.failed {
            return MatchResult::NotAMatch;
        }
        let accepted = match c {
            Some(c) if self.len == 0 => is_start(c),
            Some(c) => is_part(c),
            None => false,
        };
        if accepted {
            self.len += 1;
            MatchResult::Match
        } else {
            self.failed = true;
            MatchResult::NotAMatch
        }
    }

    fn value(&self, text: &str) -> Option<TokenValue> {
        Some(TokenValue::Text(text.to_owned()))
    }
}

#[cfg(test)]
mod tests;
