//! Fixed character sequences such as operators, punctuation and keywords.

use super::{MatchResult, Pattern};
use crate::token::TokenValue;

#[derive(Clone, Debug)]
pub struct SymbolRecognizer {
    text: Box<str>,
    chars: Box<[char]>,
    index: usize,
    failed: bool,
}

impl SymbolRecognizer {
    pub fn new(text: &str) -> Self {
        SymbolRecognizer {
            text: text.into(),
            chars: text.chars().collect(),
            index: 0,
            failed: false,
        }
    }

    /// The sequence this recognizer matches.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Pattern for SymbolRecognizer {
    fn reset(&mut self) {
        self.index = 0;
        self.failed = false;
    }

    fn test(&mut self, c: Option<char>) -> MatchResult {
        if self.failed {
            return MatchResult::NotAMatch;
        }
        if c.is_none() || self.chars.get(self.index).copied() != c {
            self.failed = true;
            return MatchResult::NotAMatch;
        }
        self.index += 1;
        if self.index < self.chars.len() {
            MatchResult::PartialMatch
        } else {
            MatchResult::Match
        }
    }

    fn value(&self, text: &str) -> Option<TokenValue> {
        Some(TokenValue::Text(text.to_owned()))
    }
}
