//! `true` and `false` literals.

use super::{MatchResult, Pattern};
use crate::token::TokenValue;

#[derive(Clone, Debug, Default)]
pub struct BooleanRecognizer {
    candidate: Option<&'static str>,
    index: usize,
    failed: bool,
}

impl Pattern for BooleanRecognizer {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn test(&mut self, c: Option<char>) -> MatchResult {
        if self.failed {
            return MatchResult::NotAMatch;
        }
        let candidate = match (self.candidate, c) {
            (Some(candidate), _) => candidate,
            (None, Some('t')) => "true",
            (None, Some('f')) => "false",
            (None, _) => return self.fail(),
        };
        if c.is_none() || candidate.chars().nth(self.index) != c {
            return self.fail();
        }
        self.candidate = Some(candidate);
        self.index += 1;
        if self.index == candidate.len() {
            MatchResult::Match
        } else {
            MatchResult::PartialMatch
        }
    }

    fn value(&self, text: &str) -> Option<TokenValue> {
        Some(TokenValue::Bool(text == "true"))
    }
}

impl BooleanRecognizer {
    fn fail(&mut self) -> MatchResult {
        self.failed = true;
        MatchResult::NotAMatch
    }
}
