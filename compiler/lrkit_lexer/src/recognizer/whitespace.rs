//! Runs of Unicode whitespace. Always ignored.

use super::{MatchResult, Pattern};

#[derive(Clone, Debug, Default)]
pub struct WhitespaceRecognizer {
    failed: bool,
}

impl Pattern for WhitespaceRecognizer {
    fn reset(&mut self) {
        self.failed = false;
    }

    fn test(&mut self, c: Option<char>) -> MatchResult {
        match c {
            Some(c) if !self.failed && c.is_whitespace() => MatchResult::Match,
            _ => {
                self.failed = true;
                MatchResult::NotAMatch
            }
        }
    }
}

#[cfg(test)]
mod tests;
