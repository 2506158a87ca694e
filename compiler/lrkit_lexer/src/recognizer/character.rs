//! Single-quoted character literals.

use super::string::{unescape, DEFAULT_ESCAPES};
use super::{MatchResult, Pattern};
use crate::token::TokenValue;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum State {
    #[default]
    Initial,
    Char,
    Escape,
    Close,
    Done,
}

#[derive(Clone, Debug, Default)]
pub struct CharRecognizer {
    state: State,
    reason: Option<&'static str>,
}

const DELIMITER: char = '\'';
const ESCAPE: char = '\\';

impl CharRecognizer {
    fn fail(&mut self, reason: Option<&'static str>) -> MatchResult {
        self.reason = reason;
        self.state = State::Done;
        MatchResult::NotAMatch
    }
}

impl Pattern for CharRecognizer {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn test(&mut self, c: Option<char>) -> MatchResult {
        match (self.state, c) {
            (State::Initial, Some(DELIMITER)) => {
                self.state = State::Char;
                MatchResult::PartialMatch
            }
            (State::Char, Some(DELIMITER)) => self.fail(Some("Empty character literal is not valid")),
            (State::Char, Some(ESCAPE)) => {
                self.state = State::Escape;
                MatchResult::PartialMatch
            }
            (State::Char | State::Close, None | Some('\n')) => {
                self.fail(Some("Unterminated character literal"))
            }
            (State::Char, Some(_)) => {
                self.state = State::Close;
                MatchResult::PartialMatch
            }
            (State::Escape, Some(c)) if DEFAULT_ESCAPES.contains(&c) => {
                self.state = State::Close;
                MatchResult::PartialMatch
            }
            (State::Escape, _) => self.fail(Some("Not a valid escape sequence")),
            (State::Close, Some(DELIMITER)) => {
                self.state = State::Done;
                MatchResult::Match
            }
            (State::Close, Some(_)) => {
                self.fail(Some("Only one character must be specified in a character literal"))
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
        unescape(chars.as_str(), ESCAPE).chars().next().map(TokenValue::Char)
    }
}

#[cfg(test)]
mod tests;
