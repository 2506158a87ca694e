//! Line and block comments. Both are ignored by the tokenizer.

use super::{MatchResult, Pattern};

const DEFAULT_LINE_START: &str = "//";
const DEFAULT_BLOCK_START: &str = "/*";

/// A comment running from a start sequence to the end of the line.
///
/// The terminating newline is not part of the comment.
#[derive(Clone, Debug)]
pub struct LineCommentRecognizer {
    start: Box<[char]>,
    index: usize,
    state: LineState,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum LineState {
    Start,
    Body,
    Done,
}

impl LineCommentRecognizer {
    /// Comments introduced by `start`; a blank `start` means `//`.
    pub fn new(start: &str) -> Self {
        let start = if start.trim().is_empty() { DEFAULT_LINE_START } else { start };
        LineCommentRecognizer {
            start: start.chars().collect(),
            index: 0,
            state: LineState::Start,
        }
    }
}

impl Default for LineCommentRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_START)
    }
}

impl Pattern for LineCommentRecognizer {
    fn reset(&mut self) {
        self.index = 0;
        self.state = LineState::Start;
    }

    fn test(&mut self, c: Option<char>) -> MatchResult {
        match self.state {
            LineState::Start if c.is_some() && self.start.get(self.index).copied() == c => {
                self.index += 1;
                if self.index < self.start.len() {
                    MatchResult::PartialMatch
                } else {
                    self.state = LineState::Body;
                    MatchResult::Match
                }
            }
            LineState::Body if c.is_some_and(|c| c != '\n') => MatchResult::Match,
            _ => {
                self.state = LineState::Done;
                MatchResult::NotAMatch
            }
        }
    }
}

/// A comment between a start and an end sequence, possibly spanning lines.
#[derive(Clone, Debug)]
pub struct BlockCommentRecognizer {
    start: Box<[char]>,
    end: Box<[char]>,
    index: usize,
    /// Trailing window of the body, compared against `end`.
    window: Vec<char>,
    state: BlockState,
    reason: Option<&'static str>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum BlockState {
    Start,
    Body,
    Done,
}

impl BlockCommentRecognizer {
    /// Comments between `start` and `end`. A blank `start` means `/*`; a
    /// missing or blank `end` is `start` reversed.
    pub fn new(start: &str, end: Option<&str>) -> Self {
        let start = if start.trim().is_empty() { DEFAULT_BLOCK_START } else { start };
        let end: Box<[char]> = match end {
            Some(end) if !end.trim().is_empty() => end.chars().collect(),
            _ => start.chars().rev().collect(),
        };
        BlockCommentRecognizer {
            start: start.chars().collect(),
            window: Vec::with_capacity(end.len()),
            end,
            index: 0,
            state: BlockState::Start,
            reason: None,
        }
    }
}

impl Default for BlockCommentRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_START, None)
    }
}

impl Pattern for BlockCommentRecognizer {
    fn reset(&mut self) {
        self.index = 0;
        self.window.clear();
        self.state = BlockState::Start;
        self.reason = None;
    }

    fn test(&mut self, c: Option<char>) -> MatchResult {
        match (self.state, c) {
            (BlockState::Start, Some(c)) if self.start.get(self.index) == Some(&c) => {
                self.index += 1;
                if self.index == self.start.len() {
                    self.state = BlockState::Body;
                }
                MatchResult::PartialMatch
            }
            (BlockState::Body, None) => {
                self.state = BlockState::Done;
                self.reason = Some("Unclosed comment");
                MatchResult::Failure
            }
            (BlockState::Body, Some(c)) => {
                if self.window.len() == self.end.len() {
                    self.window.remove(0);
                }
                self.window.push(c);
                if *self.window == *self.end {
                    self.state = BlockState::Done;
                    MatchResult::Match
                } else {
                    MatchResult::PartialMatch
                }
            }
            _ => {
                self.state = BlockState::Done;
                MatchResult::NotAMatch
            }
        }
    }

    fn failure_reason(&self) -> Option<&str> {
        self.reason
    }
}
