//! Longest-match tokenizer.
//!
//! Every scan races all recognizers over the input one character at a time.
//! The recognizer that confirmed a match at the greatest length wins; at equal
//! length the one registered first wins, which is how keywords beat
//! identifiers. Characters read past the winning match go back onto a
//! pushback stack and start the next scan.

use std::fmt;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::error::LexError;
use crate::recognizer::{MatchResult, Recognize, Recognizer, ScanContext};
use crate::source::CharSource;
use crate::token::Token;

/// Tokenizer over a single input.
///
/// Holds its own recognizer state, pushback stack and one-token peek cache,
/// so it must not be shared between inputs.
pub struct Tokenizer<'a, K> {
    recognizers: Vec<Recognizer<K>>,
    end_of_input: K,
    source: CharSource<'a>,
    /// Characters to re-read, next one on top.
    pushback: Vec<char>,
    peeked: Option<Token<K>>,
    finished: bool,
}

impl<'a, K: Clone + fmt::Debug> Tokenizer<'a, K> {
    pub fn new(recognizers: Vec<Recognizer<K>>, end_of_input: K, source: CharSource<'a>) -> Self {
        Tokenizer {
            recognizers,
            end_of_input,
            source,
            pushback: Vec::new(),
            peeked: None,
            finished: false,
        }
    }

    /// Consume the next token, or the one a previous peek cached.
    pub fn next_token(&mut self, context: &ScanContext) -> Result<Token<K>, LexError> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.scan(context),
        }
    }

    /// Look at the next token without consuming it.
    ///
    /// Repeated peeks return the cached token without scanning again.
    pub fn peek_token(&mut self, context: &ScanContext) -> Result<&Token<K>, LexError> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.scan(context)?,
        };
        Ok(self.peeked.insert(token))
    }

    fn next_char(&mut self) -> Result<Option<char>, LexError> {
        if let Some(c) = self.pushback.pop() {
            return Ok(Some(c));
        }
        Ok(self.source.read()?)
    }

    fn scan(&mut self, context: &ScanContext) -> Result<Token<K>, LexError> {
        loop {
            for recognizer in &mut self.recognizers {
                recognizer.reset();
            }
            let mut candidates: SmallVec<[usize; 16]> = (0..self.recognizers.len()).collect();
            let mut read: SmallVec<[char; 32]> = SmallVec::new();
            // (recognizer, matched length)
            let mut best: Option<(usize, usize)> = None;
            // (recognizer, reported a hard failure)
            let mut explanation: Option<(usize, bool)> = None;

            loop {
                let c = self.next_char()?;
                if c.is_none() && read.is_empty() {
                    trace!("end of input");
                    return Ok(Token::end_of_input(self.end_of_input.clone()));
                }
                read.extend(c);
                let len = read.len();
                let recognizers = &mut self.recognizers;
                candidates.retain(|&mut index| match recognizers[index].test(c, context) {
                    MatchResult::NotAMatch => false,
                    MatchResult::Failure => {
                        explanation = Some((index, true));
                        false
                    }
                    MatchResult::PartialMatch => {
                        explanation = Some((index, false));
                        true
                    }
                    MatchResult::Match => {
                        if best.map_or(true, |(_, best_len)| len > best_len) {
                            best = Some((index, len));
                        }
                        true
                    }
                });
                if candidates.is_empty() || c.is_none() {
                    break;
                }
            }

            let matched = best.map_or(0, |(_, len)| len);
            self.pushback.extend(read[matched..].iter().rev());

            let Some((winner, len)) = best else {
                return Err(self.unrecognized(&read, explanation));
            };
            let text: String = read[..len].iter().collect();
            let recognizer = &self.recognizers[winner];
            match recognizer.token(&text) {
                Some(token) if !recognizer.is_ignored() => {
                    trace!(kind = ?token.kind, text = %text, "token");
                    return Ok(token);
                }
                _ => trace!(text = %text, "skipped ignored match"),
            }
        }
    }

    /// Build the error for a scan nobody matched and drop the offending input.
    ///
    /// A hard failure owns everything it consumed, so all of it is dropped;
    /// otherwise only the first character is, and the rest is scanned again.
    fn unrecognized(&mut self, read: &[char], explanation: Option<(usize, bool)>) -> LexError {
        let text: String = read.iter().collect();
        let (reason, hard) = match explanation {
            Some((index, hard)) => (
                self.recognizers[index].failure_reason().map(str::to_owned),
                hard,
            ),
            None => (None, false),
        };
        let discard = if hard { read.len() } else { read.len().min(1) };
        self.pushback.truncate(self.pushback.len().saturating_sub(discard));
        debug!(text = %text, reason = ?reason, discarded = discard, "unrecognized character sequence");
        LexError::Unrecognized { text, reason }
    }
}

impl<K: Clone + fmt::Debug> Iterator for Tokenizer<'_, K> {
    type Item = Result<Token<K>, LexError>;

    /// Yields tokens up to and including end of input. Unrecognized
    /// sequences are yielded as errors and scanning continues after them;
    /// an I/O error ends the sequence.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token(&ScanContext::default());
        match &result {
            Ok(token) if token.is_end_of_input() => self.finished = true,
            Err(LexError::Io(_)) => self.finished = true,
            _ => {}
        }
        Some(result)
    }
}

impl<K: fmt::Debug> fmt::Debug for Tokenizer<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("recognizers", &self.recognizers)
            .field("end_of_input", &self.end_of_input)
            .field("pushback", &self.pushback)
            .field("peeked", &self.peeked)
            .finish_non_exhaustive()
    }
}

/// Creates a fresh tokenizer for every input.
pub trait TokenizerFactory<K> {
    fn tokenizer<'a>(&self, source: CharSource<'a>) -> Tokenizer<'a, K>;
}

/// Ordered recognizer prototypes plus the end-of-input kind.
///
/// Registration order is tie-break priority. Unless disabled, a whitespace
/// recognizer is appended after everything registered.
#[derive(Clone, Debug)]
pub struct TokenizerBuilder<K> {
    recognizers: Vec<Recognizer<K>>,
    end_of_input: K,
    whitespace: bool,
}

impl<K: Clone + fmt::Debug> TokenizerBuilder<K> {
    pub fn new(end_of_input: K) -> Self {
        TokenizerBuilder {
            recognizers: Vec::new(),
            end_of_input,
            whitespace: true,
        }
    }

    #[must_use]
    pub fn recognize(mut self, recognizer: Recognizer<K>) -> Self {
        self.recognizers.push(recognizer);
        self
    }

    /// Do not append the implicit whitespace recognizer.
    #[must_use]
    pub fn without_whitespace(mut self) -> Self {
        self.whitespace = false;
        self
    }

    pub fn recognizers(&self) -> &[Recognizer<K>] {
        &self.recognizers
    }

    pub fn end_of_input(&self) -> &K {
        &self.end_of_input
    }

    pub fn build<'a>(&self, source: impl Into<CharSource<'a>>) -> Tokenizer<'a, K> {
        let mut recognizers = self.recognizers.clone();
        if self.whitespace {
            recognizers.push(Recognizer::whitespace());
        }
        Tokenizer::new(recognizers, self.end_of_input.clone(), source.into())
    }
}

impl<K: Clone + fmt::Debug> TokenizerFactory<K> for TokenizerBuilder<K> {
    fn tokenizer<'a>(&self, source: CharSource<'a>) -> Tokenizer<'a, K> {
        self.build(source)
    }
}
