//! Numeric literals.
//!
//! Accepts decimal, octal (leading `0`) and hexadecimal (`0x`) integers,
//! floating point numbers with an optional leading `.` and an optional
//! exponent, and the `l`, `f` and `d` suffixes (either case).

use super::{MatchResult, Pattern};
use crate::token::TokenValue;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum State {
    #[default]
    Initial,
    /// `[1-9][0-9]*`
    Integral,
    /// A lone leading `.`
    NeedFraction,
    /// A lone leading `0`
    Zero,
    /// Digits after the decimal point, no exponent yet.
    Fraction,
    /// Just read `e`.
    NeedExponent,
    /// Just read the exponent's sign.
    ExponentSign,
    Exponent,
    Octal,
    /// Octal prefix followed by `8` or `9`; only valid if it becomes a float.
    BadOctal,
    /// Just read `0x`.
    NeedHex,
    Hex,
    Suffix,
    Failed,
}

impl State {
    /// The reason reported when the literal cannot continue from this state.
    fn dead_end(self) -> Option<&'static str> {
        match self {
            State::NeedFraction => Some("Floating point number missing decimal value"),
            State::NeedExponent | State::ExponentSign => Some("Malformed floating point literal"),
            State::BadOctal => Some("Invalid octal number. Integer number too large."),
            State::NeedHex => {
                Some("Hexadecimal numbers must contain at least one hexadecimal digit")
            }
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct NumberRecognizer {
    state: State,
    reason: Option<&'static str>,
}

impl NumberRecognizer {
    fn go(&mut self, state: State, result: MatchResult) -> MatchResult {
        self.state = state;
        result
    }

    fn fail(&mut self) -> MatchResult {
        self.reason = self.state.dead_end();
        self.state = State::Failed;
        MatchResult::NotAMatch
    }

    fn step(&mut self, c: char) -> MatchResult {
        use MatchResult::{Match, PartialMatch};

        let lower = c.to_ascii_lowercase();
        match (self.state, lower) {
            (State::Initial, '1'..='9') => self.go(State::Integral, Match),
            (State::Initial, '0') => self.go(State::Zero, Match),
            (State::Initial, '.') => self.go(State::NeedFraction, PartialMatch),

            (State::Integral, '0'..='9') => Match,
            (State::Integral, '.') => self.go(State::Fraction, Match),
            (State::Integral | State::Fraction, 'e') => self.go(State::NeedExponent, PartialMatch),
            (State::Integral | State::Zero | State::Octal, 'd' | 'f' | 'l') => {
                self.go(State::Suffix, Match)
            }

            (State::NeedFraction, '0'..='9') => self.go(State::Fraction, Match),

            (State::Fraction | State::Exponent, '0'..='9') => Match,
            (State::Fraction | State::Exponent | State::BadOctal, 'd' | 'f') => {
                self.go(State::Suffix, Match)
            }

            (State::NeedExponent, '0'..='9') | (State::ExponentSign, '0'..='9') => {
                self.go(State::Exponent, Match)
            }
            (State::NeedExponent, '-' | '+') => self.go(State::ExponentSign, PartialMatch),

            (State::Zero | State::Octal | State::BadOctal, '.') => self.go(State::Fraction, Match),
            (State::Zero | State::Octal | State::BadOctal, 'e') => {
                self.go(State::NeedExponent, PartialMatch)
            }
            (State::Zero, 'x') => self.go(State::NeedHex, PartialMatch),
            (State::Zero | State::Octal, '0'..='7') => self.go(State::Octal, Match),
            (State::Zero | State::Octal | State::BadOctal, '8' | '9') => {
                self.go(State::BadOctal, PartialMatch)
            }
            (State::BadOctal, '0'..='7') => PartialMatch,

            (State::NeedHex | State::Hex, _) if c.is_ascii_hexdigit() => self.go(State::Hex, Match),
            (State::Hex, 'l') => self.go(State::Suffix, Match),

            _ => self.fail(),
        }
    }
}

impl Pattern for NumberRecognizer {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn test(&mut self, c: Option<char>) -> MatchResult {
        match c {
            _ if self.state == State::Failed => MatchResult::NotAMatch,
            Some(c) => self.step(c),
            None => self.fail(),
        }
    }

    fn failure_reason(&self) -> Option<&str> {
        self.reason
    }

    /// Classifies `text` on its own, since the recognizer's state may have
    /// moved past the winning prefix.
    fn value(&self, text: &str) -> Option<TokenValue> {
        parse_number(text)
    }
}

fn parse_number(text: &str) -> Option<TokenValue> {
    let suffix = text.chars().last()?.to_ascii_lowercase();
    let body = &text[..text.len() - 1];

    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return if suffix == 'l' {
            i64::from_str_radix(&hex[..hex.len() - 1], 16).ok().map(TokenValue::Long)
        } else {
            parse_int(hex, 16)
        };
    }
    match suffix {
        'l' => {
            let (digits, radix) = split_radix(body);
            i64::from_str_radix(digits, radix).ok().map(TokenValue::Long)
        }
        'f' => body.parse().ok().map(TokenValue::Float),
        'd' => body.parse().ok().map(TokenValue::Double),
        _ if text.contains(['.', 'e', 'E']) => text.parse().ok().map(TokenValue::Double),
        _ => {
            let (digits, radix) = split_radix(text);
            parse_int(digits, radix)
        }
    }
}

/// A leading `0` on a multi-digit integer means octal.
fn split_radix(digits: &str) -> (&str, u32) {
    match digits.strip_prefix('0') {
        Some(rest) if !rest.is_empty() => (rest, 8),
        _ => (digits, 10),
    }
}

/// Integers too large for `Int` widen to `Long`.
fn parse_int(digits: &str, radix: u32) -> Option<TokenValue> {
    i32::from_str_radix(digits, radix)
        .map(TokenValue::Int)
        .or_else(|_| i64::from_str_radix(digits, radix).map(TokenValue::Long))
        .ok()
}
