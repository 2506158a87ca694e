//! Token and token value types shared by recognizers and the tokenizer.

use std::fmt;

/// Typed value extracted from a token's text by its recognizer.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue {
    /// Raw or unescaped text (identifiers, symbols, string literals).
    Text(String),
    /// Character literal.
    Char(char),
    /// Boolean literal.
    Bool(bool),
    /// Integer literal without suffix.
    Int(i32),
    /// Integer literal with an `l` suffix, or one too large for `Int`.
    Long(i64),
    /// Floating point literal with an `f` suffix.
    Float(f32),
    /// Floating point literal without suffix or with a `d` suffix.
    Double(f64),
}

impl TokenValue {
    /// Returns the text payload, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns an integral payload widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            TokenValue::Int(value) => Some(i64::from(value)),
            TokenValue::Long(value) => Some(value),
            _ => None,
        }
    }

    /// Returns a numeric payload widened to `f64`.
    #[allow(
        clippy::cast_precision_loss,
        reason = "large integers round the way float literals do"
    )]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            TokenValue::Float(value) => Some(f64::from(value)),
            TokenValue::Double(value) => Some(value),
            TokenValue::Int(value) => Some(f64::from(value)),
            TokenValue::Long(value) => Some(value as f64),
            _ => None,
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Text(text) => f.write_str(text),
            TokenValue::Char(c) => write!(f, "{c}"),
            TokenValue::Bool(b) => write!(f, "{b}"),
            TokenValue::Int(v) => write!(f, "{v}"),
            TokenValue::Long(v) => write!(f, "{v}"),
            TokenValue::Float(v) => write!(f, "{v}"),
            TokenValue::Double(v) => write!(f, "{v}"),
        }
    }
}

/// A lexical token.
///
/// `text` is the exact matched character sequence; it is `None` only for the
/// synthetic end-of-input token, which also carries no value.
#[derive(Clone, Debug, PartialEq)]
pub struct Token<K> {
    pub kind: K,
    pub text: Option<String>,
    pub value: Option<TokenValue>,
}

impl<K> Token<K> {
    /// Create a token for matched text.
    pub fn new(kind: K, text: impl Into<String>, value: Option<TokenValue>) -> Self {
        Token {
            kind,
            text: Some(text.into()),
            value,
        }
    }

    /// Create the end-of-input token.
    pub fn end_of_input(kind: K) -> Self {
        Token {
            kind,
            text: None,
            value: None,
        }
    }

    /// Returns `true` if this is the synthetic end-of-input token.
    pub fn is_end_of_input(&self) -> bool {
        self.text.is_none()
    }

    /// The matched text, or `""` for end of input.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// The value's text payload, if any.
    pub fn value_text(&self) -> Option<&str> {
        self.value.as_ref().and_then(TokenValue::as_text)
    }
}

impl<K: fmt::Display> fmt::Display for Token<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.text, &self.value) {
            (None, _) => write!(f, "{}", self.kind),
            (Some(text), None) => write!(f, "{} {text:?}", self.kind),
            (Some(text), Some(value)) => write!(f, "{} {text:?} = {value}", self.kind),
        }
    }
}

#[cfg(test)]
mod tests;
