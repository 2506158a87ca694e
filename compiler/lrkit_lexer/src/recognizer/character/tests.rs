use super::*;
use crate::recognizer::tests::feed;
use pretty_assertions::assert_eq;

use MatchResult::{Match, NotAMatch, PartialMatch};

fn reason_for(input: &str, end_of_input: bool) -> Option<String> {
    let mut c = CharRecognizer::default();
    feed(&mut c, input);
    if end_of_input {
        c.test(None);
    }
    c.failure_reason().map(str::to_owned)
}

#[test]
fn plain_and_escaped_characters() {
    let mut c = CharRecognizer::default();
    assert_eq!(feed(&mut c, "'c'"), [PartialMatch, PartialMatch, Match]);
    assert_eq!(
        feed(&mut c, r"'\n'"),
        [PartialMatch, PartialMatch, PartialMatch, Match]
    );
    assert_eq!(feed(&mut c, "'c'x"), [PartialMatch, PartialMatch, Match, NotAMatch]);
}

#[test]
fn failure_reasons() {
    assert_eq!(reason_for("''", false).as_deref(), Some("Empty character literal is not valid"));
    assert_eq!(reason_for("'a\n", false).as_deref(), Some("Unterminated character literal"));
    assert_eq!(reason_for("'a", true).as_deref(), Some("Unterminated character literal"));
    assert_eq!(reason_for("'", true).as_deref(), Some("Unterminated character literal"));
    assert_eq!(
        reason_for("'ab'", false).as_deref(),
        Some("Only one character must be specified in a character literal")
    );
    assert_eq!(reason_for(r"'\q'", false).as_deref(), Some("Not a valid escape sequence"));
    assert_eq!(reason_for("x", false), None);
}

#[test]
fn values() {
    let c = CharRecognizer::default();
    assert_eq!(c.value("'c'"), Some(TokenValue::Char('c')));
    assert_eq!(c.value(r"'\t'"), Some(TokenValue::Char('\t')));
    assert_eq!(c.value(r"'\''"), Some(TokenValue::Char('\'')));
}
