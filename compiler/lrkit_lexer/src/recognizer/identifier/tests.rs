use super::*;
use crate::recognizer::tests::feed;
use pretty_assertions::assert_eq;

use MatchResult::{Match, NotAMatch};

#[test]
fn accepts_letters_digits_underscore_and_dollar() {
    let mut id = IdentifierRecognizer::default();
    assert_eq!(feed(&mut id, "_a$1"), [Match, Match, Match, Match]);
    assert_eq!(feed(&mut id, "café"), [Match, Match, Match, Match]);
}

#[test]
fn rejects_leading_digit_for_good() {
    let mut id = IdentifierRecognizer::default();
    assert_eq!(feed(&mut id, "1ab"), [NotAMatch, NotAMatch, NotAMatch]);
}

#[test]
fn stops_at_first_separator() {
    let mut id = IdentifierRecognizer::default();
    assert_eq!(feed(&mut id, "ab cd"), [Match, Match, NotAMatch, NotAMatch, NotAMatch]);
    assert_eq!(id.test(None), NotAMatch);
}

#[test]
fn value_is_the_text() {
    let id = IdentifierRecognizer::default();
    assert_eq!(id.value("ifa"), Some(TokenValue::Text("ifa".into())));
}
