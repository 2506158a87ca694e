use super::*;
use crate::recognizer::tests::feed;
use pretty_assertions::assert_eq;

use MatchResult::{Match, NotAMatch};

#[test]
fn matches_until_first_visible_char() {
    let mut ws = WhitespaceRecognizer::default();
    assert_eq!(
        feed(&mut ws, " \t\n \t\nx"),
        [Match, Match, Match, Match, Match, Match, NotAMatch]
    );
    assert_eq!(feed(&mut ws, "x "), [NotAMatch, NotAMatch]);
}
