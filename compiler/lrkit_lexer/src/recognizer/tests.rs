use super::*;
use pretty_assertions::assert_eq;

/// Reset `pattern` and feed it every char of `input`.
pub(crate) fn feed(pattern: &mut impl Pattern, input: &str) -> Vec<MatchResult> {
    pattern.reset();
    input.chars().map(|c| pattern.test(Some(c))).collect()
}

fn run(recognizer: &mut Recognizer<&'static str>, input: &str, context: &ScanContext) -> Vec<MatchResult> {
    recognizer.reset();
    input.chars().map(|c| recognizer.test(Some(c), context)).collect()
}

#[test]
fn builtin_tokens_carry_kind_and_value() {
    let number = Recognizer::number("num");
    assert_eq!(
        number.token("20l"),
        Some(Token::new("num", "20l", Some(TokenValue::Long(20))))
    );
    let symbol = Recognizer::symbol("==", "eq");
    assert_eq!(
        symbol.token("=="),
        Some(Token::new("eq", "==", Some(TokenValue::Text("==".into()))))
    );
}

#[test]
fn comments_and_whitespace_are_ignored() {
    let ignored: [Recognizer<&str>; 3] = [
        Recognizer::whitespace(),
        Recognizer::line_comment(),
        Recognizer::block_comment(),
    ];
    for recognizer in &ignored {
        assert!(recognizer.is_ignored(), "{recognizer:?}");
        assert_eq!(recognizer.token(" "), None);
    }
    assert!(!Recognizer::identifier("id").is_ignored());
    assert!(Recognizer::<&str>::whitespace().when(|_| true).is_ignored());
}

#[test]
fn conditional_recognizer_follows_context() {
    let mut only_in_state_3 = Recognizer::identifier("id").when(|cx| cx.state == Some(3));
    assert_eq!(
        run(&mut only_in_state_3, "ab", &ScanContext::in_state(3)),
        [MatchResult::Match, MatchResult::Match]
    );
    assert_eq!(
        run(&mut only_in_state_3, "ab", &ScanContext::default()),
        [MatchResult::NotAMatch, MatchResult::NotAMatch]
    );
}

#[test]
fn transforming_recognizer_maps_values() {
    let upper = Recognizer::identifier("id").map_value(|value| {
        value.and_then(|v| v.as_text().map(|t| TokenValue::Text(t.to_uppercase())))
    });
    let token = upper.token("abc").unwrap();
    assert_eq!(token.text(), "abc");
    assert_eq!(token.value_text(), Some("ABC"));
}

#[test]
fn failure_reason_passes_through_wrappers() {
    let mut string = Recognizer::string("str").when(|_| true);
    run(&mut string, "\"ab\n", &ScanContext::default());
    assert_eq!(string.failure_reason(), Some("Unterminated string literal"));
}

/// Matches any run of `x`.
#[derive(Default)]
struct Xs {
    len: usize,
    failed: bool,
}

impl Recognize<&'static str> for Xs {
    fn reset(&mut self) {
        *self = Xs::default();
    }

    fn test(&mut self, c: Option<char>, _: &ScanContext) -> MatchResult {
        if !self.failed && c == Some('x') {
            self.len += 1;
            MatchResult::Match
        } else {
            self.failed = true;
            MatchResult::NotAMatch
        }
    }

    fn token(&self, text: &str) -> Option<Token<&'static str>> {
        Some(Token::new("xs", text, Some(TokenValue::Int(i32::try_from(self.len).unwrap()))))
    }
}

#[test]
fn custom_recognizer_clones_get_fresh_state() {
    let mut prototype = Recognizer::custom(Xs::default);
    run(&mut prototype, "xx", &ScanContext::default());

    let fresh = prototype.clone();
    assert_eq!(fresh.token("").unwrap().value, Some(TokenValue::Int(0)));
    assert_eq!(prototype.token("xx").unwrap().value, Some(TokenValue::Int(2)));
}

#[test]
fn debug_names_the_variant() {
    let wrapped = Recognizer::symbol("if", "IF").when(|_| true);
    let debug = format!("{wrapped:?}");
    assert!(debug.starts_with("Conditional"), "{debug}");
    assert!(debug.contains("Symbol"), "{debug}");
}
