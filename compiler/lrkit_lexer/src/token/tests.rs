use super::*;
use pretty_assertions::assert_eq;

#[test]
fn end_of_input_has_no_text_or_value() {
    let token = Token::end_of_input("$");
    assert!(token.is_end_of_input());
    assert_eq!(token.text(), "");
    assert_eq!(token.value, None);
    assert_eq!(token.to_string(), "$");
}

#[test]
fn display_includes_text_and_value() {
    let token = Token::new("num", "20l", Some(TokenValue::Long(20)));
    assert_eq!(token.to_string(), "num \"20l\" = 20");

    let comment = Token::new("c", "/**/", None);
    assert_eq!(comment.to_string(), "c \"/**/\"");
}

#[test]
fn numeric_accessors_widen() {
    assert_eq!(TokenValue::Int(7).as_i64(), Some(7));
    assert_eq!(TokenValue::Long(-3).as_i64(), Some(-3));
    assert_eq!(TokenValue::Float(1.5).as_f64(), Some(1.5));
    assert_eq!(TokenValue::Int(2).as_f64(), Some(2.0));
    assert_eq!(TokenValue::Text("x".into()).as_i64(), None);
    assert_eq!(TokenValue::Text("x".into()).as_text(), Some("x"));
}
