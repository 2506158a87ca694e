use std::cell::RefCell;
use std::fmt;

use lrkit_lexer::{Recognizer, TokenValue, TokenizerBuilder};
use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;

use super::*;
use crate::grammar::Production;
use crate::listener::{Listeners, ReduceError};
use crate::symbol::Symbol;
use crate::table::ParsingTableBuilder;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Term {
    Id,
    Num,
    Assign,
    Eof,
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Term::Id => "id",
            Term::Num => "num",
            Term::Assign => "=",
            Term::Eof => "$",
        })
    }
}

type Rule = Production<Term, &'static str>;

fn tokenizer() -> TokenizerBuilder<Term> {
    TokenizerBuilder::new(Term::Eof)
        .recognize(Recognizer::identifier(Term::Id))
        .recognize(Recognizer::number(Term::Num))
        .recognize(Recognizer::symbol("=", Term::Assign))
}

/// S' -> S, S -> id S2, S2 -> = VAL, S2 -> '', VAL -> id, VAL -> num
fn assignment() -> Parser<Term, &'static str, TokenizerBuilder<Term>> {
    use Symbol::{Nonterminal as N, Terminal as T};
    let grammar = [
        Production::new("S'", vec![N("S")]),
        Production::new("S", vec![T(Term::Id), N("S2")]),
        Production::new("S2", vec![T(Term::Assign), N("VAL")]),
        Production::epsilon("S2"),
        Production::new("VAL", vec![T(Term::Id)]),
        Production::new("VAL", vec![T(Term::Num)]),
    ]
    .into_iter()
    .collect();
    let table = ParsingTableBuilder::new(grammar)
        .state(|s| s.shift(Term::Id, StateId(2)).goto("S", StateId(1)))
        .state(|s| s.accept(Term::Eof))
        .state(|s| {
            s.shift(Term::Assign, StateId(4))
                .reduce(Term::Eof, ProductionId(3))
                .error(Term::Num, "Assignment operator expected")
                .goto("S2", StateId(3))
        })
        .state(|s| s.reduce(Term::Eof, ProductionId(1)))
        .state(|s| {
            s.shift(Term::Id, StateId(6))
                .shift(Term::Num, StateId(7))
                .goto("VAL", StateId(5))
        })
        .state(|s| s.reduce(Term::Eof, ProductionId(2)))
        .state(|s| s.reduce(Term::Eof, ProductionId(4)))
        .state(|s| s.reduce(Term::Eof, ProductionId(5)))
        .build()
        .unwrap();
    Parser::new(table, tokenizer())
}

fn identifier(value: &StackValue<Term, i64>) -> String {
    value.token().unwrap().text().to_owned()
}

/// Assigns to and reads from `variables`; the parse value is the assigned
/// or read value.
fn interpreter<'a>(
    grammar: &Grammar<Term, &'static str>,
    variables: &'a RefCell<FxHashMap<String, i64>>,
) -> Listeners<'a, Term, &'static str, i64> {
    Listeners::builder(grammar)
        .on_reduce_display("S -> id S2", move |_, values| {
            let name = identifier(&values[0]);
            match values[1].value() {
                Some(&value) => {
                    variables.borrow_mut().insert(name, value);
                    Ok(Some(value))
                }
                None => Ok(variables.borrow().get(&name).copied()),
            }
        })
        .unwrap()
        .on_reduce(2, |_, mut values| Ok(values.pop().and_then(StackValue::into_value)))
        .unwrap()
        .on_reduce(4, move |_, values| {
            let name = identifier(&values[0]);
            match variables.borrow().get(&name) {
                Some(&value) => Ok(Some(value)),
                None => Err(ReduceError::new(format!("Unknown variable {name}"))),
            }
        })
        .unwrap()
        .on_reduce(5, |_, values| {
            let value = values[0].token().and_then(|token| token.value.as_ref());
            Ok(value.and_then(TokenValue::as_i64))
        })
        .unwrap()
        .build()
}

#[test]
fn assignment_of_a_number() {
    let parser = assignment();
    let variables = RefCell::default();
    let mut listeners = interpreter(parser.grammar(), &variables);
    let result = parser.parse("x = 20", &mut listeners).unwrap();
    assert!(result.is_success());
    assert_eq!(result.value(), Some(&20));
    assert_eq!(variables.borrow().get("x"), Some(&20));
}

#[test]
fn assignment_of_a_variable() {
    let parser = assignment();
    let variables = RefCell::new(FxHashMap::from_iter([("y".to_owned(), 10)]));
    let mut listeners = interpreter(parser.grammar(), &variables);
    let result = parser.parse("x = y", &mut listeners).unwrap();
    assert_eq!(result.errors(), &[] as &[String]);
    assert_eq!(result.into_value(), Some(10));
    assert_eq!(variables.borrow().get("x"), Some(&10));
}

#[test]
fn epsilon_reduction_reads_a_variable() {
    let parser = assignment();
    let variables = RefCell::new(FxHashMap::from_iter([("y".to_owned(), 10)]));
    let mut listeners = interpreter(parser.grammar(), &variables);
    let result = parser.parse("y", &mut listeners).unwrap();
    assert!(result.is_success());
    assert_eq!(result.value(), Some(&10));
    assert_eq!(variables.borrow().get("x"), None);
}

#[test]
fn epsilon_reduction_order() {
    let (reduced, errors) = reductions(&assignment(), "a");
    assert_eq!(reduced, ["S2 -> ''", "S -> id S2"]);
    assert!(errors.is_empty());
}

#[test]
fn state_specific_error_message() {
    let parser = assignment();
    let mut reductions = Vec::new();
    let mut record = |_: ProductionId, production: &Production<Term, &'static str>, _: Vec<StackValue<Term, ()>>| {
        reductions.push(production.to_string());
        Ok::<_, ReduceError>(None)
    };
    let result = parser.parse("x 20", &mut record).unwrap();
    assert_eq!(result.errors(), ["Assignment operator expected"]);
    assert_eq!(result.value(), None);
    assert!(reductions.is_empty());
}

#[test]
fn missing_entry_is_a_generic_syntax_error() {
    let parser = assignment();
    let result = parser.parse::<()>("x = =", &mut ()).unwrap();
    assert!(!result.is_success());
    assert_eq!(result.errors(), ["Syntax error"]);
}

#[test]
fn listener_failure_halts_the_parse() {
    let parser = assignment();
    let variables = RefCell::default();
    let mut listeners = interpreter(parser.grammar(), &variables);
    let result = parser.parse("x = y", &mut listeners).unwrap();
    assert_eq!(result.errors(), ["Unknown variable y"]);
    assert_eq!(result.value(), None);
    assert!(variables.borrow().is_empty());
}

#[test]
fn tokenizer_failures_abort() {
    let parser = assignment();
    let error = parser.parse::<()>("x = #", &mut ()).unwrap_err();
    assert_eq!(error.to_string(), "Unrecognized character sequence: #");
}

#[test]
fn parses_are_independent() {
    let parser = assignment();
    assert_eq!(parser.parse::<()>("x = =", &mut ()).unwrap().errors().len(), 1);
    assert!(parser.parse::<()>("x = 1", &mut ()).unwrap().is_success());
    assert!(parser.parse::<()>("x", &mut ()).unwrap().is_success());
}

/// S' -> S, S -> A =, S -> B = num, A -> num, B -> num
fn lookahead() -> Parser<Term, &'static str, TokenizerBuilder<Term>> {
    use Symbol::{Nonterminal as N, Terminal as T};
    let grammar = [
        Production::new("S'", vec![N("S")]),
        Production::new("S", vec![N("A"), T(Term::Assign)]),
        Production::new("S", vec![N("B"), T(Term::Assign), T(Term::Num)]),
        Production::new("A", vec![T(Term::Num)]),
        Production::new("B", vec![T(Term::Num)]),
    ]
    .into_iter()
    .collect();
    let table = ParsingTableBuilder::new(grammar)
        .state(|s| {
            s.shift(Term::Num, StateId(4))
                .goto("S", StateId(1))
                .goto("A", StateId(2))
                .goto("B", StateId(3))
        })
        .state(|s| s.accept(Term::Eof))
        .state(|s| s.shift(Term::Assign, StateId(5)))
        .state(|s| s.shift(Term::Assign, StateId(6)))
        .state(|s| {
            s.reduce(Term::Assign, ProductionId(3))
                .reduce_if(Term::Assign, Term::Num, ProductionId(4))
        })
        .state(|s| s.reduce(Term::Eof, ProductionId(1)))
        .state(|s| s.shift(Term::Num, StateId(7)))
        .state(|s| s.reduce(Term::Eof, ProductionId(2)))
        .build()
        .unwrap();
    Parser::new(table, tokenizer())
}

fn reductions(parser: &Parser<Term, &'static str, TokenizerBuilder<Term>>, input: &str) -> (Vec<String>, Vec<String>) {
    let mut reduced = Vec::new();
    let mut record = |_: ProductionId, production: &Rule, _: Vec<StackValue<Term, ()>>| {
        reduced.push(production.to_string());
        Ok::<_, ReduceError>(None)
    };
    let result = parser.parse(input, &mut record).unwrap();
    (reduced, result.errors().to_vec())
}

#[test]
fn lookahead_selects_the_longer_alternative() {
    let (reduced, errors) = reductions(&lookahead(), "20 = 20");
    assert_eq!(reduced, ["B -> num", "S -> B = num"]);
    assert!(errors.is_empty());
}

#[test]
fn lookahead_falls_back_to_the_previous_entry() {
    let (reduced, errors) = reductions(&lookahead(), "20 = ");
    assert_eq!(reduced, ["A -> num", "S -> A ="]);
    assert!(errors.is_empty());
}

#[test]
fn terminal_values_reach_the_listener() {
    let parser = lookahead();
    let mut seen = Vec::new();
    let mut record = |_: ProductionId, _: &Rule, values: Vec<StackValue<Term, ()>>| {
        seen.push(
            values
                .iter()
                .map(|value| match value {
                    StackValue::Terminal(token) => token.text().to_owned(),
                    StackValue::Nonterminal(_) => "_".to_owned(),
                })
                .collect::<Vec<_>>()
                .join(" "),
        );
        Ok::<_, ReduceError>(None)
    };
    parser.parse("20 = 20", &mut record).unwrap();
    assert_eq!(seen, ["20", "_ = 20"]);
}
