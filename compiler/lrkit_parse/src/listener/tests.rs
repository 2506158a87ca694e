use super::*;
use crate::symbol::Symbol;
use pretty_assertions::assert_eq;

fn grammar() -> Grammar<&'static str, &'static str> {
    [
        Production::new("S", vec![Symbol::Nonterminal("E")]),
        Production::new("E", vec![Symbol::Terminal("num")]),
        Production::epsilon("E"),
    ]
    .into_iter()
    .collect()
}

fn num(text: &str) -> StackValue<&'static str, i64> {
    StackValue::Terminal(Token::new("num", text, None))
}

#[test]
fn stack_value_accessors() {
    let terminal = num("4");
    assert_eq!(terminal.token().map(Token::text), Some("4"));
    assert_eq!(terminal.value(), None);
    assert_eq!(terminal.into_value(), None);

    let nonterminal: StackValue<&str, i64> = StackValue::Nonterminal(Some(7));
    assert!(nonterminal.token().is_none());
    assert_eq!(nonterminal.value(), Some(&7));
    assert_eq!(nonterminal.into_value(), Some(7));
}

#[test]
fn production_listener_then_default_then_nothing() {
    let grammar = grammar();
    let mut listeners = Listeners::builder(&grammar)
        .on_reduce(1, |_, values| {
            let text = values[0].token().unwrap().text().to_owned();
            Ok(text.parse().ok())
        })
        .unwrap()
        .build();
    let number = grammar.production(ProductionId(1)).unwrap();
    let epsilon = grammar.production(ProductionId(2)).unwrap();

    assert_eq!(listeners.on_reduce(ProductionId(1), number, vec![num("12")]), Ok(Some(12)));
    assert_eq!(listeners.on_reduce(ProductionId(2), epsilon, Vec::new()), Ok(None));

    let mut listeners = Listeners::builder(&grammar)
        .on_reduce(1, |_, _| Ok(Some(1)))
        .unwrap()
        .by_default(|production, _| Ok(Some(if production.is_epsilon() { 100 } else { 200 })))
        .build();
    assert_eq!(listeners.len(), 1);
    assert_eq!(listeners.on_reduce(ProductionId(1), number, vec![num("12")]), Ok(Some(1)));
    assert_eq!(listeners.on_reduce(ProductionId(2), epsilon, Vec::new()), Ok(Some(100)));
}

#[test]
fn attach_by_display() {
    let grammar = grammar();
    let mut listeners = Listeners::builder(&grammar)
        .on_reduce_display("E -> ''", |_, _| Ok(Some(0)))
        .unwrap()
        .build();
    let epsilon = grammar.production(ProductionId(2)).unwrap();
    assert_eq!(listeners.on_reduce(ProductionId(2), epsilon, Vec::new()), Ok(Some(0)));
}

#[test]
fn attach_to_unknown_production() {
    let grammar = grammar();
    let by_index = Listeners::<_, _, i64>::builder(&grammar).on_reduce(3, |_, _| Ok(None));
    assert_eq!(
        by_index.unwrap_err().to_string(),
        "Production 3 does not exist; the grammar has 3 productions"
    );
    let by_display = Listeners::<_, _, i64>::builder(&grammar).on_reduce_display("E -> id", |_, _| Ok(None));
    assert_eq!(
        by_display.unwrap_err().to_string(),
        "No production \"E -> id\" in the grammar"
    );
}

#[test]
fn builder_debug_lists_attached_productions() {
    let grammar = grammar();
    let builder = Listeners::<_, _, i64>::builder(&grammar)
        .on_reduce(2, |_, _| Ok(None))
        .unwrap()
        .on_reduce(0, |_, _| Ok(None))
        .unwrap();
    assert_eq!(
        format!("{builder:?}"),
        "ListenersBuilder { grammar_productions: 3, listeners: Listeners { productions: [0, 2], default: false } }"
    );
}

#[test]
fn listener_failure_carries_message() {
    let grammar = grammar();
    let mut listeners = Listeners::<_, _, i64>::builder(&grammar)
        .by_default(|_, _| Err(ReduceError::new("Division by zero")))
        .build();
    let epsilon = grammar.production(ProductionId(2)).unwrap();
    let error = listeners.on_reduce(ProductionId(2), epsilon, Vec::new()).unwrap_err();
    assert_eq!(error.to_string(), "Division by zero");
    assert_eq!(error.message(), "Division by zero");
}

#[test]
fn closures_and_unit_are_listeners() {
    let grammar = grammar();
    let epsilon = grammar.production(ProductionId(2)).unwrap();

    let mut seen = Vec::new();
    let mut record = |id: ProductionId,
                      production: &Production<&'static str, &'static str>,
                      _values: Vec<StackValue<&'static str, ()>>| {
        seen.push((id, production.to_string()));
        Ok::<_, ReduceError>(None)
    };
    record.on_reduce(ProductionId(2), epsilon, Vec::new()).unwrap();
    assert_eq!(seen, [(ProductionId(2), "E -> ''".to_owned())]);

    let mut nothing = ();
    let value: Option<i64> = ReduceListener::<_, _, i64>::on_reduce(&mut nothing, ProductionId(2), epsilon, Vec::new()).unwrap();
    assert_eq!(value, None);
}
