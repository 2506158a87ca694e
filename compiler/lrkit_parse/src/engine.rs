//! The LR automaton.
//!
//! A [`Parser`] is immutable and may run any number of parses, one after the
//! other or concurrently; every call to [`Parser::parse`] creates its own
//! tokenizer and stacks.

use std::fmt;
use std::hash::Hash;

use lrkit_lexer::{CharSource, LexError, ScanContext, Token, Tokenizer, TokenizerFactory};
use tracing::{debug, trace};

use crate::grammar::{Grammar, ProductionId};
use crate::listener::{ReduceListener, StackValue};
use crate::table::{Action, ParsingTable, StateId};

/// A parsing table bound to the tokenizer factory that feeds it.
#[derive(Debug)]
pub struct Parser<T, N, F> {
    table: ParsingTable<T, N>,
    factory: F,
}

impl<T, N, F> Parser<T, N, F>
where
    T: Clone + Eq + Hash + fmt::Debug + fmt::Display,
    N: Clone + Eq + Hash + fmt::Display,
    F: TokenizerFactory<T>,
{
    pub fn new(table: ParsingTable<T, N>, factory: F) -> Self {
        Parser { table, factory }
    }

    pub fn table(&self) -> &ParsingTable<T, N> {
        &self.table
    }

    pub fn grammar(&self) -> &Grammar<T, N> {
        self.table.grammar()
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// A fresh tokenizer over `input`, as a parse would use it.
    pub fn tokenize<'a>(&self, input: impl Into<CharSource<'a>>) -> Tokenizer<'a, T> {
        self.factory.tokenizer(input.into())
    }

    /// Parse `input`, reporting every reduction to `listener`.
    ///
    /// Syntax errors and listener failures end the parse and are returned as
    /// diagnostics in the [`ParseResult`]. Only tokenizer failures are `Err`.
    pub fn parse<'a, V>(
        &self,
        input: impl Into<CharSource<'a>>,
        listener: &mut impl ReduceListener<T, N, V>,
    ) -> Result<ParseResult<V>, LexError> {
        let mut tokenizer = self.tokenize(input);
        let token = tokenizer.next_token(&ScanContext::in_state(0))?;
        let invocation = Invocation {
            table: &self.table,
            tokenizer,
            listener,
            states: vec![StateId(0)],
            values: Vec::new(),
            token,
            goto: None,
            value: None,
            errors: Vec::new(),
        };
        invocation.run()
    }
}

/// Outcome of one parse.
///
/// An accepted parse has no errors; its value is whatever the listener
/// synthesized for the start symbol, which may be nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseResult<V> {
    value: Option<V>,
    errors: Vec<String>,
}

impl<V> ParseResult<V> {
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_value(self) -> Option<V> {
        self.value
    }
}

/// State of a single parse.
struct Invocation<'p, 'a, 'l, T, N, V, L> {
    table: &'p ParsingTable<T, N>,
    tokenizer: Tokenizer<'a, T>,
    listener: &'l mut L,
    /// Automaton states; the top is the current state.
    states: Vec<StateId>,
    /// One entry per state above the bottom one.
    values: Vec<StackValue<T, V>>,
    token: Token<T>,
    /// Nonterminal produced by the last reduction, waiting for its goto.
    goto: Option<(N, Option<V>)>,
    value: Option<V>,
    errors: Vec<String>,
}

impl<T, N, V, L> Invocation<'_, '_, '_, T, N, V, L>
where
    T: Clone + Eq + Hash + fmt::Debug + fmt::Display,
    N: Clone + Eq + Hash + fmt::Display,
    L: ReduceListener<T, N, V>,
{
    fn run(mut self) -> Result<ParseResult<V>, LexError> {
        let table = self.table;
        loop {
            let current = self.current();
            let state = table.state(current);
            let goto;
            let action = match &self.goto {
                Some((nonterminal, _)) => match state.and_then(|state| state.goto(nonterminal)) {
                    Some(target) => {
                        goto = Action::Goto(target);
                        &goto
                    }
                    None => table.default_action(),
                },
                None => state
                    .and_then(|state| state.action(&self.token.kind))
                    .unwrap_or_else(|| table.default_action()),
            };
            trace!(state = %current, token = %self.token.kind, %action, "action");
            if self.execute(action)? {
                break;
            }
        }
        Ok(ParseResult {
            value: self.value,
            errors: self.errors,
        })
    }

    fn current(&self) -> StateId {
        self.states.last().copied().unwrap_or(StateId(0))
    }

    /// Run one action. Returns `true` once the parse is over.
    fn execute(&mut self, action: &Action<T>) -> Result<bool, LexError> {
        match action {
            Action::Shift(target) => {
                self.states.push(*target);
                let next = self.tokenizer.next_token(&ScanContext::in_state(target.0))?;
                let shifted = std::mem::replace(&mut self.token, next);
                self.values.push(StackValue::Terminal(shifted));
                Ok(false)
            }
            Action::Goto(target) => {
                let value = self.goto.take().and_then(|(_, value)| value);
                self.states.push(*target);
                self.values.push(StackValue::Nonterminal(value));
                Ok(false)
            }
            Action::Reduce(id) => Ok(self.reduce(*id)),
            Action::Accept => {
                self.value = self.values.pop().and_then(StackValue::into_value);
                debug!("input accepted");
                Ok(true)
            }
            Action::Error(message) => {
                self.fail(message.clone());
                Ok(true)
            }
            Action::Conditional {
                lookahead,
                if_equal,
                otherwise,
            } => {
                let context = ScanContext::in_state(self.current().0);
                let next = self.tokenizer.peek_token(&context)?;
                let branch = if next.kind == *lookahead { if_equal } else { otherwise };
                trace!(next = %next.kind, action = %branch, "lookahead");
                self.execute(branch)
            }
        }
    }

    fn reduce(&mut self, id: ProductionId) -> bool {
        let table = self.table;
        let Some(production) = table.grammar().production(id) else {
            self.fail(format!("Production {id} does not exist"));
            return true;
        };
        let arity = production.rhs.len();
        if arity > self.values.len() || arity >= self.states.len() {
            self.fail(format!("Parse stack underflow reducing {production}"));
            return true;
        }
        let values = self.values.split_off(self.values.len() - arity);
        self.states.truncate(self.states.len() - arity);
        trace!(%production, "reduce");
        match self.listener.on_reduce(id, production, values) {
            Ok(value) => {
                self.goto = Some((production.lhs.clone(), value));
                false
            }
            Err(error) => {
                self.fail(error.to_string());
                true
            }
        }
    }

    fn fail(&mut self, message: String) {
        debug!(state = %self.current(), token = %self.token, %message, "parse halted");
        self.errors.push(message);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
