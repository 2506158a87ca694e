//! Reduce listeners: the semantic actions run on every reduction.

use std::fmt;

use lrkit_lexer::Token;
use rustc_hash::FxHashMap;

use crate::grammar::{Grammar, GrammarError, Production, ProductionId};

/// One entry of the value stack.
///
/// Shifted terminals carry their token; nonterminals carry whatever the
/// listener synthesized for them, which may be nothing.
#[derive(Clone, Debug, PartialEq)]
pub enum StackValue<T, V> {
    Terminal(Token<T>),
    Nonterminal(Option<V>),
}

impl<T, V> StackValue<T, V> {
    pub fn token(&self) -> Option<&Token<T>> {
        match self {
            StackValue::Terminal(token) => Some(token),
            StackValue::Nonterminal(_) => None,
        }
    }

    pub fn value(&self) -> Option<&V> {
        match self {
            StackValue::Terminal(_) => None,
            StackValue::Nonterminal(value) => value.as_ref(),
        }
    }

    pub fn into_value(self) -> Option<V> {
        match self {
            StackValue::Terminal(_) => None,
            StackValue::Nonterminal(value) => value,
        }
    }
}

/// Semantic failure raised by a listener. Halts the parse; the message
/// becomes the diagnostic verbatim.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ReduceError {
    message: String,
}

impl ReduceError {
    pub fn new(message: impl Into<String>) -> Self {
        ReduceError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for ReduceError {
    fn from(message: String) -> Self {
        ReduceError { message }
    }
}

impl From<&str> for ReduceError {
    fn from(message: &str) -> Self {
        ReduceError::new(message)
    }
}

/// Receives every reduction of a parse.
///
/// `values` holds the popped stack entries for the production's right-hand
/// side, leftmost first. The returned value is pushed for the left-hand
/// nonterminal.
pub trait ReduceListener<T, N, V> {
    fn on_reduce(
        &mut self,
        id: ProductionId,
        production: &Production<T, N>,
        values: Vec<StackValue<T, V>>,
    ) -> Result<Option<V>, ReduceError>;
}

impl<T, N, V, F> ReduceListener<T, N, V> for F
where
    F: FnMut(ProductionId, &Production<T, N>, Vec<StackValue<T, V>>) -> Result<Option<V>, ReduceError>,
{
    fn on_reduce(
        &mut self,
        id: ProductionId,
        production: &Production<T, N>,
        values: Vec<StackValue<T, V>>,
    ) -> Result<Option<V>, ReduceError> {
        self(id, production, values)
    }
}

/// Ignores every reduction; the parse only validates its input.
impl<T, N, V> ReduceListener<T, N, V> for () {
    fn on_reduce(
        &mut self,
        _id: ProductionId,
        _production: &Production<T, N>,
        _values: Vec<StackValue<T, V>>,
    ) -> Result<Option<V>, ReduceError> {
        Ok(None)
    }
}

type ReduceFn<'a, T, N, V> =
    Box<dyn FnMut(&Production<T, N>, Vec<StackValue<T, V>>) -> Result<Option<V>, ReduceError> + 'a>;

/// Per-production listeners with an optional fallback.
///
/// A reduction runs the listener attached to its production, else the
/// default listener, else yields no value.
pub struct Listeners<'a, T, N, V> {
    by_production: FxHashMap<ProductionId, ReduceFn<'a, T, N, V>>,
    default: Option<ReduceFn<'a, T, N, V>>,
}

impl<'a, T, N, V> Listeners<'a, T, N, V> {
    pub fn builder(grammar: &Grammar<T, N>) -> ListenersBuilder<'_, 'a, T, N, V> {
        ListenersBuilder {
            grammar,
            listeners: Listeners {
                by_production: FxHashMap::default(),
                default: None,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.by_production.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_production.is_empty()
    }
}

impl<T, N, V> ReduceListener<T, N, V> for Listeners<'_, T, N, V> {
    fn on_reduce(
        &mut self,
        id: ProductionId,
        production: &Production<T, N>,
        values: Vec<StackValue<T, V>>,
    ) -> Result<Option<V>, ReduceError> {
        if let Some(listener) = self.by_production.get_mut(&id) {
            return listener(production, values);
        }
        match &mut self.default {
            Some(listener) => listener(production, values),
            None => Ok(None),
        }
    }
}

impl<T, N, V> fmt::Debug for Listeners<'_, T, N, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut productions: Vec<_> = self.by_production.keys().map(|id| id.0).collect();
        productions.sort_unstable();
        f.debug_struct("Listeners")
            .field("productions", &productions)
            .field("default", &self.default.is_some())
            .finish()
    }
}

/// Attaches listeners to the productions of one grammar.
///
/// Productions are addressed by index or by their canonical display string;
/// both are checked against the grammar. Attaching twice replaces.
pub struct ListenersBuilder<'g, 'a, T, N, V> {
    grammar: &'g Grammar<T, N>,
    listeners: Listeners<'a, T, N, V>,
}

impl<T, N, V> fmt::Debug for ListenersBuilder<'_, '_, T, N, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenersBuilder")
            .field("grammar_productions", &self.grammar.len())
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl<'a, T, N, V> ListenersBuilder<'_, 'a, T, N, V> {
    pub fn on_reduce(
        mut self,
        index: usize,
        listener: impl FnMut(&Production<T, N>, Vec<StackValue<T, V>>) -> Result<Option<V>, ReduceError> + 'a,
    ) -> Result<Self, GrammarError> {
        let id = self.grammar.id(index)?;
        self.listeners.by_production.insert(id, Box::new(listener));
        Ok(self)
    }

    pub fn on_reduce_display(
        mut self,
        display: &str,
        listener: impl FnMut(&Production<T, N>, Vec<StackValue<T, V>>) -> Result<Option<V>, ReduceError> + 'a,
    ) -> Result<Self, GrammarError> {
        let id = self.grammar.find(display).ok_or_else(|| GrammarError::UnknownDisplay {
            display: display.to_owned(),
        })?;
        self.listeners.by_production.insert(id, Box::new(listener));
        Ok(self)
    }

    #[must_use]
    pub fn by_default(
        mut self,
        listener: impl FnMut(&Production<T, N>, Vec<StackValue<T, V>>) -> Result<Option<V>, ReduceError> + 'a,
    ) -> Self {
        self.listeners.default = Some(Box::new(listener));
        self
    }

    pub fn build(self) -> Listeners<'a, T, N, V> {
        self.listeners
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
