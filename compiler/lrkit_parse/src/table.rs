//! LR parsing tables.
//!
//! A table is a grammar plus one [`State`] per automaton row. Rows are
//! numbered in creation order and checked as a whole by
//! [`ParsingTableBuilder::build`]; a built table is immutable.

use std::fmt;
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::grammar::{Grammar, ProductionId};

/// Message of the action used when a state has no entry for a token.
pub const DEFAULT_SYNTAX_ERROR: &str = "Syntax error";

/// Index of a state in its table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub usize);

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What the automaton does for one (state, symbol) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action<T> {
    Shift(StateId),
    Reduce(ProductionId),
    Goto(StateId),
    Accept,
    Error(String),
    /// Peek the token after the current one and pick a branch by its kind.
    Conditional {
        lookahead: T,
        if_equal: Box<Action<T>>,
        otherwise: Box<Action<T>>,
    },
}

impl<T> Action<T> {
    /// Returns `true` for actions that end the parse.
    pub fn halts(&self) -> bool {
        matches!(self, Action::Accept | Action::Error(_))
    }
}

impl<T: fmt::Display> fmt::Display for Action<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift(state) => write!(f, "s{state}"),
            Action::Reduce(production) => write!(f, "r{production}"),
            Action::Goto(state) => write!(f, "g{state}"),
            Action::Accept => f.write_str("acc"),
            Action::Error(message) => write!(f, "error({message})"),
            Action::Conditional {
                lookahead,
                if_equal,
                otherwise,
            } => write!(f, "if {lookahead} then {if_equal} else {otherwise}"),
        }
    }
}

/// One row of the automaton.
#[derive(Clone, Debug)]
pub struct State<T, N> {
    actions: FxHashMap<T, Action<T>>,
    gotos: FxHashMap<N, StateId>,
}

impl<T: Eq + Hash, N: Eq + Hash> State<T, N> {
    pub fn action(&self, terminal: &T) -> Option<&Action<T>> {
        self.actions.get(terminal)
    }

    pub fn goto(&self, nonterminal: &N) -> Option<StateId> {
        self.gotos.get(nonterminal).copied()
    }

    pub fn has_action(&self, terminal: &T) -> bool {
        self.actions.contains_key(terminal)
    }
}

impl<T, N> State<T, N> {
    pub fn actions(&self) -> impl Iterator<Item = (&T, &Action<T>)> {
        self.actions.iter()
    }

    pub fn gotos(&self) -> impl Iterator<Item = (&N, StateId)> {
        self.gotos.iter().map(|(nonterminal, state)| (nonterminal, *state))
    }
}

/// Entries of one state under construction. Later entries for the same
/// symbol replace earlier ones, except the conditional forms, which keep the
/// earlier entry as their fallback branch.
#[derive(Clone, Debug)]
pub struct StateBuilder<T, N> {
    state: State<T, N>,
    default_error: String,
}

impl<T: Eq + Hash, N: Eq + Hash> StateBuilder<T, N> {
    #[must_use]
    pub fn shift(self, terminal: T, target: StateId) -> Self {
        self.action(terminal, Action::Shift(target))
    }

    #[must_use]
    pub fn reduce(self, terminal: T, production: ProductionId) -> Self {
        self.action(terminal, Action::Reduce(production))
    }

    #[must_use]
    pub fn accept(self, terminal: T) -> Self {
        self.action(terminal, Action::Accept)
    }

    #[must_use]
    pub fn error(self, terminal: T, message: impl Into<String>) -> Self {
        self.action(terminal, Action::Error(message.into()))
    }

    #[must_use]
    pub fn goto(mut self, nonterminal: N, target: StateId) -> Self {
        self.state.gotos.insert(nonterminal, target);
        self
    }

    /// On `terminal`, shift to `target` if the token after it is
    /// `lookahead`; otherwise do what was registered before.
    #[must_use]
    pub fn shift_if(self, terminal: T, lookahead: T, target: StateId) -> Self {
        self.conditional(terminal, lookahead, Action::Shift(target))
    }

    /// On `terminal`, reduce by `production` if the token after it is
    /// `lookahead`; otherwise do what was registered before.
    #[must_use]
    pub fn reduce_if(self, terminal: T, lookahead: T, production: ProductionId) -> Self {
        self.conditional(terminal, lookahead, Action::Reduce(production))
    }

    #[must_use]
    pub fn action(mut self, terminal: T, action: Action<T>) -> Self {
        self.state.actions.insert(terminal, action);
        self
    }

    fn conditional(mut self, terminal: T, lookahead: T, if_equal: Action<T>) -> Self {
        let otherwise = match self.state.actions.remove(&terminal) {
            Some(previous) => previous,
            None => Action::Error(self.default_error.clone()),
        };
        let action = Action::Conditional {
            lookahead,
            if_equal: Box::new(if_equal),
            otherwise: Box::new(otherwise),
        };
        self.state.actions.insert(terminal, action);
        self
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("The parsing table has no states")]
    NoStates,
    #[error("State {state} refers to state {target}, but the table has {len} states")]
    UnknownState {
        state: StateId,
        target: StateId,
        len: usize,
    },
    #[error("State {state} reduces by production {production}, but the grammar has {len} productions")]
    UnknownProduction {
        state: StateId,
        production: ProductionId,
        len: usize,
    },
}

/// Assembles the states of a table over a fixed grammar.
#[derive(Clone, Debug)]
pub struct ParsingTableBuilder<T, N> {
    grammar: Grammar<T, N>,
    states: Vec<State<T, N>>,
    default_error: String,
}

impl<T: Eq + Hash, N: Eq + Hash> ParsingTableBuilder<T, N> {
    pub fn new(grammar: Grammar<T, N>) -> Self {
        ParsingTableBuilder {
            grammar,
            states: Vec::new(),
            default_error: DEFAULT_SYNTAX_ERROR.to_owned(),
        }
    }

    /// Replace the message used when a state has no entry for a token.
    ///
    /// Affects states created afterwards as well as the table's default.
    #[must_use]
    pub fn default_error(mut self, message: impl Into<String>) -> Self {
        self.default_error = message.into();
        self
    }

    pub fn grammar(&self) -> &Grammar<T, N> {
        &self.grammar
    }

    pub fn new_state(&self) -> StateBuilder<T, N> {
        StateBuilder {
            state: State {
                actions: FxHashMap::default(),
                gotos: FxHashMap::default(),
            },
            default_error: self.default_error.clone(),
        }
    }

    /// Append a state; its id is the number of states added before it.
    pub fn push_state(&mut self, state: StateBuilder<T, N>) -> StateId {
        let id = StateId(self.states.len());
        self.states.push(state.state);
        id
    }

    /// Append a state configured by `configure`.
    #[must_use]
    pub fn state(mut self, configure: impl FnOnce(StateBuilder<T, N>) -> StateBuilder<T, N>) -> Self {
        let state = configure(self.new_state());
        self.push_state(state);
        self
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Check every target state and production, then freeze the table.
    pub fn build(self) -> Result<ParsingTable<T, N>, TableError> {
        if self.states.is_empty() {
            return Err(TableError::NoStates);
        }
        let len = self.states.len();
        for (index, state) in self.states.iter().enumerate() {
            let id = StateId(index);
            for action in state.actions.values() {
                self.check_action(id, action)?;
            }
            for target in state.gotos.values() {
                check_target(id, *target, len)?;
            }
        }
        Ok(ParsingTable {
            grammar: self.grammar,
            states: self.states,
            default_action: Action::Error(self.default_error),
        })
    }

    fn check_action(&self, state: StateId, action: &Action<T>) -> Result<(), TableError> {
        match action {
            Action::Shift(target) | Action::Goto(target) => check_target(state, *target, self.states.len()),
            Action::Reduce(production) => {
                if production.0 < self.grammar.len() {
                    Ok(())
                } else {
                    Err(TableError::UnknownProduction {
                        state,
                        production: *production,
                        len: self.grammar.len(),
                    })
                }
            }
            Action::Conditional {
                if_equal, otherwise, ..
            } => {
                self.check_action(state, if_equal)?;
                self.check_action(state, otherwise)
            }
            Action::Accept | Action::Error(_) => Ok(()),
        }
    }
}

fn check_target(state: StateId, target: StateId, len: usize) -> Result<(), TableError> {
    if target.0 < len {
        Ok(())
    } else {
        Err(TableError::UnknownState { state, target, len })
    }
}

/// Immutable LR automaton over a grammar.
#[derive(Clone, Debug)]
pub struct ParsingTable<T, N> {
    grammar: Grammar<T, N>,
    states: Vec<State<T, N>>,
    default_action: Action<T>,
}

impl<T, N> ParsingTable<T, N> {
    pub fn grammar(&self) -> &Grammar<T, N> {
        &self.grammar
    }

    pub fn state(&self, id: StateId) -> Option<&State<T, N>> {
        self.states.get(id.0)
    }

    pub fn states(&self) -> &[State<T, N>] {
        &self.states
    }

    /// The action taken when a state has no entry for the current token.
    pub fn default_action(&self) -> &Action<T> {
        &self.default_action
    }

    /// Every terminal with an entry in some state, in no particular order.
    pub fn terminals(&self) -> FxHashSet<&T>
    where
        T: Eq + Hash,
    {
        self.states.iter().flat_map(|state| state.actions.keys()).collect()
    }
}
