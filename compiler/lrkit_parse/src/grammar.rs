//! Productions and grammars.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::symbol::Symbol;

/// Index of a production in its grammar.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductionId(pub usize);

impl fmt::Display for ProductionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// `lhs -> rhs...`; an empty right-hand side is an epsilon production.
///
/// Equality and hashing are structural.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Production<T, N> {
    pub lhs: N,
    pub rhs: Vec<Symbol<T, N>>,
}

impl<T, N> Production<T, N> {
    pub fn new(lhs: N, rhs: Vec<Symbol<T, N>>) -> Self {
        Production { lhs, rhs }
    }

    pub fn epsilon(lhs: N) -> Self {
        Production { lhs, rhs: Vec::new() }
    }

    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }
}

/// Canonical form: `S -> id S2`, or `S2 -> ''` for epsilon.
impl<T: fmt::Display, N: fmt::Display> fmt::Display for Production<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        if self.rhs.is_empty() {
            return f.write_str(" ''");
        }
        for symbol in &self.rhs {
            write!(f, " {symbol}")?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("Production {index} does not exist; the grammar has {len} productions")]
    UnknownIndex { index: usize, len: usize },
    #[error("No production \"{display}\" in the grammar")]
    UnknownDisplay { display: String },
}

/// Insertion-ordered productions.
///
/// Besides its index, every production can be looked up by its canonical
/// display string. When two productions display the same, the later one
/// owns the string.
#[derive(Clone, Debug)]
pub struct Grammar<T, N> {
    productions: Vec<Production<T, N>>,
    by_display: FxHashMap<String, ProductionId>,
}

impl<T, N> Default for Grammar<T, N> {
    fn default() -> Self {
        Grammar {
            productions: Vec::new(),
            by_display: FxHashMap::default(),
        }
    }
}

impl<T, N> Grammar<T, N>
where
    T: fmt::Display,
    N: fmt::Display,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, production: Production<T, N>) -> ProductionId {
        let id = ProductionId(self.productions.len());
        self.by_display.insert(production.to_string(), id);
        self.productions.push(production);
        id
    }
}

impl<T, N> Grammar<T, N> {
    pub fn production(&self, id: ProductionId) -> Option<&Production<T, N>> {
        self.productions.get(id.0)
    }

    /// Look up a production by its canonical display string.
    pub fn find(&self, display: &str) -> Option<ProductionId> {
        self.by_display.get(display).copied()
    }

    /// Checked conversion from a raw index.
    pub fn id(&self, index: usize) -> Result<ProductionId, GrammarError> {
        if index < self.productions.len() {
            Ok(ProductionId(index))
        } else {
            Err(GrammarError::UnknownIndex {
                index,
                len: self.productions.len(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProductionId, &Production<T, N>)> {
        self.productions
            .iter()
            .enumerate()
            .map(|(index, production)| (ProductionId(index), production))
    }
}

impl<T: Eq + Hash, N: Eq + Hash> Grammar<T, N> {
    /// First production structurally equal to `production`.
    pub fn position(&self, production: &Production<T, N>) -> Option<ProductionId> {
        self.productions
            .iter()
            .position(|candidate| candidate == production)
            .map(ProductionId)
    }
}

impl<T, N> FromIterator<Production<T, N>> for Grammar<T, N>
where
    T: fmt::Display,
    N: fmt::Display,
{
    fn from_iter<I: IntoIterator<Item = Production<T, N>>>(iter: I) -> Self {
        let mut grammar = Grammar::new();
        for production in iter {
            grammar.push(production);
        }
        grammar
    }
}
