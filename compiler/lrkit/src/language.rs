//! Languages with string symbols, loaded from a directory.

use std::fmt;
use std::path::Path;

use lrkit_lexer::{CharSource, LexError, Recognizer, Tokenizer, TokenizerBuilder};
use lrkit_parse::{
    load_language, LoadError, ParsingTable, Parser, Production, ProductionId, ReduceError, ReduceListener, StackValue,
    SymbolResolver,
};
use tracing::debug;

/// The end-of-input terminal.
pub const END_OF_INPUT: &str = "$";

const EPSILON: &str = "''";

/// Terminals with a dedicated recognizer instead of a literal symbol.
const IDENTIFIER: &str = "id";
const NUMBER: &str = "num";
const STRING: &str = "str";
const CHARACTER: &str = "char";
const BOOLEAN: &str = "bool";

/// Resolves names starting with an uppercase letter as nonterminals and any
/// other name except `''` as a terminal.
#[derive(Copy, Clone, Debug, Default)]
pub struct DynamicSymbols;

impl DynamicSymbols {
    fn is_nonterminal(text: &str) -> bool {
        text.chars().next().is_some_and(char::is_uppercase)
    }
}

impl SymbolResolver<String, String> for DynamicSymbols {
    fn terminal(&self, text: &str) -> Option<String> {
        (!text.is_empty() && text != EPSILON && !Self::is_nonterminal(text)).then(|| text.to_owned())
    }

    fn nonterminal(&self, text: &str) -> Option<String> {
        Self::is_nonterminal(text).then(|| text.to_owned())
    }
}

/// Tokenizer for the terminals used by `table`.
///
/// Literal terminals are registered before the identifier pattern so that
/// keywords win ties. `//` and `/* */` comments are skipped.
pub fn tokenizer_for(table: &ParsingTable<String, String>) -> TokenizerBuilder<String> {
    let terminals = table.terminals();
    let has = |name: &str| terminals.iter().any(|terminal| terminal.as_str() == name);

    let mut literals: Vec<&str> = terminals
        .iter()
        .map(|terminal| terminal.as_str())
        .filter(|terminal| ![END_OF_INPUT, IDENTIFIER, NUMBER, STRING, CHARACTER, BOOLEAN].contains(terminal))
        .collect();
    literals.sort_unstable();

    let mut builder = TokenizerBuilder::new(END_OF_INPUT.to_owned())
        .recognize(Recognizer::line_comment())
        .recognize(Recognizer::block_comment());
    for literal in literals {
        builder = builder.recognize(Recognizer::symbol(literal, literal.to_owned()));
    }
    let patterns: [(&str, fn(String) -> Recognizer<String>); 5] = [
        (CHARACTER, Recognizer::character),
        (STRING, Recognizer::string),
        (NUMBER, Recognizer::number),
        (BOOLEAN, Recognizer::boolean),
        (IDENTIFIER, Recognizer::identifier),
    ];
    for (name, recognizer) in patterns {
        if has(name) {
            builder = builder.recognize(recognizer(name.to_owned()));
        }
    }
    builder
}

/// A loaded language, ready to tokenize and parse.
#[derive(Debug)]
pub struct Language {
    name: String,
    parser: Parser<String, String, TokenizerBuilder<String>>,
}

impl Language {
    /// Load the language `name` from `dir`.
    pub fn load(dir: impl AsRef<Path>, name: &str) -> Result<Self, LoadError> {
        let table = load_language(dir, name, &DynamicSymbols)?;
        Ok(Language::from_table(name, table))
    }

    pub fn from_table(name: impl Into<String>, table: ParsingTable<String, String>) -> Self {
        let tokenizer = tokenizer_for(&table);
        debug!(recognizers = tokenizer.recognizers().len(), "derived tokenizer");
        Language {
            name: name.into(),
            parser: Parser::new(table, tokenizer),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &ParsingTable<String, String> {
        self.parser.table()
    }

    pub fn tokenize<'a>(&self, input: impl Into<CharSource<'a>>) -> Tokenizer<'a, String> {
        self.parser.tokenize(input)
    }

    /// Parse `input`, recording every reduction and building a syntax tree.
    pub fn parse<'a>(&self, input: impl Into<CharSource<'a>>) -> Result<ParseReport, LexError> {
        let mut builder = TreeBuilder::default();
        let result = self.parser.parse(input, &mut builder)?;
        Ok(ParseReport {
            reductions: builder.reductions,
            errors: result.errors().to_vec(),
            tree: result.into_value(),
        })
    }
}

/// Concrete syntax tree built by [`Language::parse`].
#[derive(Clone, Debug, PartialEq)]
pub enum SyntaxTree {
    Token { kind: String, text: String },
    Node { symbol: String, children: Vec<SyntaxTree> },
}

/// Tokens print as their text; nodes as `(Symbol child ...)`.
impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxTree::Token { text, .. } => f.write_str(text),
            SyntaxTree::Node { symbol, children } => {
                write!(f, "({symbol}")?;
                for child in children {
                    write!(f, " {child}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// What a parse did: reductions in order, the tree for the start symbol
/// when accepted, and the diagnostics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParseReport {
    pub reductions: Vec<String>,
    pub tree: Option<SyntaxTree>,
    pub errors: Vec<String>,
}

impl ParseReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Default)]
struct TreeBuilder {
    reductions: Vec<String>,
}

impl ReduceListener<String, String, SyntaxTree> for TreeBuilder {
    fn on_reduce(
        &mut self,
        _id: ProductionId,
        production: &Production<String, String>,
        values: Vec<StackValue<String, SyntaxTree>>,
    ) -> Result<Option<SyntaxTree>, ReduceError> {
        self.reductions.push(production.to_string());
        let children = values
            .into_iter()
            .filter_map(|value| match value {
                StackValue::Terminal(token) => Some(SyntaxTree::Token {
                    text: token.text().to_owned(),
                    kind: token.kind,
                }),
                StackValue::Nonterminal(tree) => tree,
            })
            .collect();
        Ok(Some(SyntaxTree::Node {
            symbol: production.lhs.clone(),
            children,
        }))
    }
}
