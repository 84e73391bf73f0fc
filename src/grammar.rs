//! Grammar representation and plain-text ingestion.
//!
//! This module provides data structures and parsing logic for context-free
//! grammars: productions, the terminal/nonterminal partition, and the
//! augmentation step the LR(1) construction starts from.

use crate::error::{GrammarError, Result};
use crate::symbol::{Symbol, symbols_to_string};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// A production rule in a context-free grammar.
///
/// Represents a rule of the form: head → body, where head is a single
/// nonterminal and body is a sequence of symbols. An empty body denotes an
/// ε-production.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    /// Left-hand side (always a nonterminal)
    pub head: Symbol,
    /// Right-hand side (possibly empty)
    pub body: Vec<Symbol>,
}

impl Production {
    /// Creates a new production.
    pub fn new(head: Symbol, body: Vec<Symbol>) -> Self {
        Self { head, body }
    }

    /// Checks if this is an ε-production (empty body).
    pub fn is_epsilon(&self) -> bool {
        self.body.is_empty()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body_str = if self.body.is_empty() {
            crate::symbol::EPSILON.to_string()
        } else {
            symbols_to_string(&self.body)
        };
        write!(f, "{} → {}", self.head, body_str)
    }
}

/// A context-free grammar.
///
/// Holds the ordered production list (productions are referred to by their
/// 0-based index), the start symbol, and the terminal/nonterminal partition.
/// A symbol is a nonterminal iff it appears as the head of some production;
/// every other body symbol is a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    productions: Vec<Production>,
    start_symbol: Symbol,
    nonterminals: BTreeSet<Symbol>,
    terminals: BTreeSet<Symbol>,
}

impl Grammar {
    /// Parses a grammar from multi-line text.
    ///
    /// # Format
    /// One rule per non-blank line: `HEAD -> α₁ | α₂ | …` where each
    /// alternative is a whitespace-separated symbol sequence. A lone `ε`
    /// denotes the empty body. The first head encountered is the start
    /// symbol; repeated heads append their alternatives in source order.
    pub fn parse(text: &str) -> Result<Self> {
        let mut productions = Vec::new();
        let mut start_symbol = None;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let parsed = Self::parse_production_line(line)?;
            if start_symbol.is_none() {
                start_symbol = Some(parsed[0].head.clone());
            }
            productions.extend(parsed);
        }

        let start_symbol = start_symbol.ok_or(GrammarError::EmptyInput)?;
        Ok(Self::from_productions(productions, start_symbol))
    }

    /// Parses a single rule line into one production per alternative.
    fn parse_production_line(line: &str) -> Result<Vec<Production>> {
        let (left, right) = line
            .split_once("->")
            .ok_or_else(|| GrammarError::MissingArrow(line.to_string()))?;

        let head_str = left.trim();
        if head_str.is_empty() {
            return Err(GrammarError::EmptyHead(line.to_string()));
        }
        let head = Symbol::new(head_str);

        let mut productions = Vec::new();
        for alt in right.split('|') {
            let mut body: Vec<Symbol> = alt.split_whitespace().map(Symbol::new).collect();
            if body.is_empty() {
                return Err(GrammarError::EmptyAlternative(line.to_string()));
            }
            if body.len() == 1 && body[0].is_epsilon() {
                body.clear();
            } else if body.iter().any(|s| s.is_epsilon()) {
                return Err(GrammarError::EpsilonInBody(line.to_string()));
            }
            productions.push(Production::new(head.clone(), body));
        }

        Ok(productions)
    }

    /// Creates a grammar from an ordered production list.
    fn from_productions(productions: Vec<Production>, start_symbol: Symbol) -> Self {
        let nonterminals: BTreeSet<Symbol> =
            productions.iter().map(|p| p.head.clone()).collect();

        let terminals: BTreeSet<Symbol> = productions
            .iter()
            .flat_map(|p| p.body.iter())
            .filter(|s| !nonterminals.contains(*s))
            .cloned()
            .collect();

        Self {
            productions,
            start_symbol,
            nonterminals,
            terminals,
        }
    }

    /// Returns all productions in insertion order.
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Returns the start symbol.
    pub fn start_symbol(&self) -> &Symbol {
        &self.start_symbol
    }

    /// Returns all nonterminals.
    pub fn nonterminals(&self) -> &BTreeSet<Symbol> {
        &self.nonterminals
    }

    /// Returns all terminals.
    pub fn terminals(&self) -> &BTreeSet<Symbol> {
        &self.terminals
    }

    /// Augments the grammar with a fresh start production `S' → S`.
    ///
    /// The synthetic production is appended at the end, so existing
    /// production indices are stable. If the first production already has
    /// the shape `X' → X`, the grammar is taken as pre-augmented and the
    /// operation is a no-op.
    pub fn augment(&self) -> AugmentedGrammar {
        if let Some(first) = self.productions.first() {
            if let [lone] = first.body.as_slice() {
                if lone.primed() == first.head {
                    return AugmentedGrammar::new(
                        self.productions.clone(),
                        lone.clone(),
                        first.head.clone(),
                        0,
                        self.terminals.clone(),
                    );
                }
            }
        }

        let augmented_start = self.start_symbol.primed();
        let mut productions = self.productions.clone();
        productions.push(Production::new(
            augmented_start.clone(),
            vec![self.start_symbol.clone()],
        ));
        let start_production = productions.len() - 1;

        AugmentedGrammar::new(
            productions,
            self.start_symbol.clone(),
            augmented_start,
            start_production,
            self.terminals.clone(),
        )
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, prod) in self.productions.iter().enumerate() {
            writeln!(f, "{}: {}", i, prod)?;
        }
        Ok(())
    }
}

/// A grammar extended with the synthetic start production `S' → S`.
///
/// Reducing that production on lookahead `$` is what triggers acceptance.
/// Productions are additionally indexed by head for the CLOSURE operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentedGrammar {
    productions: Vec<Production>,
    start_symbol: Symbol,
    augmented_start: Symbol,
    start_production: usize,
    nonterminals: BTreeSet<Symbol>,
    terminals: BTreeSet<Symbol>,
    by_head: HashMap<Symbol, Vec<usize>>,
}

impl AugmentedGrammar {
    fn new(
        productions: Vec<Production>,
        start_symbol: Symbol,
        augmented_start: Symbol,
        start_production: usize,
        terminals: BTreeSet<Symbol>,
    ) -> Self {
        let nonterminals: BTreeSet<Symbol> =
            productions.iter().map(|p| p.head.clone()).collect();

        let mut by_head: HashMap<Symbol, Vec<usize>> = HashMap::new();
        for (i, prod) in productions.iter().enumerate() {
            by_head.entry(prod.head.clone()).or_default().push(i);
        }

        Self {
            productions,
            start_symbol,
            augmented_start,
            start_production,
            nonterminals,
            terminals,
            by_head,
        }
    }

    /// Returns all productions in insertion order, the synthetic start
    /// production included.
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Returns the production at the given index.
    ///
    /// # Panics
    /// Panics if the index is out of range; production indices stored in
    /// items always originate from this grammar.
    pub fn production(&self, index: usize) -> &Production {
        &self.productions[index]
    }

    /// Returns the indices of all productions with the given head, in
    /// insertion order.
    pub fn productions_for(&self, head: &Symbol) -> &[usize] {
        self.by_head.get(head).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Returns the original start symbol.
    pub fn start_symbol(&self) -> &Symbol {
        &self.start_symbol
    }

    /// Returns the synthetic start symbol `S'`.
    pub fn augmented_start(&self) -> &Symbol {
        &self.augmented_start
    }

    /// Returns the index of the synthetic start production `S' → S`.
    pub fn start_production(&self) -> usize {
        self.start_production
    }

    /// Returns all nonterminals, `S'` included.
    pub fn nonterminals(&self) -> &BTreeSet<Symbol> {
        &self.nonterminals
    }

    /// Returns all terminals.
    pub fn terminals(&self) -> &BTreeSet<Symbol> {
        &self.terminals
    }

    /// Checks if a symbol is a nonterminal of this grammar.
    pub fn is_nonterminal(&self, symbol: &Symbol) -> bool {
        self.nonterminals.contains(symbol)
    }

    /// Returns all grammar symbols (terminals and nonterminals) in
    /// lexicographic order. This is the iteration order of the canonical
    /// collection sweep.
    pub fn symbols(&self) -> BTreeSet<Symbol> {
        self.terminals.union(&self.nonterminals).cloned().collect()
    }
}
