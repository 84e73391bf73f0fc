//! LR(1) items and the CLOSURE / GOTO operations over item sets.

use crate::first_follow::{FirstSets, first_of_sequence};
use crate::grammar::AugmentedGrammar;
use crate::symbol::Symbol;
use std::collections::BTreeSet;

/// An LR(1) item: a production with a dot position and a lookahead.
///
/// The production is referred to by its index in the augmented grammar; the
/// dot position is in `[0, |body|]`; the lookahead is a terminal or `$`.
/// Field order gives the derived `Ord` the canonical
/// (production, dot, lookahead) triple ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    pub production: usize,
    pub dot: usize,
    pub lookahead: Symbol,
}

impl Item {
    /// Creates a new item.
    pub fn new(production: usize, dot: usize, lookahead: Symbol) -> Self {
        Self {
            production,
            dot,
            lookahead,
        }
    }

    /// Returns the symbol after the dot, if any.
    pub fn symbol_after_dot<'g>(&self, grammar: &'g AugmentedGrammar) -> Option<&'g Symbol> {
        grammar.production(self.production).body.get(self.dot)
    }

    /// Checks if the dot is at the end of the body (reduce item).
    pub fn is_complete(&self, grammar: &AugmentedGrammar) -> bool {
        self.dot >= grammar.production(self.production).body.len()
    }

    /// Returns the item with the dot advanced by one position.
    fn advanced(&self) -> Item {
        Item::new(self.production, self.dot + 1, self.lookahead.clone())
    }
}

/// A set of LR(1) items.
///
/// `BTreeSet` keeps the items in canonical triple order, so two states with
/// the same membership compare, hash, and print identically.
pub type ItemSet = BTreeSet<Item>;

/// Computes the closure of an item set.
///
/// For every item `[A → α·Bβ, a]` with B nonterminal, for every production
/// `B → γ` and every `b ∈ FIRST(βa)`, adds `[B → ·γ, b]`, repeating until
/// saturation. The lookahead `a` is appended to β so that FIRST of the
/// context is taken over the full remaining right part.
pub fn closure(items: &ItemSet, grammar: &AugmentedGrammar, first_sets: &FirstSets) -> ItemSet {
    let mut result = items.clone();
    let mut pending: Vec<Item> = items.iter().cloned().collect();

    while let Some(item) = pending.pop() {
        let Some(next) = item.symbol_after_dot(grammar) else {
            continue;
        };
        if !grammar.is_nonterminal(next) {
            continue;
        }

        let body = &grammar.production(item.production).body;
        let mut context: Vec<Symbol> = body[item.dot + 1..].to_vec();
        context.push(item.lookahead.clone());
        let lookaheads = first_of_sequence(first_sets, &context);

        for &prod_idx in grammar.productions_for(next) {
            for lookahead in &lookaheads {
                let new_item = Item::new(prod_idx, 0, lookahead.clone());
                if result.insert(new_item.clone()) {
                    pending.push(new_item);
                }
            }
        }
    }

    result
}

/// Computes GOTO(I, X): the closure of all items of I with the dot advanced
/// over X. An empty result means there is no transition on X.
pub fn goto(
    items: &ItemSet,
    symbol: &Symbol,
    grammar: &AugmentedGrammar,
    first_sets: &FirstSets,
) -> ItemSet {
    let moved: ItemSet = items
        .iter()
        .filter(|item| item.symbol_after_dot(grammar) == Some(symbol))
        .map(Item::advanced)
        .collect();

    if moved.is_empty() {
        return moved;
    }
    closure(&moved, grammar, first_sets)
}
