//! ACTION / GOTO table emission from the canonical collection.

use crate::automaton::CanonicalCollection;
use crate::first_follow::FirstSets;
use crate::grammar::AugmentedGrammar;
use crate::items::goto;
use crate::symbol::Symbol;
use log::warn;
use std::collections::BTreeMap;
use std::fmt;

/// A parsing action for a (state, terminal-or-`$`) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Shift the lookahead and go to the given state.
    Shift(usize),
    /// Reduce by the production with the given index.
    Reduce(usize),
    /// Accept the input.
    Accept,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift(state) => write!(f, "s{}", state),
            Action::Reduce(production) => write!(f, "r{}", production),
            Action::Accept => write!(f, "acc"),
        }
    }
}

/// A state-terminal pair for which two incompatible ACTION entries were
/// emitted. The earlier entry stays in the table; the attempted overwrite is
/// only recorded here. A non-empty conflict list means the grammar is not
/// LR(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub state: usize,
    pub symbol: Symbol,
    /// The entry already in the table.
    pub kept: Action,
    /// The entry that attempted to overwrite it.
    pub discarded: Action,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "conflict at ACTION[{}, {}]: {} vs {}",
            self.state, self.symbol, self.kept, self.discarded
        )
    }
}

/// ACTION table: (state, terminal-or-`$`) → action.
pub type ActionTable = BTreeMap<(usize, Symbol), Action>;

/// GOTO table: (state, nonterminal) → state.
pub type GotoTable = BTreeMap<(usize, Symbol), usize>;

/// Emits the ACTION and GOTO tables from the canonical collection.
///
/// For each state and each item `[A → α·β, a]`:
/// - β starts with terminal t: ACTION[i, t] = shift(GOTO(I, t))
/// - β starts with nonterminal N: GOTO[i, N] = GOTO(I, N)
/// - dot at end, A = S', a = $: ACTION[i, $] = accept
/// - dot at end otherwise: ACTION[i, a] = reduce(production)
///
/// Conflicting ACTION writes never overwrite: the first entry wins and every
/// differing attempt is recorded as a [`Conflict`], keeping the tables
/// deterministic even for non-LR(1) grammars.
pub fn build_tables(
    grammar: &AugmentedGrammar,
    first_sets: &FirstSets,
    collection: &CanonicalCollection,
) -> (ActionTable, GotoTable, Vec<Conflict>) {
    let mut action_table = ActionTable::new();
    let mut goto_table = GotoTable::new();
    let mut conflicts = Vec::new();

    let mut add_action = |key: (usize, Symbol), value: Action| {
        if let Some(&existing) = action_table.get(&key) {
            if existing != value {
                let conflict = Conflict {
                    state: key.0,
                    symbol: key.1,
                    kept: existing,
                    discarded: value,
                };
                warn!("{}", conflict);
                conflicts.push(conflict);
            }
            return;
        }
        action_table.insert(key, value);
    };

    for (state_id, state) in collection.states().iter().enumerate() {
        for item in state {
            let production = grammar.production(item.production);
            match item.symbol_after_dot(grammar) {
                Some(symbol) => {
                    let successor = goto(state, symbol, grammar, first_sets);
                    if successor.is_empty() {
                        continue;
                    }
                    // The collection is closed under GOTO, so the successor
                    // is always interned.
                    let target = collection
                        .state_index(&successor)
                        .expect("GOTO successor not interned");
                    if grammar.is_nonterminal(symbol) {
                        goto_table.insert((state_id, symbol.clone()), target);
                    } else {
                        add_action((state_id, symbol.clone()), Action::Shift(target));
                    }
                }
                None => {
                    if production.head == *grammar.augmented_start()
                        && item.lookahead.is_end_marker()
                    {
                        add_action((state_id, Symbol::end_marker()), Action::Accept);
                    } else {
                        add_action(
                            (state_id, item.lookahead.clone()),
                            Action::Reduce(item.production),
                        );
                    }
                }
            }
        }
    }

    (action_table, goto_table, conflicts)
}
