//! FIRST and FOLLOW set computation for context-free grammars.
//!
//! This module implements algorithms from Aho et al., "Compilers: Principles,
//! Techniques, and Tools" (2nd Edition), section 4.4. FIRST feeds the LR(1)
//! closure lookaheads; FOLLOW is computed for reporting only.

use crate::grammar::Grammar;
use crate::symbol::Symbol;
use std::collections::{BTreeMap, BTreeSet};

/// Type alias for FIRST sets mapping.
pub type FirstSets = BTreeMap<Symbol, BTreeSet<Symbol>>;

/// Type alias for FOLLOW sets mapping.
pub type FollowSets = BTreeMap<Symbol, BTreeSet<Symbol>>;

/// Computes the FIRST sets for all grammar symbols plus `$`.
///
/// # Algorithm
/// 1. For terminals: FIRST(a) = {a}; FIRST($) = {$}
/// 2. For nonterminals A with production A → X₁X₂...Xₙ:
///    - Add FIRST(X₁) - {ε} to FIRST(A)
///    - If ε ∈ FIRST(X₁), add FIRST(X₂) - {ε}, and so on
///    - If ε ∈ FIRST(Xᵢ) for all i (vacuously for an empty body), add ε
/// 3. Repeat until no changes (fixed-point iteration)
pub fn compute_first_sets(grammar: &Grammar) -> FirstSets {
    let mut first_sets: FirstSets = FirstSets::new();

    for terminal in grammar.terminals() {
        first_sets.insert(terminal.clone(), BTreeSet::from([terminal.clone()]));
    }
    first_sets.insert(
        Symbol::end_marker(),
        BTreeSet::from([Symbol::end_marker()]),
    );
    for nonterminal in grammar.nonterminals() {
        first_sets.insert(nonterminal.clone(), BTreeSet::new());
    }

    let mut changed = true;
    while changed {
        changed = false;

        for production in grammar.productions() {
            let body_first = first_of_sequence(&first_sets, &production.body);

            let current = first_sets.get_mut(&production.head).unwrap();
            let before = current.len();
            current.extend(body_first);
            if current.len() != before {
                changed = true;
            }
        }
    }

    first_sets
}

/// Computes FIRST of a symbol sequence.
///
/// Consumes symbols left-to-right, accumulating FIRST(symbol) minus ε, and
/// stops at the first symbol whose FIRST does not contain ε. If every symbol
/// contained ε (vacuously for the empty sequence), ε is added to the result.
///
/// `$` in the sequence contributes `$` and terminates: it is a hard terminal
/// lookahead and never derives anything further. This is what makes the
/// CLOSURE context βa work when β is empty.
pub fn first_of_sequence(first_sets: &FirstSets, symbols: &[Symbol]) -> BTreeSet<Symbol> {
    let mut result = BTreeSet::new();
    let mut derives_empty = true;

    for symbol in symbols {
        if symbol.is_end_marker() {
            result.insert(symbol.clone());
            derives_empty = false;
            break;
        }

        let first_sym = first_sets.get(symbol).cloned().unwrap_or_default();
        for sym in &first_sym {
            if !sym.is_epsilon() {
                result.insert(sym.clone());
            }
        }

        if !first_sym.contains(&Symbol::epsilon()) {
            derives_empty = false;
            break;
        }
    }

    if derives_empty {
        result.insert(Symbol::epsilon());
    }

    result
}

/// Computes the FOLLOW sets for all nonterminals.
///
/// # Algorithm
/// 1. FOLLOW(start) contains $
/// 2. For production A → αBβ:
///    - Add FIRST(β) - {ε} to FOLLOW(B)
///    - If ε ∈ FIRST(β) (or β is empty), add FOLLOW(A) to FOLLOW(B)
/// 3. Repeat until no changes (fixed-point iteration)
pub fn compute_follow_sets(grammar: &Grammar, first_sets: &FirstSets) -> FollowSets {
    let mut follow_sets: FollowSets = FollowSets::new();

    for nonterminal in grammar.nonterminals() {
        follow_sets.insert(nonterminal.clone(), BTreeSet::new());
    }
    follow_sets
        .get_mut(grammar.start_symbol())
        .unwrap()
        .insert(Symbol::end_marker());

    let mut changed = true;
    while changed {
        changed = false;

        for production in grammar.productions() {
            for (i, symbol) in production.body.iter().enumerate() {
                if !grammar.nonterminals().contains(symbol) {
                    continue;
                }

                let beta = &production.body[i + 1..];
                let first_beta = first_of_sequence(first_sets, beta);

                let mut additions: BTreeSet<Symbol> = first_beta
                    .iter()
                    .filter(|s| !s.is_epsilon())
                    .cloned()
                    .collect();
                if first_beta.contains(&Symbol::epsilon()) {
                    additions.extend(follow_sets.get(&production.head).unwrap().clone());
                }

                let current = follow_sets.get_mut(symbol).unwrap();
                let before = current.len();
                current.extend(additions);
                if current.len() != before {
                    changed = true;
                }
            }
        }
    }

    follow_sets
}
