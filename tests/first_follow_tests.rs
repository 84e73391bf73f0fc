//! Unit tests for FIRST and FOLLOW set computation

use lr1_analyzer::first_follow::{
    compute_first_sets, compute_follow_sets, first_of_sequence,
};
use lr1_analyzer::grammar::Grammar;
use lr1_analyzer::symbol::Symbol;
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

fn set(names: &[&str]) -> BTreeSet<Symbol> {
    names.iter().map(|n| Symbol::new(*n)).collect()
}

#[test]
fn test_first_of_terminals_is_identity() {
    let grammar = Grammar::parse("S -> C C\nC -> c C | d").unwrap();
    let first_sets = compute_first_sets(&grammar);

    for terminal in grammar.terminals() {
        assert_eq!(
            first_sets.get(terminal).unwrap(),
            &BTreeSet::from([terminal.clone()])
        );
    }
    assert_eq!(
        first_sets.get(&Symbol::end_marker()).unwrap(),
        &BTreeSet::from([Symbol::end_marker()])
    );
}

#[test]
fn test_first_sets_simple() {
    let grammar = Grammar::parse("S -> C C\nC -> c C | d").unwrap();
    let first_sets = compute_first_sets(&grammar);

    assert_eq!(first_sets.get(&Symbol::new("C")).unwrap(), &set(&["c", "d"]));
    assert_eq!(first_sets.get(&Symbol::new("S")).unwrap(), &set(&["c", "d"]));
}

#[test]
fn test_first_with_epsilon() {
    let grammar = Grammar::parse("S -> A B\nA -> a | ε\nB -> b").unwrap();
    let first_sets = compute_first_sets(&grammar);

    let first_a = first_sets.get(&Symbol::new("A")).unwrap();
    assert!(first_a.contains(&Symbol::new("a")));
    assert!(first_a.contains(&Symbol::epsilon()));

    // A can vanish, so FIRST(S) sees through it to b, but S itself
    // cannot derive ε.
    let first_s = first_sets.get(&Symbol::new("S")).unwrap();
    assert!(first_s.contains(&Symbol::new("a")));
    assert!(first_s.contains(&Symbol::new("b")));
    assert!(!first_s.contains(&Symbol::epsilon()));
}

#[test]
fn test_first_covers_every_production_body() {
    let grammar = Grammar::parse("E -> E + T | T\nT -> T * F | F\nF -> ( E ) | id").unwrap();
    let first_sets = compute_first_sets(&grammar);

    for production in grammar.productions() {
        let body_first = first_of_sequence(&first_sets, &production.body);
        let head_first = first_sets.get(&production.head).unwrap();
        assert!(
            body_first.is_subset(head_first),
            "FIRST({}) not within FIRST[{}]",
            production,
            production.head
        );
    }
}

#[test]
fn test_first_of_sequence_epsilon_propagation() {
    let grammar = Grammar::parse("S -> A B\nA -> a | ε\nB -> b | ε").unwrap();
    let first_sets = compute_first_sets(&grammar);

    let seq = [Symbol::new("A"), Symbol::new("B")];
    let first = first_of_sequence(&first_sets, &seq);
    assert!(first.contains(&Symbol::new("a")));
    assert!(first.contains(&Symbol::new("b")));
    assert!(first.contains(&Symbol::epsilon()));

    // Empty sequence derives ε vacuously.
    let first = first_of_sequence(&first_sets, &[]);
    assert_eq!(first, BTreeSet::from([Symbol::epsilon()]));
}

#[test]
fn test_first_of_sequence_end_marker_short_circuit() {
    let grammar = Grammar::parse("S -> A\nA -> a | ε").unwrap();
    let first_sets = compute_first_sets(&grammar);

    // $ contributes itself and stops: no ε even though A could vanish.
    let seq = [Symbol::end_marker(), Symbol::new("A")];
    let first = first_of_sequence(&first_sets, &seq);
    assert_eq!(first, BTreeSet::from([Symbol::end_marker()]));

    // The closure context: β empty, lookahead appended.
    let seq = [Symbol::new("A"), Symbol::end_marker()];
    let first = first_of_sequence(&first_sets, &seq);
    assert!(first.contains(&Symbol::new("a")));
    assert!(first.contains(&Symbol::end_marker()));
    assert!(!first.contains(&Symbol::epsilon()));
}

#[test]
fn test_follow_start_contains_end_marker() {
    let grammar = Grammar::parse("S -> C C\nC -> c C | d").unwrap();
    let first_sets = compute_first_sets(&grammar);
    let follow_sets = compute_follow_sets(&grammar, &first_sets);

    assert!(follow_sets
        .get(&Symbol::new("S"))
        .unwrap()
        .contains(&Symbol::end_marker()));
}

#[test]
fn test_follow_sets_simple() {
    let grammar = Grammar::parse("S -> C C\nC -> c C | d").unwrap();
    let first_sets = compute_first_sets(&grammar);
    let follow_sets = compute_follow_sets(&grammar, &first_sets);

    // First C is followed by FIRST(C); last C inherits FOLLOW(S).
    let mut expected = set(&["c", "d"]);
    expected.insert(Symbol::end_marker());
    assert_eq!(follow_sets.get(&Symbol::new("C")).unwrap(), &expected);
}

#[test]
fn test_follow_expression_grammar() {
    let grammar = Grammar::parse("E -> E + T | T\nT -> T * F | F\nF -> ( E ) | id").unwrap();
    let first_sets = compute_first_sets(&grammar);
    let follow_sets = compute_follow_sets(&grammar, &first_sets);

    let follow_e = follow_sets.get(&Symbol::new("E")).unwrap();
    assert!(follow_e.contains(&Symbol::new("+")));
    assert!(follow_e.contains(&Symbol::new(")")));
    assert!(follow_e.contains(&Symbol::end_marker()));
    assert!(!follow_e.contains(&Symbol::new("*")));

    let follow_t = follow_sets.get(&Symbol::new("T")).unwrap();
    assert!(follow_t.contains(&Symbol::new("*")));
    assert!(follow_t.contains(&Symbol::new("+")));
}

#[test]
fn test_follow_through_vanishing_suffix() {
    let grammar = Grammar::parse("S -> A B\nA -> a\nB -> b | ε").unwrap();
    let first_sets = compute_first_sets(&grammar);
    let follow_sets = compute_follow_sets(&grammar, &first_sets);

    // B can vanish, so A inherits FOLLOW(S) in addition to FIRST(B).
    let follow_a = follow_sets.get(&Symbol::new("A")).unwrap();
    assert!(follow_a.contains(&Symbol::new("b")));
    assert!(follow_a.contains(&Symbol::end_marker()));
}
