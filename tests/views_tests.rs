//! Unit tests for the tabular and textual projections

use lr1_analyzer::analyzer::Lr1Parser;
use lr1_analyzer::first_follow::{compute_first_sets, compute_follow_sets};
use lr1_analyzer::grammar::Grammar;
use lr1_analyzer::items::Item;
use lr1_analyzer::symbol::Symbol;
use lr1_analyzer::views;
use pretty_assertions::assert_eq;

fn build(text: &str) -> Lr1Parser {
    let grammar = Grammar::parse(text).unwrap();
    let first_sets = compute_first_sets(&grammar);
    Lr1Parser::build(grammar, &first_sets)
}

#[test]
fn test_first_follow_table_rows_sorted() {
    let grammar = Grammar::parse("S -> C C\nC -> c C | d").unwrap();
    let first_sets = compute_first_sets(&grammar);
    let follow_sets = compute_follow_sets(&grammar, &first_sets);

    let table = views::first_follow_table(&first_sets, &follow_sets, grammar.nonterminals());

    assert_eq!(table.headers, vec!["Symbol", "FIRST", "FOLLOW"]);
    assert_eq!(
        table.rows,
        vec![
            vec!["C".to_string(), "c, d".to_string(), "$, c, d".to_string()],
            vec!["S".to_string(), "c, d".to_string(), "$".to_string()],
        ]
    );
}

#[test]
fn test_action_table_shape_and_cells() {
    let grammar = Grammar::parse("S -> C C\nC -> c C | d").unwrap();
    let terminals = grammar.terminals().clone();
    let first_sets = compute_first_sets(&grammar);
    let parser = Lr1Parser::build(grammar, &first_sets);

    let n_states = parser.states().len();
    let table = views::action_table(parser.action_table(), &terminals, n_states);

    // Terminals sorted lexicographically, then $.
    assert_eq!(table.headers, vec!["state", "c", "d", "$"]);
    assert_eq!(table.rows.len(), n_states);

    let mut accept_cells = 0;
    for (i, row) in table.rows.iter().enumerate() {
        assert_eq!(row[0], i.to_string());
        for cell in &row[1..] {
            assert!(
                cell.is_empty()
                    || cell == "acc"
                    || cell.starts_with('s')
                    || cell.starts_with('r'),
                "unexpected cell: {:?}",
                cell
            );
            if cell == "acc" {
                accept_cells += 1;
            }
        }
    }
    assert_eq!(accept_cells, 1);
}

#[test]
fn test_goto_table_shape() {
    let grammar = Grammar::parse("S -> C C\nC -> c C | d").unwrap();
    let nonterminals = grammar.nonterminals().clone();
    let first_sets = compute_first_sets(&grammar);
    let parser = Lr1Parser::build(grammar, &first_sets);

    let n_states = parser.states().len();
    let table = views::goto_table(parser.goto_table(), &nonterminals, n_states);

    assert_eq!(table.headers, vec!["state", "C", "S"]);
    assert_eq!(table.rows.len(), n_states);
    // State 0 has transitions on both S and C.
    assert!(!table.rows[0][1].is_empty());
    assert!(!table.rows[0][2].is_empty());
}

#[test]
fn test_format_item_dot_placement() {
    let grammar = Grammar::parse("S -> C C\nC -> c C | d").unwrap();
    let aug = grammar.augment();

    assert_eq!(
        views::format_item(&Item::new(0, 0, Symbol::end_marker()), &aug),
        "[S → • C C, $]"
    );
    assert_eq!(
        views::format_item(&Item::new(1, 1, Symbol::new("d")), &aug),
        "[C → c • C, d]"
    );
    assert_eq!(
        views::format_item(&Item::new(2, 1, Symbol::end_marker()), &aug),
        "[C → d •, $]"
    );
}

#[test]
fn test_states_to_string_renders_initial_state() {
    let parser = build("S -> C C\nC -> c C | d");

    let rendered = views::states_to_string(parser.states(), parser.grammar());
    assert!(rendered.starts_with("I0: "));
    assert!(rendered.contains("[S' → • S, $]"));
    assert!(rendered.contains("\n\nI1: "));
}

#[test]
fn test_trace_table_carries_frames() {
    let parser = build("S -> C C\nC -> c C | d");
    let (frames, _) = parser.parse("d d");

    let table = views::trace_table(&frames);
    assert_eq!(
        table.headers,
        vec!["Stack (states || symbols)", "Input", "Action"]
    );
    assert_eq!(table.rows.len(), frames.len());
    assert_eq!(table.rows[0][1], "d d $");
}

#[test]
fn test_table_display_alignment() {
    let table = views::Table {
        headers: vec!["a".into(), "bb".into()],
        rows: vec![vec!["xxx".into(), "y".into()]],
    };

    assert_eq!(table.to_string(), "a    bb\nxxx  y\n");
}
