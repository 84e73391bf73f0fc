//! CLI runner for the LR(1) analyzer.
//!
//! Reads a grammar from stdin (lines up to the first blank line or EOF),
//! prints the full analysis report, then parses each remaining non-empty
//! line as a token sequence.

use crate::analyzer::Lr1Parser;
use crate::error::Result;
use crate::first_follow::{compute_first_sets, compute_follow_sets};
use crate::grammar::Grammar;
use crate::views;
use std::io::{self, BufRead};

/// Main CLI runner.
pub fn run() -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let grammar_text = read_grammar_text(&mut lines)?;
    let grammar = Grammar::parse(&grammar_text)?;

    let first_sets = compute_first_sets(&grammar);
    let follow_sets = compute_follow_sets(&grammar, &first_sets);
    let nonterminals = grammar.nonterminals().clone();
    let terminals = grammar.terminals().clone();
    let parser = Lr1Parser::build(grammar, &first_sets);

    println!("Grammar (augmented):");
    for (i, prod) in parser.grammar().productions().iter().enumerate() {
        println!("{}: {}", i, prod);
    }

    println!("\nFIRST / FOLLOW:");
    print!(
        "{}",
        views::first_follow_table(&first_sets, &follow_sets, &nonterminals)
    );

    println!("\nLR(1) item sets:");
    println!("{}", views::states_to_string(parser.states(), parser.grammar()));

    let n_states = parser.states().len();
    println!("\nACTION:");
    print!(
        "{}",
        views::action_table(parser.action_table(), &terminals, n_states)
    );
    println!("\nGOTO:");
    print!(
        "{}",
        views::goto_table(parser.goto_table(), &nonterminals, n_states)
    );

    if parser.is_lr1() {
        println!("\nNo conflicts: the grammar is LR(1).");
    } else {
        println!("\nThe grammar is NOT LR(1):");
        for conflict in parser.conflicts() {
            println!("  {}", conflict);
        }
    }

    parse_inputs(&parser, &mut lines)?;

    Ok(())
}

/// Reads grammar lines until the first blank line or EOF.
fn read_grammar_text<R: BufRead>(lines: &mut io::Lines<R>) -> Result<String> {
    let mut text = String::new();
    for line in lines.by_ref() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        text.push_str(&line);
        text.push('\n');
    }
    Ok(text)
}

/// Parses each remaining non-empty line as a token sequence and prints the
/// trace, the verdict, and the parse tree on acceptance.
fn parse_inputs<R: BufRead>(parser: &Lr1Parser, lines: &mut io::Lines<R>) -> Result<()> {
    for line in lines.by_ref() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        println!("\nParsing: {}", input);
        let (frames, tree) = parser.parse(input);
        print!("{}", views::trace_table(&frames));

        match tree {
            Some(root) => {
                println!("accepted");
                println!("\nParse tree:");
                print!("{}", root.to_pretty_text());
                println!("\n{}", root.to_dot());
            }
            None => println!("rejected"),
        }
    }
    Ok(())
}
