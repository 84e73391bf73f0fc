//! LR(1) Analyzer
//!
//! Reads a context-free grammar and token sequences from stdin, reports
//! FIRST/FOLLOW sets, the canonical LR(1) collection, the ACTION/GOTO
//! tables with any conflicts, and a shift-reduce trace plus parse tree for
//! each input.

use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = lr1_analyzer::cli::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
