//! Tabular and textual projections of the analyzer's outputs.
//!
//! Everything here is a stateless converter over the immutable core
//! artifacts; for a given grammar the rendered output is byte-for-byte
//! reproducible.

use crate::analyzer::TraceFrame;
use crate::first_follow::{FirstSets, FollowSets};
use crate::grammar::AugmentedGrammar;
use crate::items::{Item, ItemSet};
use crate::symbol::Symbol;
use crate::tables::{ActionTable, GotoTable};
use std::collections::BTreeSet;
use std::fmt;

/// A plain table of strings: a header row plus data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        writeln!(f, "{}", render_row(&self.headers, &widths))?;
        for row in &self.rows {
            writeln!(f, "{}", render_row(row, &widths))?;
        }
        Ok(())
    }
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .enumerate()
        .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

/// One row per nonterminal (sorted), with its FIRST and FOLLOW sets rendered
/// as comma-joined sorted elements.
pub fn first_follow_table(
    first_sets: &FirstSets,
    follow_sets: &FollowSets,
    nonterminals: &BTreeSet<Symbol>,
) -> Table {
    let join = |set: Option<&BTreeSet<Symbol>>| -> String {
        set.map(|s| {
            s.iter()
                .map(|sym| sym.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
    };

    let rows = nonterminals
        .iter()
        .map(|nt| {
            vec![
                nt.to_string(),
                join(first_sets.get(nt)),
                join(follow_sets.get(nt)),
            ]
        })
        .collect();

    Table {
        headers: vec!["Symbol".into(), "FIRST".into(), "FOLLOW".into()],
        rows,
    }
}

/// ACTION table view: one row per state; columns are the terminals in
/// lexicographic order followed by `$`; cells are `s<n>`, `r<n>`, `acc`, or
/// empty.
pub fn action_table(
    action: &ActionTable,
    terminals: &BTreeSet<Symbol>,
    n_states: usize,
) -> Table {
    let mut columns: Vec<Symbol> = terminals.iter().cloned().collect();
    columns.push(Symbol::end_marker());

    let mut headers = vec!["state".to_string()];
    headers.extend(columns.iter().map(|c| c.to_string()));

    let rows = (0..n_states)
        .map(|state| {
            let mut row = vec![state.to_string()];
            for column in &columns {
                let cell = action
                    .get(&(state, column.clone()))
                    .map(|a| a.to_string())
                    .unwrap_or_default();
                row.push(cell);
            }
            row
        })
        .collect();

    Table { headers, rows }
}

/// GOTO table view: one row per state; columns are the nonterminals in
/// lexicographic order; cells are the target state index or empty.
pub fn goto_table(goto: &GotoTable, nonterminals: &BTreeSet<Symbol>, n_states: usize) -> Table {
    let mut headers = vec!["state".to_string()];
    headers.extend(nonterminals.iter().map(|nt| nt.to_string()));

    let rows = (0..n_states)
        .map(|state| {
            let mut row = vec![state.to_string()];
            for nt in nonterminals {
                let cell = goto
                    .get(&(state, nt.clone()))
                    .map(|target| target.to_string())
                    .unwrap_or_default();
                row.push(cell);
            }
            row
        })
        .collect();

    Table { headers, rows }
}

/// Renders an item as `[A → α • β, a]` with the dot at its position.
pub fn format_item(item: &Item, grammar: &AugmentedGrammar) -> String {
    let production = grammar.production(item.production);
    let mut parts: Vec<&str> = production.body.iter().map(|s| s.as_str()).collect();
    parts.insert(item.dot, "•");
    format!(
        "[{} → {}, {}]",
        production.head,
        parts.join(" "),
        item.lookahead
    )
}

/// Renders the canonical collection: one `I<i>: [item]` line per item,
/// items in canonical order, states separated by blank lines.
pub fn states_to_string(states: &[ItemSet], grammar: &AugmentedGrammar) -> String {
    states
        .iter()
        .enumerate()
        .map(|(i, state)| {
            state
                .iter()
                .map(|item| format!("I{}: {}", i, format_item(item, grammar)))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders a trace as a three-column table.
pub fn trace_table(frames: &[TraceFrame]) -> Table {
    Table {
        headers: vec![
            "Stack (states || symbols)".into(),
            "Input".into(),
            "Action".into(),
        ],
        rows: frames
            .iter()
            .map(|f| vec![f.stack.clone(), f.input.clone(), f.action.clone()])
            .collect(),
    }
}
