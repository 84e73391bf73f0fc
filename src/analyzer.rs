//! LR(1) parser facade and the shift-reduce driver.
//!
//! [`Lr1Parser::build`] runs the whole pipeline once per grammar
//! (augmentation, canonical collection, table emission); the artifacts are
//! read-only afterwards. [`Lr1Parser::parse`] simulates the shift-reduce
//! recognition of a token sequence, producing a step-by-step trace and, on
//! acceptance, the parse tree of the derivation.

use crate::automaton::CanonicalCollection;
use crate::first_follow::FirstSets;
use crate::grammar::{AugmentedGrammar, Grammar};
use crate::items::ItemSet;
use crate::parse_tree::ParseNode;
use crate::symbol::{EPSILON, Symbol, symbols_to_string};
use crate::tables::{Action, ActionTable, Conflict, GotoTable, build_tables};
use log::debug;

/// One step of the shift-reduce simulation.
///
/// The stack field snapshots state stack and symbol stack before the action
/// as `states || symbols`; the input field is the remaining input from the
/// cursor, `$` sentinel included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceFrame {
    pub stack: String,
    pub input: String,
    pub action: String,
}

impl TraceFrame {
    fn new(stack: impl Into<String>, input: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            stack: stack.into(),
            input: input.into(),
            action: action.into(),
        }
    }
}

/// An LR(1) parser for a fixed grammar.
///
/// Construction never fails: a grammar that is not LR(1) still yields
/// deterministic tables, with the offending entries recorded in
/// [`conflicts`](Lr1Parser::conflicts).
#[derive(Debug)]
pub struct Lr1Parser {
    grammar: AugmentedGrammar,
    states: Vec<ItemSet>,
    action_table: ActionTable,
    goto_table: GotoTable,
    conflicts: Vec<Conflict>,
}

impl Lr1Parser {
    /// Builds the parser: augments the grammar, constructs the canonical
    /// collection, and emits the ACTION/GOTO tables.
    pub fn build(grammar: Grammar, first_sets: &FirstSets) -> Self {
        let augmented = grammar.augment();
        let collection = CanonicalCollection::build(&augmented, first_sets);
        let (action_table, goto_table, conflicts) =
            build_tables(&augmented, first_sets, &collection);
        debug!(
            "tables built: {} states, {} conflicts",
            collection.states().len(),
            conflicts.len()
        );

        Self {
            grammar: augmented,
            states: collection.states().to_vec(),
            action_table,
            goto_table,
            conflicts,
        }
    }

    /// Returns the augmented grammar the tables were built from.
    pub fn grammar(&self) -> &AugmentedGrammar {
        &self.grammar
    }

    /// Returns the canonical collection states; state 0 is initial.
    pub fn states(&self) -> &[ItemSet] {
        &self.states
    }

    /// Returns the ACTION table.
    pub fn action_table(&self) -> &ActionTable {
        &self.action_table
    }

    /// Returns the GOTO table.
    pub fn goto_table(&self) -> &GotoTable {
        &self.goto_table
    }

    /// Returns the recorded table conflicts, empty iff the grammar is LR(1).
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// Checks whether the grammar is LR(1).
    pub fn is_lr1(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Simulates the shift-reduce recognition of a token sequence.
    ///
    /// The input is split on whitespace and `$` is appended as sentinel.
    /// Returns the ordered trace and, on acceptance, the parse-tree root.
    /// Rejection is not an error: the trace ends with a frame naming the
    /// missing ACTION/GOTO entry followed by a rejection marker, and the
    /// tree is `None`.
    pub fn parse(&self, input: &str) -> (Vec<TraceFrame>, Option<ParseNode>) {
        let mut tokens: Vec<Symbol> = input.split_whitespace().map(Symbol::new).collect();
        tokens.push(Symbol::end_marker());

        let mut state_stack: Vec<usize> = vec![0];
        let mut symbol_stack: Vec<Symbol> = Vec::new();
        let mut node_stack: Vec<ParseNode> = Vec::new();
        let mut pos = 0;
        let mut frames = Vec::new();

        loop {
            let state = *state_stack.last().unwrap();
            let lookahead = &tokens[pos];
            let stack_show = render_stacks(&state_stack, &symbol_stack);
            let input_show = symbols_to_string(&tokens[pos..]);

            let Some(&action) = self.action_table.get(&(state, lookahead.clone())) else {
                frames.push(TraceFrame::new(
                    stack_show,
                    input_show,
                    format!("Error: no ACTION[{}, {}]", state, lookahead),
                ));
                frames.push(TraceFrame::new("", "", "INPUT REJECTED"));
                return (frames, None);
            };

            match action {
                Action::Shift(next_state) => {
                    frames.push(TraceFrame::new(
                        stack_show,
                        input_show,
                        format!("shift -> s{}", next_state),
                    ));
                    state_stack.push(next_state);
                    symbol_stack.push(lookahead.clone());
                    node_stack.push(ParseNode::leaf(lookahead.clone()));
                    pos += 1;
                }
                Action::Reduce(prod_idx) => {
                    let production = self.grammar.production(prod_idx);
                    let arity = production.body.len();

                    // The popped nodes keep their original left-to-right
                    // order as children of the new node.
                    let children = node_stack.split_off(node_stack.len() - arity);
                    state_stack.truncate(state_stack.len() - arity);
                    symbol_stack.truncate(symbol_stack.len() - arity);

                    let uncovered = *state_stack.last().unwrap();
                    let Some(&target) = self
                        .goto_table
                        .get(&(uncovered, production.head.clone()))
                    else {
                        frames.push(TraceFrame::new(
                            stack_show,
                            input_show,
                            format!("Error: no GOTO[{}, {}]", uncovered, production.head),
                        ));
                        frames.push(TraceFrame::new("", "", "INPUT REJECTED"));
                        return (frames, None);
                    };

                    node_stack.push(ParseNode::internal(production.head.clone(), children));
                    state_stack.push(target);
                    symbol_stack.push(production.head.clone());

                    let body_show = if production.body.is_empty() {
                        EPSILON.to_string()
                    } else {
                        symbols_to_string(&production.body)
                    };
                    frames.push(TraceFrame::new(
                        stack_show,
                        input_show,
                        format!("reduce {} → {}; goto s{}", production.head, body_show, target),
                    ));
                }
                Action::Accept => {
                    frames.push(TraceFrame::new(stack_show, input_show, "ACCEPT"));
                    frames.push(TraceFrame::new("", "", "INPUT ACCEPTED"));
                    return (frames, node_stack.pop());
                }
            }
        }
    }

    /// Checks whether the parser accepts a token sequence.
    pub fn accepts(&self, input: &str) -> bool {
        self.parse(input).1.is_some()
    }
}

fn render_stacks(state_stack: &[usize], symbol_stack: &[Symbol]) -> String {
    let states = state_stack
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    format!("{} || {}", states, symbols_to_string(symbol_stack))
}
