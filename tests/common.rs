//! Common test utilities for the hexapawn test suite.
#![allow(dead_code)]

use hexapawn::BoardState;

pub fn approx_eq(a: f64, b: f64) -> bool {
    approx_eq_tol(a, b, 1e-9)
}

pub fn approx_eq_tol(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

/// Parse a board label, panicking on malformed test input.
pub fn board(label: &str) -> BoardState {
    BoardState::from_label(label).unwrap_or_else(|e| panic!("bad test label '{label}': {e}"))
}

/// Labels of the successors of `state`, sorted.
pub fn successor_labels(state: &BoardState) -> Vec<String> {
    let mut labels: Vec<String> = state.next_states().map(|s| s.label()).collect();
    labels.sort();
    labels
}
