//! Text output for CLI commands

use crate::{game::TurnReport, learning::LearningStore};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print the board a turn started from and every candidate with its chance
pub fn print_turn(report: &TurnReport) {
    println!("Current player: {}", report.current.to_move());
    println!("Current state (state {}):", report.ply + 1);
    println!("{}", report.current.grid().indented(1));

    for (index, candidate) in report.candidates.iter().enumerate() {
        let marker = if report.chosen == Some(index) {
            " <- chosen"
        } else {
            ""
        };
        println!(
            "    Next state {} (chance {:.1}%, weight {:.2}){marker}:",
            index + 1,
            candidate.chance * 100.0,
            candidate.weight
        );
        println!("{}", candidate.state.grid().indented(2));
    }

    if let Some(outcome) = report.outcome {
        println!("Player {} wins! ({})", outcome.winner, outcome.reason);
    }
}

/// Print the `limit` heaviest states in the store
pub fn print_strongest_states(store: &LearningStore, limit: usize) {
    let mut records: Vec<_> = store.iter().collect();
    records.sort_by(|a, b| b.weight().total_cmp(&a.weight()));

    for record in records.into_iter().take(limit) {
        println!(
            "  {}  weight {:>6.2}  (moved into by {})",
            record.state().label(),
            record.weight(),
            record.mover()
        );
    }
}
