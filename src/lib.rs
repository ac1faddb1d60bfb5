//! Hexapawn self-play with matchbox-style learning
//!
//! This crate provides:
//! - Hexapawn rules on a 3x3 board: move generation, captures, terminal detection
//! - A content-addressed learning store that weights every state ever adopted
//! - Roulette-wheel selection of the next state from those weights
//! - An episode state machine and a multi-episode training pipeline
//! - A CLI for batch training and for watching episodes turn by turn

pub mod cli;
pub mod error;
pub mod game;
pub mod identifiers;
pub mod learning;
pub mod pipeline;
pub mod ports;
pub mod selector;
pub mod types;

pub use error::{Error, Result};
pub use game::{BoardState, Color, Episode, Outcome, Piece, Position, TerminalReason};
pub use identifiers::{EpisodeId, StateKey};
pub use learning::{LearningParams, LearningStore};
