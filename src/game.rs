//! Hexapawn game implementation

pub mod board;
pub mod episode;
pub mod render;

pub use board::{BoardState, Color, Move, Piece, Position, SIZE};
pub use episode::{Candidate, Episode, Outcome, TerminalReason, TurnReport};
pub use render::{Cell, Grid};
