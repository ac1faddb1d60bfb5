//! Error types for the hexapawn crate

use thiserror::Error;

/// Main error type for the hexapawn crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("position ({x}, {y}) is off the 3x3 board")]
    InvalidPosition { x: u8, y: u8 },

    #[error("square ({x}, {y}) is occupied by more than one piece")]
    OverlappingPieces { x: u8, y: u8 },

    #[error("too many {color} pieces: {count} (at most 3)")]
    TooManyPieces { color: String, count: usize },

    #[error("both sides stand on their goal rank")]
    ConflictingAdvance,

    #[error("invalid label format '{label}' (expected format: '{expected}')")]
    InvalidLabelFormat { label: String, expected: String },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid side to move '{side}' in label '{label}' (expected 'B' or 'W')")]
    InvalidSideToMove { side: String, label: String },

    #[error("invalid learning parameter {name} = {value}: {reason}")]
    InvalidLearningParam {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("observer '{observer}' state is poisoned")]
    ObserverPoisoned { observer: &'static str },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
