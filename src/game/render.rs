//! Text projection of a board for any renderer

use std::fmt;

use super::board::{BoardState, Color, Position, SIZE};

/// Contents of a single square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    White,
    Black,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::White => 'W',
            Cell::Black => 'B',
        }
    }
}

impl From<Option<Color>> for Cell {
    fn from(occupant: Option<Color>) -> Self {
        match occupant {
            None => Cell::Empty,
            Some(Color::White) => Cell::White,
            Some(Color::Black) => Cell::Black,
        }
    }
}

/// Row-major 3x3 grid; row 0 is printed first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    rows: [[Cell; SIZE as usize]; SIZE as usize],
}

impl Grid {
    pub fn rows(&self) -> &[[Cell; SIZE as usize]; SIZE as usize] {
        &self.rows
    }

    pub fn cell(&self, square: Position) -> Cell {
        self.rows[usize::from(square.y())][usize::from(square.x())]
    }

    /// Render with every row prefixed by `indent` levels of four spaces
    pub fn indented(&self, indent: usize) -> String {
        let prefix = "    ".repeat(indent);
        self.rows
            .iter()
            .map(|row| {
                let cells: Vec<String> = row.iter().map(|c| c.to_char().to_string()).collect();
                format!("{prefix}{}", cells.join(" "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.indented(0))
    }
}

impl BoardState {
    /// Project the board onto a grid of cells
    pub fn grid(&self) -> Grid {
        let mut rows = [[Cell::Empty; SIZE as usize]; SIZE as usize];
        for piece in self.pieces() {
            rows[usize::from(piece.position.y())][usize::from(piece.position.x())] =
                Cell::from(Some(piece.color));
        }
        Grid { rows }
    }
}
