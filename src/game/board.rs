//! Board state representation, move generation and terminal checks

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use super::episode::{Outcome, TerminalReason};
use crate::identifiers::StateKey;

/// Width and height of the board
pub const SIZE: u8 = 3;

/// A side in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Get the opposing side
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Row delta of a single forward step
    pub fn forward(self) -> i8 {
        match self {
            Color::Black => 1,
            Color::White => -1,
        }
    }

    /// Row on which this side starts
    pub fn home_row(self) -> u8 {
        self.opponent().goal_row()
    }

    /// Row this side must reach to win
    pub fn goal_row(self) -> u8 {
        match self {
            Color::Black => SIZE - 1,
            Color::White => 0,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Color::Black => 'B',
            Color::White => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'B' | 'b' => Some(Color::Black),
            'W' | 'w' => Some(Color::White),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("Black"),
            Color::White => f.write_str("White"),
        }
    }
}

/// A square on the 3x3 board; `y` is the row, 0 at the top (Black's home row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// Create a position, validating it lies on the board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPosition`] if either coordinate is >= 3.
    pub fn new(x: u8, y: u8) -> Result<Self, crate::Error> {
        if x < SIZE && y < SIZE {
            Ok(Position { x, y })
        } else {
            Err(crate::Error::InvalidPosition { x, y })
        }
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    /// Row-major index (0-8)
    pub fn index(&self) -> usize {
        usize::from(self.y) * usize::from(SIZE) + usize::from(self.x)
    }

    /// Shift by a delta, or `None` if the result leaves the board
    pub fn offset(self, dx: i8, dy: i8) -> Option<Position> {
        let x = self.x.checked_add_signed(dx).filter(|&x| x < SIZE)?;
        let y = self.y.checked_add_signed(dy).filter(|&y| y < SIZE)?;
        Some(Position { x, y })
    }

    /// All nine squares in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..SIZE).flat_map(|y| (0..SIZE).map(move |x| Position { x, y }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A pawn of a given colour standing on a square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub position: Position,
}

impl Piece {
    pub fn new(color: Color, position: Position) -> Self {
        Piece { color, position }
    }
}

/// A legal pawn move produced by [`BoardState::legal_moves`].
///
/// Moves can only be obtained from move generation, so every `Move` applied
/// to the state that produced it is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    piece: Piece,
    to: Position,
    capture: Option<Piece>,
}

impl Move {
    /// The pawn before it moves
    pub fn piece(&self) -> Piece {
        self.piece
    }

    pub fn from(&self) -> Position {
        self.piece.position
    }

    pub fn to(&self) -> Position {
        self.to
    }

    /// The opponent pawn removed by this move, if it is a diagonal capture
    pub fn captured(&self) -> Option<Piece> {
        self.capture
    }

    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }
}

/// Pieces on the board plus the side to move.
///
/// Equality and hashing cover exactly the piece set and the side to move;
/// learned weights live in [`crate::learning::LearningStore`], keyed by
/// [`BoardState::key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pieces: BTreeSet<Piece>,
    to_move: Color,
}

impl BoardState {
    /// The canonical starting position: Black on row 0, White on row 2, White to move
    pub fn initial() -> Self {
        let pieces = [Color::Black, Color::White]
            .into_iter()
            .flat_map(|color| {
                (0..SIZE).map(move |x| {
                    Piece::new(
                        color,
                        Position {
                            x,
                            y: color.home_row(),
                        },
                    )
                })
            })
            .collect();

        BoardState {
            pieces,
            to_move: Color::White,
        }
    }

    /// Build a state from an arbitrary piece list.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Two pieces share a square
    /// - Either side has more than three pieces
    /// - Both sides stand on their goal row at once
    pub fn from_pieces<I>(pieces: I, to_move: Color) -> Result<Self, crate::Error>
    where
        I: IntoIterator<Item = Piece>,
    {
        let mut occupied = [false; (SIZE * SIZE) as usize];
        let mut set = BTreeSet::new();
        for piece in pieces {
            let slot = &mut occupied[piece.position.index()];
            if *slot {
                return Err(crate::Error::OverlappingPieces {
                    x: piece.position.x,
                    y: piece.position.y,
                });
            }
            *slot = true;
            set.insert(piece);
        }

        let board = BoardState {
            pieces: set,
            to_move,
        };

        for color in [Color::Black, Color::White] {
            let count = board.count(color);
            if count > usize::from(SIZE) {
                return Err(crate::Error::TooManyPieces {
                    color: color.to_string(),
                    count,
                });
            }
        }

        if board.reached_goal(Color::White) && board.reached_goal(Color::Black) {
            return Err(crate::Error::ConflictingAdvance);
        }

        Ok(board)
    }

    /// Parse a label of the form `BBB...WWW_W` (row-major cells, then side to move).
    ///
    /// # Errors
    ///
    /// Returns error if the label is malformed or describes an invalid board.
    pub fn from_label(label: &str) -> Result<Self, crate::Error> {
        let invalid_format = || crate::Error::InvalidLabelFormat {
            label: label.to_string(),
            expected: "BBB...WWW_W".to_string(),
        };

        let (cells, side) = label.split_once('_').ok_or_else(invalid_format)?;
        if cells.chars().count() != usize::from(SIZE * SIZE) {
            return Err(invalid_format());
        }

        let mut side_chars = side.chars();
        let to_move = match (side_chars.next().and_then(Color::from_char), side_chars.next()) {
            (Some(color), None) => color,
            _ => {
                return Err(crate::Error::InvalidSideToMove {
                    side: side.to_string(),
                    label: label.to_string(),
                });
            }
        };

        let mut pieces = Vec::new();
        for (square, c) in Position::all().zip(cells.chars()) {
            match c {
                '.' => {}
                _ => {
                    let color =
                        Color::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                            character: c,
                            position: square.index(),
                            context: label.to_string(),
                        })?;
                    pieces.push(Piece::new(color, square));
                }
            }
        }

        Self::from_pieces(pieces, to_move)
    }

    /// Row-major cell encoding followed by `_` and the side to move
    pub fn label(&self) -> String {
        let mut label: String = Position::all()
            .map(|square| self.color_at(square).map_or('.', Color::to_char))
            .collect();
        label.push('_');
        label.push(self.to_move.to_char());
        label
    }

    /// Content address used by the learning store
    pub fn key(&self) -> StateKey {
        StateKey::new(self.label())
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// The side that moved into this state
    pub fn mover(&self) -> Color {
        self.to_move.opponent()
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter()
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Number of pieces of one colour
    pub fn count(&self, color: Color) -> usize {
        self.pieces.iter().filter(|p| p.color == color).count()
    }

    /// Colour of the piece on a square, if any
    pub fn color_at(&self, square: Position) -> Option<Color> {
        self.pieces
            .iter()
            .find(|p| p.position == square)
            .map(|p| p.color)
    }

    /// Enumerate legal moves for the side to move.
    ///
    /// Each pawn may step straight ahead onto an empty square, or diagonally
    /// forward onto a square holding an opponent pawn (capturing it).
    pub fn legal_moves(&self) -> impl Iterator<Item = Move> + '_ {
        let side = self.to_move;
        self.pieces
            .iter()
            .filter(move |piece| piece.color == side)
            .flat_map(move |&piece| {
                [0, -1, 1].into_iter().filter_map(move |dx| {
                    let to = piece.position.offset(dx, side.forward())?;
                    let occupant = self.color_at(to);
                    if dx == 0 {
                        occupant.is_none().then_some(Move {
                            piece,
                            to,
                            capture: None,
                        })
                    } else {
                        (occupant == Some(side.opponent())).then_some(Move {
                            piece,
                            to,
                            capture: Some(Piece::new(side.opponent(), to)),
                        })
                    }
                })
            })
    }

    /// Lazily produce every legal successor state
    pub fn next_states(&self) -> impl Iterator<Item = BoardState> + '_ {
        self.legal_moves().map(move |mv| self.apply(&mv))
    }

    /// Legal moves paired with the states they lead to
    pub fn successors(&self) -> impl Iterator<Item = (Move, BoardState)> + '_ {
        self.legal_moves().map(move |mv| (mv, self.apply(&mv)))
    }

    fn apply(&self, mv: &Move) -> BoardState {
        let mut pieces = self.pieces.clone();
        pieces.remove(&mv.piece);
        if let Some(captured) = mv.capture {
            pieces.remove(&captured);
        }
        pieces.insert(Piece::new(mv.piece.color, mv.to));

        BoardState {
            pieces,
            to_move: self.to_move.opponent(),
        }
    }

    fn reached_goal(&self, color: Color) -> bool {
        self.pieces
            .iter()
            .any(|p| p.color == color && p.position.y == color.goal_row())
    }

    /// Winner by reaching the far row; White is checked first.
    pub fn winner_by_advance(&self) -> Option<Color> {
        let white = self.reached_goal(Color::White);
        let black = self.reached_goal(Color::Black);
        debug_assert!(
            !(white && black),
            "both sides on their goal row in {}",
            self.label()
        );

        if white {
            Some(Color::White)
        } else if black {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Terminal status of this state with the side to move about to play.
    ///
    /// Advance is checked before move generation; a side with no legal move
    /// loses to the side that just moved.
    pub fn terminal_status(&self) -> Option<Outcome> {
        if let Some(winner) = self.winner_by_advance() {
            return Some(Outcome::new(winner, TerminalReason::LastRankReached));
        }
        if self.legal_moves().next().is_none() {
            return Some(Outcome::new(self.mover(), TerminalReason::NoMovesLeft));
        }
        None
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal_status().is_some()
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
