use std::fmt::Display;

use crate::core::engine::{Color, Piece, Square};
use crate::core::game::MoveRecord;

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Figure(Piece),
    /** Destination suggested by a hint query, whatever stands there */
    Hint,
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty => write!(f, "."),
            Cell::Figure(piece) => write!(f, "{piece}"),
            Cell::Hint => write!(f, "*"),
        }
    }
}

/// Rejections reported by the engine. None of them leave a trace on the
/// board or history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// Move requested from an unoccupied square.
    EmptySourceCell(Square),
    /// Move requested on a piece of the other color.
    WrongColorPiece { square: Square, expected: Color },
    /// Destination is not among the piece's valid moves.
    IllegalDestination { from: Square, to: Square },
    /// Undo requested before any move was played.
    NoHistoryToUndo,
    /// Hint requested on an empty cell or a piece of the side not to move.
    InvalidHintTarget(Square),
    /// Text or numbers that do not name a square.
    InvalidCoordinate(String),
    /// Position setup would exceed the 32 pieces of a full set.
    TooManyPieces(Square),
    /// Position setup onto a cell that is already taken.
    OccupiedSquare(Square),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::EmptySourceCell(square) => write!(f, "there is no piece on {square}"),
            EngineError::WrongColorPiece { square, expected } => {
                write!(f, "piece on {square} does not belong to {expected}")
            }
            EngineError::IllegalDestination { from, to } => {
                write!(f, "piece on {from} can't move to {to}")
            }
            EngineError::NoHistoryToUndo => write!(f, "there are no moves to undo"),
            EngineError::InvalidHintTarget(square) => {
                write!(f, "no piece of the side to move on {square}")
            }
            EngineError::InvalidCoordinate(text) => write!(f, "`{text}` is not a square"),
            EngineError::TooManyPieces(square) => {
                write!(f, "can't place a piece on {square}, the board already holds a full set")
            }
            EngineError::OccupiedSquare(square) => write!(f, "{square} is already occupied"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Everything a front end needs from a running match.
pub trait MatchInterface {
    fn cell(&self, square: Square) -> Cell;
    /** Play `start` -> `end` for `color`. Nothing changes on `Err`. */
    fn move_piece(&mut self, start: Square, end: Square, color: Color) -> Result<(), EngineError>;
    /** Take back the last accepted move and return its record. */
    fn undo_move(&mut self) -> Result<MoveRecord, EngineError>;
    fn compute_hints(&self, position: Square) -> Result<Vec<Square>, EngineError>;
    // info
    fn current_player(&self) -> Color;
}
