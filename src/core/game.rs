use std::fmt::Display;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::core::definitions::{Cell, EngineError, MatchInterface};
use crate::core::engine::{Color, Grid, Piece, PieceKind, Square, MAX_PIECES};
use crate::core::utils::{render, ui_board};

/// One accepted move. `captured` keeps the evicted piece itself so undo can
/// put it back unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub start: Square,
    pub end: Square,
    pub captured: Option<Piece>,
}

/// Grid plus the history of accepted moves. The side to move is derived from
/// the history length: even means white.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    history: Vec<MoveRecord>,
}

impl Board {
    pub fn new() -> Board {
        let mut board = Board::empty();
        board.setup();
        board
    }

    fn empty() -> Board {
        Board {
            grid: Grid::default(),
            history: Vec::new(),
        }
    }

    /// Start composing a custom position from an empty grid.
    pub fn builder() -> BoardBuilder {
        BoardBuilder::default()
    }

    /// Reset to the initial position and forget the history.
    pub fn setup(&mut self) {
        self.grid.clear();
        self.history.clear();
        for (color, back, front) in [(Color::Black, 0, 1), (Color::White, 7, 6)] {
            for (col, kind) in PieceKind::BACK_RANK.into_iter().enumerate() {
                let col = col as u8;
                if let (Some(back), Some(front)) = (Square::new(back, col), Square::new(front, col)) {
                    self.grid.replace(back, Some(Piece::new(kind, color)));
                    self.grid.replace(front, Some(Piece::new(PieceKind::Pawn, color)));
                }
            }
        }
        trace!("Board set up with {} pieces", self.grid.piece_count());
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.grid.get(square)
    }

    pub fn piece_count(&self) -> usize {
        self.grid.piece_count()
    }

    pub fn iter_pieces(&self) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        self.grid.iter_pieces()
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /** Check the move without touching anything. */
    fn validate(&self, start: Square, end: Square, color: Color) -> Result<(), EngineError> {
        let piece = self
            .grid
            .get(start)
            .ok_or(EngineError::EmptySourceCell(start))?;
        if piece.color() != color {
            return Err(EngineError::WrongColorPiece {
                square: start,
                expected: color,
            });
        }
        if !piece.valid_moves(&self.grid, start).contains(&end) {
            return Err(EngineError::IllegalDestination {
                from: start,
                to: end,
            });
        }
        Ok(())
    }
}

/// Custom starting position. Pieces can only be added here, never to a
/// `Board` in play, and never more than [`MAX_PIECES`] of them.
#[derive(Debug, Clone, Default)]
pub struct BoardBuilder {
    grid: Grid,
}

impl BoardBuilder {
    /// Put a piece on an empty cell.
    pub fn place(&mut self, square: Square, piece: Piece) -> Result<&mut Self, EngineError> {
        if self.grid.get(square).is_some() {
            return Err(EngineError::OccupiedSquare(square));
        }
        if self.grid.piece_count() >= MAX_PIECES {
            return Err(EngineError::TooManyPieces(square));
        }
        self.grid.replace(square, Some(piece));
        Ok(self)
    }

    /// Board ready for play from the composed position, white to move.
    pub fn build(&self) -> Board {
        Board {
            grid: self.grid.clone(),
            history: Vec::new(),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl MatchInterface for Board {
    fn cell(&self, square: Square) -> Cell {
        match self.grid.get(square) {
            Some(piece) => Cell::Figure(piece.clone()),
            None => Cell::Empty,
        }
    }

    fn move_piece(&mut self, start: Square, end: Square, color: Color) -> Result<(), EngineError> {
        if let Err(err) = self.validate(start, end, color) {
            debug!("Rejected {start} -> {end} for {color}: {err}");
            return Err(err);
        }
        let piece = self.grid.take(start);
        let captured = self.grid.replace(end, piece);
        debug!("{color} played {start} -> {end}, captured: {captured:?}");
        self.history.push(MoveRecord {
            start,
            end,
            captured,
        });
        Ok(())
    }

    fn undo_move(&mut self) -> Result<MoveRecord, EngineError> {
        let record = self.history.pop().ok_or(EngineError::NoHistoryToUndo)?;
        let piece = self.grid.take(record.end);
        self.grid.replace(record.start, piece);
        self.grid.replace(record.end, record.captured.clone());
        debug!("Undid {} -> {}", record.start, record.end);
        Ok(record)
    }

    fn compute_hints(&self, position: Square) -> Result<Vec<Square>, EngineError> {
        let player = self.current_player();
        match self.grid.get(position) {
            Some(piece) if piece.color() == player => Ok(piece.valid_moves(&self.grid, position)),
            _ => Err(EngineError::InvalidHintTarget(position)),
        }
    }

    fn current_player(&self) -> Color {
        Color::from_parity(self.history.len())
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", render(&ui_board(self, &[])))
    }
}

/// A match as a front end drives it: keeps its own turn indicator, claims it
/// on every move and flips it only when the board accepts.
#[derive(Debug, Clone, Default)]
pub struct Session {
    board: Board,
    turn: Color,
}

impl Session {
    pub fn new() -> Session {
        Session::with_board(Board::new())
    }

    pub fn with_board(board: Board) -> Session {
        let turn = board.current_player();
        Session { board, turn }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Move for whoever's turn it is.
    pub fn play(&mut self, start: Square, end: Square) -> Result<(), EngineError> {
        self.move_piece(start, end, self.turn)
    }

    /// Board view with the hint destinations for `position` marked.
    pub fn hint_view(&self, position: Square) -> Result<String, EngineError> {
        let hints = self.compute_hints(position)?;
        Ok(render(&ui_board(&self.board, &hints)))
    }

    fn flip_turn(&mut self) {
        self.turn = self.turn.opposite();
        debug_assert_eq!(
            self.turn,
            self.board.current_player(),
            "Turn indicator drifted from history!"
        );
    }
}

impl MatchInterface for Session {
    fn cell(&self, square: Square) -> Cell {
        self.board.cell(square)
    }

    fn move_piece(&mut self, start: Square, end: Square, color: Color) -> Result<(), EngineError> {
        if color != self.turn {
            debug!("{color} tried to move out of turn");
            return Err(EngineError::WrongColorPiece {
                square: start,
                expected: self.turn,
            });
        }
        self.board.move_piece(start, end, color)?;
        self.flip_turn();
        Ok(())
    }

    fn undo_move(&mut self) -> Result<MoveRecord, EngineError> {
        let record = self.board.undo_move()?;
        self.flip_turn();
        Ok(record)
    }

    fn compute_hints(&self, position: Square) -> Result<Vec<Square>, EngineError> {
        self.board.compute_hints(position)
    }

    fn current_player(&self) -> Color {
        self.turn
    }
}
