use std::fmt::{Debug, Display};
use std::str::FromStr;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::core::definitions::EngineError;
use crate::core::utils::{in_direction, parse_square, square_name};

/** Side length of the board */
pub const BOARD_SIZE: u8 = 8;
/** Full set for both sides; captures only ever lower the count */
pub const MAX_PIECES: usize = 32;

/** Tables directions for pieces, as (row, column) steps.
 * Row 0 is black's back rank, so "up" for white is a negative row step. */
const ROOK_DIR: &[(i8, i8)] = &[(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DIR: &[(i8, i8)] = &[(-1, -1), (-1, 1), (1, -1), (1, 1)];

/** Possible jumps for pieces */
const KNIGHT_MOVES: &[(i8, i8)] = &[
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
];
#[rustfmt::skip]
const KING_MOVES: &[(i8, i8)] = &[
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

#[derive(PartialEq, Eq, Hash, Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        if self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Whose turn it is after `moves_played` accepted moves.
    pub fn from_parity(moves_played: usize) -> Color {
        if moves_played % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Row the pawns of this color start on; double steps are allowed only from here.
    fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row step a pawn of this color moves forward by.
    fn pawn_step(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(if self == &Self::White {
            "White"
        } else {
            "Black"
        })
    }
}

#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Back rank order, from column `a` to column `h`.
    pub const BACK_RANK: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

/// A board coordinate. `row` 0 is black's back rank, `row` 7 is white's;
/// `col` 0 is the `a` file.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Option<Square> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Square { row, col })
        } else {
            None
        }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Square shifted by the given steps, or `None` if it falls off the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Square::new(row, col)
    }

    /// All 64 squares, row by row starting from row 0.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square { row, col }))
    }
}

impl TryFrom<(u8, u8)> for Square {
    type Error = EngineError;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Square::new(row, col).ok_or_else(|| EngineError::InvalidCoordinate(format!("({row}, {col})")))
    }
}

impl From<Square> for (u8, u8) {
    fn from(value: Square) -> Self {
        (value.row, value.col)
    }
}

impl FromStr for Square {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_square(s)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&square_name(*self))
    }
}

impl Debug for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}, {})", square_name(*self), self.row, self.col)
    }
}

/// A chess piece. Carries no state beyond its color and kind, so it is never
/// rebuilt once placed: moves relocate it and captures evict it.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { color, kind }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Display letter: uppercase for white, lowercase for black.
    pub fn symbol(&self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }

    /// Every square this piece could occupy next from `position`.
    ///
    /// Pure function of the grid; leaving the own king attacked is allowed.
    /// The result holds no duplicates and its order is stable for a given grid.
    pub fn valid_moves(&self, grid: &Grid, position: Square) -> Vec<Square> {
        let moves = match self.kind {
            PieceKind::Pawn => self.pawn_moves(grid, position),
            PieceKind::Rook => self.sweep(grid, position, ROOK_DIR),
            PieceKind::Bishop => self.sweep(grid, position, BISHOP_DIR),
            PieceKind::Queen => {
                let mut moves = self.sweep(grid, position, ROOK_DIR);
                moves.extend(self.sweep(grid, position, BISHOP_DIR));
                moves
            }
            PieceKind::Knight => self.jumps(grid, position, KNIGHT_MOVES),
            PieceKind::King => self.jumps(grid, position, KING_MOVES),
        };
        trace!("{:?} on {} has {} moves", self, position, moves.len());
        moves
    }

    fn pawn_moves(&self, grid: &Grid, position: Square) -> Vec<Square> {
        let step = self.color.pawn_step();
        let mut moves = Vec::with_capacity(4);
        // push
        if let Some(front) = position.offset(step, 0) {
            if grid.get(front).is_none() {
                moves.push(front);
                // double push
                if position.row() == self.color.pawn_rank() {
                    if let Some(double) = front.offset(step, 0) {
                        if grid.get(double).is_none() {
                            moves.push(double);
                        }
                    }
                }
            }
        }
        // capture
        for side in [-1, 1] {
            if let Some(target) = position.offset(step, side) {
                if grid.get(target).is_some_and(|other| self.is_enemy(other)) {
                    moves.push(target);
                }
            }
        }
        moves
    }

    /// Ray sweep shared by rooks, bishops and queens: empty squares are
    /// collected until the first occupied one, which counts only if enemy.
    fn sweep(&self, grid: &Grid, position: Square, directions: &[(i8, i8)]) -> Vec<Square> {
        let mut moves = Vec::with_capacity(14);
        for &dir in directions {
            for square in in_direction(position, dir) {
                match grid.get(square) {
                    None => moves.push(square),
                    Some(other) => {
                        if self.is_enemy(other) {
                            moves.push(square);
                        }
                        break;
                    }
                }
            }
        }
        moves
    }

    fn jumps(&self, grid: &Grid, position: Square, offsets: &[(i8, i8)]) -> Vec<Square> {
        offsets
            .iter()
            .filter_map(|&(d_row, d_col)| position.offset(d_row, d_col))
            .filter(|&square| grid.get(square).map_or(true, |other| self.is_enemy(other)))
            .collect()
    }

    #[inline]
    fn is_enemy(&self, other: &Piece) -> bool {
        other.color != self.color
    }
}

impl Debug for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Piece")
            .field("symbol", &self.symbol())
            .field("color", &self.color)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/** 8x8 array of optional occupants, indexed `[row][col]`.
 * Read access is public; writes are crate-private so that `Board` stays the
 * only way to alter a position. */
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    cells: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Grid {
    pub fn get(&self, square: Square) -> Option<&Piece> {
        self.cells[square.row() as usize][square.col() as usize].as_ref()
    }

    /// Occupied cells, row by row starting from row 0.
    pub fn iter_pieces(&self) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        Square::all().filter_map(|square| self.get(square).map(|piece| (square, piece)))
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    /** Empty the cell, handing its occupant to the caller. */
    pub(crate) fn take(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.row() as usize][square.col() as usize].take()
    }

    /** Store `piece` (or nothing) in the cell and return what was there. */
    pub(crate) fn replace(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(
            &mut self.cells[square.row() as usize][square.col() as usize],
            piece,
        )
    }

    pub(crate) fn clear(&mut self) {
        self.cells = Default::default();
    }
}
