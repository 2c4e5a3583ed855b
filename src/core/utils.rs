use crate::core::definitions::{Cell, EngineError, MatchInterface};
use crate::core::engine::{Square, BOARD_SIZE};
use crate::core::game::Board;

#[derive(Debug)]
pub struct DirectionIterator {
    position: Option<Square>,
    direction: (i8, i8),
}

impl Iterator for DirectionIterator {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (d_row, d_col) = self.direction;
        self.position = self.position?.offset(d_row, d_col);
        self.position
    }
}

/// Squares along a ray starting next to `position`, stopping at the board edge.
pub fn in_direction(position: Square, direction: (i8, i8)) -> DirectionIterator {
    DirectionIterator {
        position: Some(position),
        direction,
    }
}

/// Parse an algebraic square such as `e2`.
///
/// Files `a..h` map to columns 0..7 and ranks `1..8` map to rows 7..0.
pub fn parse_square(text: &str) -> Result<Square, EngineError> {
    let invalid = || EngineError::InvalidCoordinate(text.to_string());
    let mut chars = text.chars();
    let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
        (Some(file), Some(rank), None) => (file.to_ascii_lowercase(), rank),
        _ => return Err(invalid()),
    };
    if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return Err(invalid());
    }
    let col = file as u8 - b'a';
    let row = b'8' - rank as u8;
    Square::new(row, col).ok_or_else(invalid)
}

pub fn square_name(square: Square) -> String {
    format!(
        "{}{}",
        (b'a' + square.col()) as char,
        (b'8' - square.row()) as char
    )
}

/// Grid of cells as the player sees it, with `hints` marked.
pub fn ui_board(board: &Board, hints: &[Square]) -> Vec<Vec<Cell>> {
    (0..BOARD_SIZE)
        .map(|row| {
            (0..BOARD_SIZE)
                .filter_map(move |col| Square::new(row, col))
                .map(|square| {
                    if hints.contains(&square) {
                        Cell::Hint
                    } else {
                        board.cell(square)
                    }
                })
                .collect()
        })
        .collect()
}

/// Text view with file letters above and below and rank numbers on both sides.
pub fn render(cells: &[Vec<Cell>]) -> String {
    const FILES: &str = "  a b c d e f g h";
    let mut out = String::with_capacity(256);
    out.push_str(FILES);
    out.push('\n');
    for (row, line) in cells.iter().enumerate() {
        let rank = BOARD_SIZE as usize - row;
        out.push_str(&rank.to_string());
        for cell in line {
            out.push(' ');
            out.push_str(&cell.to_string());
        }
        out.push(' ');
        out.push_str(&rank.to_string());
        out.push('\n');
    }
    out.push_str(FILES);
    out
}

/// Count move sequences of length `depth` reachable by the side to move,
/// playing and undoing every one of them on `board`.
///
/// The board is left exactly as it was passed in.
pub fn count_positions(board: &mut Board, depth: usize) -> usize {
    if depth == 0 {
        return 1;
    }
    let player = board.current_player();
    let moves: Vec<(Square, Square)> = board
        .grid()
        .iter_pieces()
        .filter(|(_, piece)| piece.color() == player)
        .flat_map(|(from, piece)| {
            piece
                .valid_moves(board.grid(), from)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect();
    let mut result = 0;
    for (from, to) in moves {
        if board.move_piece(from, to, player).is_err() {
            continue;
        }
        result += count_positions(board, depth - 1);
        if board.undo_move().is_err() {
            break;
        }
    }
    result
}
