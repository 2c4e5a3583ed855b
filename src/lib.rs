pub mod command;
pub mod core;

// module re-exports
pub use crate::core::definitions::{Cell, EngineError, MatchInterface};
pub use crate::core::engine::{Color, Grid, Piece, PieceKind, Square};
pub use crate::core::game::{Board, BoardBuilder, MoveRecord, Session};
