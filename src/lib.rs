pub mod core;

// module re-exports
pub use crate::core::definitions::{
    Cell, EngineError, Figure, GameState, MatchInterface, Selection, Square,
};
pub use crate::core::engine::{Board, Color, Piece, PieceType, RuleEngine};
pub use crate::core::game::{ui_board, Game};
