use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::core::engine::{Color, PieceType};

/// Board coordinate. Row 0 is black's home rank, row 7 is white's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Result<Square, EngineError> {
        if row < 8 && col < 8 {
            Ok(Square { row, col })
        } else {
            Err(EngineError::InvalidCoordinate {
                row: row as usize,
                col: col as usize,
            })
        }
    }

    #[inline]
    pub fn row(&self) -> u8 {
        self.row
    }

    #[inline]
    pub fn col(&self) -> u8 {
        self.col
    }

    /// Same column, `rows` away; `None` when that leaves the board.
    pub fn shifted(&self, rows: i8) -> Option<Square> {
        let row = self.row as i8 + rows;
        if (0..8).contains(&row) {
            Some(Square { row: row as u8, col: self.col })
        } else {
            None
        }
    }

    /// All 64 squares, row by row.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = EngineError;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        if row < 8 && col < 8 {
            Ok(Square { row: row as u8, col: col as u8 })
        } else {
            Err(EngineError::InvalidCoordinate { row, col })
        }
    }
}

impl TryFrom<(u8, u8)> for Square {
    type Error = EngineError;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Square::new(row, col)
    }
}

impl From<Square> for (u8, u8) {
    fn from(value: Square) -> Self {
        (value.row, value.col)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub kind: PieceType,
    pub color: Color,
    pub symbol: char,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Figure(Figure),
}

/// What the view gets back after handing a click to the game.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Selection {
    /// Nothing selected and the square holds no piece of the side to move.
    Ignored,
    Selected(Square),
    /// Selection dropped because the move was not legal.
    Deselected,
    Moved { from: Square, to: Square },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameState {
    PlayerMove(Color),
}

pub trait MatchInterface {
    fn current_board(&self) -> Vec<Vec<Cell>>;
    fn cell(&self, row: usize, col: usize) -> Option<Cell>;
    fn possible_moves(&self, row: usize, col: usize) -> Option<Vec<Square>>;
    fn execute_move(&mut self, from: Square, to: Square) -> Result<GameState, EngineError>;
    fn current_player(&self) -> Color;
}

#[derive(Debug)]
pub enum EngineError {
    InvalidCoordinate { row: usize, col: usize },
    EmptySquare(Square),
    NotYourPiece { square: Square, player: Color },
    IllegalMove { from: Square, to: Square },
    Snapshot(postcard::Error),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidCoordinate { row, col } => {
                write!(f, "invalid coordinate ({row}, {col}), expected 0..=7")
            }
            EngineError::EmptySquare(square) => write!(f, "no piece on {square}"),
            EngineError::NotYourPiece { square, player } => {
                write!(f, "piece on {square} does not belong to {player}")
            }
            EngineError::IllegalMove { from, to } => write!(f, "illegal move {from} -> {to}"),
            EngineError::Snapshot(err) => write!(f, "bad snapshot: {err}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Snapshot(err) => Some(err),
            _ => None,
        }
    }
}

impl From<postcard::Error> for EngineError {
    fn from(value: postcard::Error) -> Self {
        EngineError::Snapshot(value)
    }
}
