use std::fmt::Display;

use log::trace;
use postcard::{from_bytes, to_allocvec};
use serde::{Deserialize, Serialize};

use crate::core::definitions::{EngineError, Square};
use crate::core::utils::{
    between, is_adjacent, is_in_diagonal_line, is_in_straight_line, is_knight_jump, offset,
};

/// Column the king starts on, for both colors.
const KING_COL: u8 = 4;
const KINGSIDE_KING_COL: u8 = 6;
const QUEENSIDE_KING_COL: u8 = 2;

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

#[derive(PartialEq, Eq, Debug, Default, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn step: white moves up the board (towards row 0).
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    #[inline]
    pub fn home_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    #[inline]
    pub fn pawn_row(self) -> u8 {
        match self {
            Color::White => 6,
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

#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceType,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceType, color: Color) -> Piece {
        Piece { kind, color }
    }

    pub fn symbol(&self) -> char {
        use PieceType::*;
        match (self.color, self.kind) {
            (Color::White, King) => '♔',
            (Color::White, Queen) => '♕',
            (Color::White, Rook) => '♖',
            (Color::White, Bishop) => '♗',
            (Color::White, Knight) => '♘',
            (Color::White, Pawn) => '♙',
            (Color::Black, King) => '♚',
            (Color::Black, Queen) => '♛',
            (Color::Black, Rook) => '♜',
            (Color::Black, Bishop) => '♝',
            (Color::Black, Knight) => '♞',
            (Color::Black, Pawn) => '♟',
        }
    }
}

/** Plain 8x8 grid, indexed `[row][col]` */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Empty board.
    pub fn new() -> Board {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.row() as usize][square.col() as usize]
    }

    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.row() as usize][square.col() as usize] = piece;
    }

    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.row() as usize][square.col() as usize].take()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Occupied by a piece of the color opposite to `mover`.
    #[inline]
    pub fn is_enemy(&self, square: Square, mover: Color) -> bool {
        matches!(self.get(square), Some(piece) if piece.color != mover)
    }

    #[inline]
    pub fn is_friend(&self, square: Square, mover: Color) -> bool {
        matches!(self.get(square), Some(piece) if piece.color == mover)
    }

    /// Every square strictly between `from` and `to` is empty.
    /// Only meaningful for straight or diagonal pairs.
    pub fn is_path_clear(&self, from: Square, to: Square) -> bool {
        between(from, to).all(|square| self.is_empty(square))
    }

    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.cells
    }

    pub fn iter_pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|square| self.get(square).map(|piece| (square, piece)))
    }
}

impl Default for Board {
    /// Standard starting position.
    fn default() -> Self {
        let mut board = Board::new();
        for color in [Color::White, Color::Black] {
            for (col, kind) in BACK_RANK.into_iter().enumerate() {
                board.cells[color.home_row() as usize][col] = Some(Piece::new(kind, color));
                board.cells[color.pawn_row() as usize][col] =
                    Some(Piece::new(PieceType::Pawn, color));
            }
        }
        board
    }
}

/// Board, side to move and en-passant target. Knows the movement rules,
/// nothing about whose turn a move is made in: callers gate on `turn()`
/// and call [`RuleEngine::switch_turn`] after each applied move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEngine {
    board: Board,
    turn: Color,
    en_passant_target: Option<Square>,
}

impl RuleEngine {
    pub fn new() -> RuleEngine {
        RuleEngine::from_parts(Board::default(), Color::White, None)
    }

    pub fn from_parts(board: Board, turn: Color, en_passant_target: Option<Square>) -> RuleEngine {
        RuleEngine {
            board,
            turn,
            en_passant_target,
        }
    }

    /// Back to the starting position, white to move.
    pub fn initialize(&mut self) {
        self.board = Board::default();
        self.turn = Color::White;
        self.en_passant_target = None;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    pub fn switch_turn(&mut self) {
        self.turn = self.turn.opposite();
    }

    /// Whether the piece on `from` may go to `to` under its movement rules.
    ///
    /// An empty `from` or `from == to` is simply illegal. Turn and ownership
    /// are not looked at.
    pub fn is_legal_move(&self, from: Square, to: Square) -> bool {
        let Some(piece) = self.board.get(from) else {
            return false;
        };
        if from == to || self.board.is_friend(to, piece.color) {
            return false;
        }
        match piece.kind {
            PieceType::Pawn => self.is_legal_pawn_move(piece.color, from, to),
            PieceType::Rook => is_in_straight_line(from, to) && self.board.is_path_clear(from, to),
            PieceType::Knight => is_knight_jump(from, to),
            PieceType::Bishop => is_in_diagonal_line(from, to) && self.board.is_path_clear(from, to),
            PieceType::Queen => {
                (is_in_straight_line(from, to) || is_in_diagonal_line(from, to))
                    && self.board.is_path_clear(from, to)
            }
            PieceType::King => is_adjacent(from, to) || self.is_castling(piece.color, from, to),
        }
    }

    fn is_legal_pawn_move(&self, color: Color, from: Square, to: Square) -> bool {
        let forward = color.forward();
        let (row_diff, col_diff) = offset(from, to);
        if row_diff == forward && col_diff == 0 {
            return self.board.is_empty(to);
        }
        if row_diff == 2 * forward && col_diff == 0 && from.row() == color.pawn_row() {
            return self.board.is_empty(to)
                && from
                    .shifted(forward)
                    .is_some_and(|skipped| self.board.is_empty(skipped));
        }
        if row_diff == forward && col_diff.abs() == 1 {
            return self.board.is_enemy(to, color) || self.en_passant_target == Some(to);
        }
        false
    }

    /// King on its start square going two columns along the home row.
    /// Neither earlier king/rook moves nor attacked squares are considered.
    fn is_castling(&self, color: Color, from: Square, to: Square) -> bool {
        let home_row = color.home_row();
        from.row() == home_row
            && from.col() == KING_COL
            && to.row() == home_row
            && (to.col() == KINGSIDE_KING_COL || to.col() == QUEENSIDE_KING_COL)
            && self.board.is_path_clear(from, to)
    }

    /// Destinations `from` may legally move to.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        Square::all()
            .filter(|to| self.is_legal_move(from, *to))
            .collect()
    }

    /// Execute a move the caller already checked with
    /// [`RuleEngine::is_legal_move`]. Legality is not re-validated and the
    /// turn does not change.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<(), EngineError> {
        let piece = self.board.take(from).ok_or(EngineError::EmptySquare(from))?;
        // read before the target gets overwritten below
        let previous_target = self.en_passant_target.take();
        if let Some(captured) = self.board.get(to) {
            trace!("{:?} on {from} captures {:?} on {to}", piece, captured);
        } else {
            trace!("{:?} moves {from} -> {to}", piece);
        }
        self.board.set(to, Some(piece));

        let (row_diff, col_diff) = offset(from, to);
        match piece.kind {
            PieceType::Pawn => {
                if row_diff.abs() == 2 {
                    self.en_passant_target = Some(to);
                }
                if previous_target == Some(to) {
                    self.capture_en_passant(piece.color, to);
                }
            }
            PieceType::King if col_diff.abs() == 2 => self.castle_rook(from, to),
            _ => {}
        }
        Ok(())
    }

    fn capture_en_passant(&mut self, mover: Color, to: Square) {
        let Some(behind) = to.shifted(-mover.forward()) else {
            return;
        };
        if matches!(
            self.board.get(behind),
            Some(Piece { kind: PieceType::Pawn, color }) if color != mover
        ) {
            trace!("En passant removes pawn on {behind}");
            self.board.set(behind, None);
        }
    }

    fn castle_rook(&mut self, from: Square, to: Square) {
        let (rook_col, rook_to_col) = if to.col() > from.col() { (7, 5) } else { (0, 3) };
        let (Ok(rook_from), Ok(rook_to)) = (
            Square::new(to.row(), rook_col),
            Square::new(to.row(), rook_to_col),
        ) else {
            return;
        };
        let rook = self.board.take(rook_from);
        trace!("Castling moves {:?} {rook_from} -> {rook_to}", rook);
        self.board.set(rook_to, rook);
    }

    /// Whole engine state as postcard bytes.
    pub fn snapshot(&self) -> Result<Vec<u8>, EngineError> {
        Ok(to_allocvec(self)?)
    }

    pub fn restore(bytes: &[u8]) -> Result<RuleEngine, EngineError> {
        Ok(from_bytes(bytes)?)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        RuleEngine::new()
    }
}
