use log::debug;

use crate::core::definitions::{
    Cell, EngineError, Figure, GameState, MatchInterface, Selection, Square,
};
use crate::core::engine::{Board, Color, Piece, RuleEngine};

fn figure(piece: Piece) -> Figure {
    Figure {
        kind: piece.kind,
        color: piece.color,
        symbol: piece.symbol(),
    }
}

pub fn ui_board(board: &Board) -> Vec<Vec<Cell>> {
    board
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Some(piece) => Cell::Figure(figure(*piece)),
                    None => Cell::Empty,
                })
                .collect()
        })
        .collect()
}

/// Drives a [`RuleEngine`] the way a board view does: a piece of the side to
/// move is selected first, the next click tries to move it there. This is the
/// only place turn ownership is checked, and the turn flips once per move.
#[derive(Debug, Clone, Default)]
pub struct Game {
    engine: RuleEngine,
    selected: Option<Square>,
}

impl Game {
    pub fn new() -> Game {
        Game::with_engine(RuleEngine::new())
    }

    pub fn with_engine(engine: RuleEngine) -> Game {
        Game {
            engine,
            selected: None,
        }
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    fn owns(&self, square: Square) -> bool {
        self.engine.board().is_friend(square, self.engine.turn())
    }

    pub fn click(&mut self, square: Square) -> Selection {
        let Some(from) = self.selected.take() else {
            if self.owns(square) {
                self.selected = Some(square);
                return Selection::Selected(square);
            }
            return Selection::Ignored;
        };
        if !self.engine.is_legal_move(from, square) {
            debug!("Rejected {from} -> {square} for {}", self.engine.turn());
            return Selection::Deselected;
        }
        match self.commit(from, square) {
            Ok(_) => Selection::Moved { from, to: square },
            Err(err) => {
                debug!("Move {from} -> {square} failed: {err}");
                Selection::Deselected
            }
        }
    }

    /// Select-and-move in one call, reporting why a move was refused.
    pub fn play(&mut self, from: Square, to: Square) -> Result<GameState, EngineError> {
        self.selected = None;
        let player = self.engine.turn();
        match self.engine.board().get(from) {
            None => return Err(EngineError::EmptySquare(from)),
            Some(piece) if piece.color != player => {
                return Err(EngineError::NotYourPiece {
                    square: from,
                    player,
                })
            }
            Some(_) => {}
        }
        if !self.engine.is_legal_move(from, to) {
            debug!("Rejected {from} -> {to} for {player}");
            return Err(EngineError::IllegalMove { from, to });
        }
        self.commit(from, to)
    }

    fn commit(&mut self, from: Square, to: Square) -> Result<GameState, EngineError> {
        self.engine.apply_move(from, to)?;
        self.engine.switch_turn();
        Ok(GameState::PlayerMove(self.engine.turn()))
    }

    /// Drop the current position and start over.
    pub fn reset(&mut self) {
        self.engine.initialize();
        self.selected = None;
    }

    pub fn load(&mut self, engine: RuleEngine) {
        self.engine = engine;
        self.selected = None;
    }
}

impl MatchInterface for Game {
    fn current_board(&self) -> Vec<Vec<Cell>> {
        ui_board(self.engine.board())
    }

    fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        let square = Square::try_from((row, col)).ok()?;
        Some(match self.engine.board().get(square) {
            Some(piece) => Cell::Figure(figure(piece)),
            None => Cell::Empty,
        })
    }

    fn possible_moves(&self, row: usize, col: usize) -> Option<Vec<Square>> {
        let square = Square::try_from((row, col)).ok()?;
        if !self.owns(square) {
            return None;
        }
        let moves = self.engine.legal_destinations(square);
        if moves.is_empty() {
            None
        } else {
            Some(moves)
        }
    }

    fn execute_move(&mut self, from: Square, to: Square) -> Result<GameState, EngineError> {
        self.play(from, to)
    }

    fn current_player(&self) -> Color {
        self.engine.turn()
    }
}
