use log::{info, trace};

use super::board::Board;
use super::player::Piece;
use super::streak::FourInARow;
use crate::error::MoveError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    Ongoing,
    Win {
        piece: Piece,
        lines: Vec<FourInARow>,
        cells: Vec<(usize, usize)>,
    },
    Draw,
}

impl GameOutcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameOutcome::Ongoing)
    }

    pub fn winner(&self) -> Option<Piece> {
        match self {
            GameOutcome::Win { piece, .. } => Some(*piece),
            _ => None,
        }
    }
}

/// Classify a position. When both sides somehow hold a four, the piece of
/// the first line in scan order is reported as the winner.
pub fn evaluate_board(board: &Board) -> GameOutcome {
    let lines = board.detect_four_in_a_row();
    if let Some(first) = lines.first() {
        let piece = first.piece;
        let mut cells: Vec<(usize, usize)> = lines.iter().flat_map(FourInARow::cells).collect();
        cells.sort_unstable();
        cells.dedup();
        return GameOutcome::Win {
            piece,
            lines,
            cells,
        };
    }
    if board.is_full() {
        GameOutcome::Draw
    } else {
        GameOutcome::Ongoing
    }
}

/// A game in progress: board, side to move, round counter and outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    current: Piece,
    round: usize,
    outcome: GameOutcome,
}

impl GameState {
    /// Create an initial game state with `first` to move
    pub fn new(first: Piece) -> Self {
        GameState {
            board: Board::new(),
            current: first,
            round: 1,
            outcome: GameOutcome::Ongoing,
        }
    }

    /// Get the piece to move
    pub fn current_piece(&self) -> Piece {
        self.current
    }

    /// Get reference to board (winning cells are highlighted once decided)
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// One-based round number, advanced after every move
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn outcome(&self) -> &GameOutcome {
        &self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_over()
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.playable_columns().collect()
    }

    /// Apply a move and return new state
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = self.clone();
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Apply move mutably (for UI efficiency)
    pub fn apply_move_mut(&mut self, column: usize) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let row = self.board.drop_piece(column, self.current)?;
        trace!(
            "round {}: {:?} dropped into column {} (row {})",
            self.round,
            self.current,
            column,
            row
        );

        self.outcome = evaluate_board(&self.board);
        match &self.outcome {
            GameOutcome::Win { piece, cells, .. } => {
                info!("{:?} wins in round {}", piece, self.round);
                self.board.highlight(cells.iter().copied());
            }
            GameOutcome::Draw => info!("draw after round {}", self.round),
            GameOutcome::Ongoing => {}
        }

        self.current = self.current.opponent();
        self.round += 1;
        Ok(())
    }
}
