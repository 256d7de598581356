//! # Connect Four
//!
//! Connect Four against a computer opponent that searches with depth-limited
//! minimax and alpha-beta pruning.
//!
//! ## Modules
//!
//! - [`game`] — Board, streak detection, pieces and players, game session
//! - [`ai`] — Minimax search, static evaluation, agents
//! - [`ui`] — Terminal UI, console loop, text rendering
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;

pub use ai::{best_move, choose_move, SearchResult};
pub use error::{ConfigError, MoveError};
pub use game::{evaluate_board, Board, GameOutcome, Piece};

/// An all-empty board.
pub fn create_empty_board() -> Board {
    Board::new()
}

/// Drop `piece` into `column`, returning the new board.
pub fn apply_move(board: &Board, column: usize, piece: Piece) -> Result<Board, MoveError> {
    board.apply_move(column, piece)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{COLS, ROWS};

    #[test]
    fn facade_plays_a_short_game() {
        let mut board = create_empty_board();
        assert_eq!(evaluate_board(&board), GameOutcome::Ongoing);

        // Computer replies to a human move in the corner
        board = apply_move(&board, 0, Piece::Player).unwrap();
        let col = choose_move(&board, 2, Piece::Ai).unwrap();
        assert!(board.is_column_playable(col));
        board = apply_move(&board, col, Piece::Ai).unwrap();
        assert_eq!(board.piece_count(), 2);
        assert_eq!(evaluate_board(&board), GameOutcome::Ongoing);
    }

    #[test]
    fn apply_move_rejects_unplayable_columns() {
        let mut board = create_empty_board();
        for i in 0..ROWS {
            let piece = if i % 2 == 0 { Piece::Player } else { Piece::Ai };
            board = apply_move(&board, 5, piece).unwrap();
        }
        for col in 0..COLS + 2 {
            let result = apply_move(&board, col, Piece::Ai);
            assert_eq!(result.is_ok(), board.is_column_playable(col), "column {col}");
        }
        assert_eq!(apply_move(&board, 5, Piece::Ai), Err(MoveError::ColumnFull(5)));
        assert_eq!(
            apply_move(&board, COLS, Piece::Ai),
            Err(MoveError::InvalidColumn(COLS))
        );
    }

    #[test]
    fn search_result_for_exhausted_depth() {
        let board = create_empty_board();
        let result = best_move(&board, 0, -ai::INFINITY, ai::INFINITY, true);
        assert_eq!(result, SearchResult { column: None, score: 0 });
    }
}
