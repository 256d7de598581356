//! Core Connect Four game logic: board representation, streak detection,
//! pieces and players, and the game session with its outcome.

mod board;
mod player;
mod state;
mod streak;

pub use board::{Board, Cell, CENTER_COL, COLS, ROWS};
pub use player::{Piece, Player, PlayerKind, Players};
pub use state::{evaluate_board, GameOutcome, GameState};
pub use streak::{Direction, FourInARow, Slope, WIN_LENGTH};
