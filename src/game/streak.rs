//! Run detection: the heuristic streak counter and the four-in-a-row scanner.
//!
//! Runs are always read forward from a start cell: up the column, right along
//! the row, up-right (positive slope) and down-right (negative slope).

use super::board::{Board, COLS, ROWS};
use super::player::Piece;

pub const WIN_LENGTH: usize = 4;

const UP: (isize, isize) = (1, 0);
const RIGHT: (isize, isize) = (0, 1);
const UP_RIGHT: (isize, isize) = (1, 1);
const DOWN_RIGHT: (isize, isize) = (-1, 1);

const STEPS: [(isize, isize); 4] = [UP, RIGHT, UP_RIGHT, DOWN_RIGHT];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slope {
    Positive,
    Negative,
    /// Both diagonals start at the same cell.
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Vertical,
    Horizontal,
    Diagonal(Slope),
}

/// A run of at least four identical pieces starting at `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourInARow {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub piece: Piece,
}

impl FourInARow {
    /// The four coordinates of the run, or eight for a `Both` diagonal.
    pub fn cells(&self) -> Vec<(usize, usize)> {
        let steps: &[(isize, isize)] = match self.direction {
            Direction::Vertical => &[UP],
            Direction::Horizontal => &[RIGHT],
            Direction::Diagonal(Slope::Positive) => &[UP_RIGHT],
            Direction::Diagonal(Slope::Negative) => &[DOWN_RIGHT],
            Direction::Diagonal(Slope::Both) => &[UP_RIGHT, DOWN_RIGHT],
        };
        steps
            .iter()
            .flat_map(|&(dr, dc)| {
                (0..WIN_LENGTH as isize).map(move |i| {
                    (
                        (self.row as isize + dr * i) as usize,
                        (self.col as isize + dc * i) as usize,
                    )
                })
            })
            .collect()
    }
}

impl Board {
    /// Length of the run of the piece at `(row, col)` going in `step`,
    /// stopping at the board edge.
    fn run_length(&self, row: usize, col: usize, (dr, dc): (isize, isize)) -> usize {
        let piece = self.get(row, col);
        let (mut r, mut c) = (row as isize, col as isize);
        let mut len = 0;
        while (0..ROWS as isize).contains(&r)
            && (0..COLS as isize).contains(&c)
            && self.get(r as usize, c as usize) == piece
        {
            len += 1;
            r += dr;
            c += dc;
        }
        len
    }

    /// Count (start cell, direction) pairs from which `piece` runs for at
    /// least `length` cells. Overlapping runs are counted once per start, so a
    /// run of five yields two streaks of four. `Piece::Empty` never counts.
    pub fn count_streak(&self, piece: Piece, length: usize) -> usize {
        if piece.is_empty() {
            return 0;
        }
        let mut count = 0;
        for row in 0..ROWS {
            for col in 0..COLS {
                if self.get(row, col) != piece {
                    continue;
                }
                count += STEPS
                    .iter()
                    .filter(|&&step| self.run_length(row, col, step) >= length)
                    .count();
            }
        }
        count
    }

    /// Every four-in-a-row on the board, in row-major scan order.
    pub fn detect_four_in_a_row(&self) -> Vec<FourInARow> {
        let mut found = Vec::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                let piece = self.get(row, col);
                if piece.is_empty() {
                    continue;
                }
                let mut push = |direction| {
                    found.push(FourInARow {
                        row,
                        col,
                        direction,
                        piece,
                    })
                };

                if self.run_length(row, col, UP) >= WIN_LENGTH {
                    push(Direction::Vertical);
                }
                if self.run_length(row, col, RIGHT) >= WIN_LENGTH {
                    push(Direction::Horizontal);
                }
                let positive = self.run_length(row, col, UP_RIGHT) >= WIN_LENGTH;
                let negative = self.run_length(row, col, DOWN_RIGHT) >= WIN_LENGTH;
                match (positive, negative) {
                    (true, true) => push(Direction::Diagonal(Slope::Both)),
                    (true, false) => push(Direction::Diagonal(Slope::Positive)),
                    (false, true) => push(Direction::Diagonal(Slope::Negative)),
                    (false, false) => {}
                }
            }
        }
        found
    }

    /// Whether either side already has four in a row
    pub fn has_four_in_a_row(&self) -> bool {
        self.count_streak(Piece::Player, WIN_LENGTH) > 0
            || self.count_streak(Piece::Ai, WIN_LENGTH) > 0
    }
}
