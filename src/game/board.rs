use crate::error::MoveError;

use super::player::Piece;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const CENTER_COL: usize = COLS / 2;

/// A board square: the piece occupying it plus a display-only highlight flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub piece: Piece,
    pub highlighted: bool,
}

/// Connect Four grid. Row 0 is the bottom row; pieces settle on the lowest
/// empty row of their column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::default(); COLS]; ROWS],
        }
    }

    /// Get the piece at a specific position
    pub fn get(&self, row: usize, col: usize) -> Piece {
        self.cells[row][col].piece
    }

    /// Get the full cell (piece and highlight) at a specific position
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// A column is playable while its top cell is empty
    pub fn is_column_playable(&self, col: usize) -> bool {
        col < COLS && self.cells[ROWS - 1][col].piece.is_empty()
    }

    /// Check if a column is full (out-of-range columns count as full)
    pub fn is_column_full(&self, col: usize) -> bool {
        !self.is_column_playable(col)
    }

    /// Playable columns in ascending order
    pub fn playable_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..COLS).filter(move |&col| self.is_column_playable(col))
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, piece: Piece) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }
        if piece.is_empty() {
            return Err(MoveError::EmptyPiece);
        }

        let row = (0..ROWS)
            .find(|&row| self.cells[row][col].piece.is_empty())
            .ok_or(MoveError::ColumnFull(col))?;
        self.cells[row][col] = Cell {
            piece,
            highlighted: false,
        };
        Ok(row)
    }

    /// Return a copy of this board with `piece` dropped into `col`.
    pub fn apply_move(&self, col: usize, piece: Piece) -> Result<Board, MoveError> {
        let mut next = *self;
        next.drop_piece(col, piece)?;
        Ok(next)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Number of cells in the center column occupied by `piece`
    pub fn center_count(&self, piece: Piece) -> usize {
        (0..ROWS)
            .filter(|&row| self.get(row, CENTER_COL) == piece)
            .count()
    }

    /// Number of occupied cells
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.piece.is_empty())
            .count()
    }

    /// Mark the given coordinates for display. Empty cells are left alone.
    pub fn highlight<I>(&mut self, coords: I)
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        for (row, col) in coords {
            let cell = &mut self.cells[row][col];
            if !cell.piece.is_empty() {
                cell.highlighted = true;
            }
        }
    }

    /// Parse a board drawn top row first, one line per row, using `x`, `o`
    /// and `.`. Gravity is not enforced.
    #[cfg(test)]
    pub(crate) fn from_layout(layout: &str) -> Board {
        let mut board = Board::new();
        let lines: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        assert_eq!(lines.len(), ROWS, "layout needs {ROWS} rows");
        for (i, line) in lines.iter().enumerate() {
            let row = ROWS - 1 - i;
            let chars: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            assert_eq!(chars.len(), COLS, "row {row} needs {COLS} cells");
            for (col, ch) in chars.into_iter().enumerate() {
                board.cells[row][col].piece = match ch {
                    'x' => Piece::Player,
                    'o' => Piece::Ai,
                    _ => Piece::Empty,
                };
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
