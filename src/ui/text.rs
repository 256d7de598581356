use std::fmt::Write;

use crate::game::{Board, Cell, GameOutcome, GameState, Players, COLS, ROWS};

pub const TITLE: &str = "Connect 4";

/// Character for a cell; winning pieces are shown in uppercase.
pub fn cell_symbol(cell: Cell) -> char {
    let symbol = cell.piece.symbol();
    if cell.highlighted {
        symbol.to_ascii_uppercase()
    } else {
        symbol
    }
}

/// Grid rows, top row first, followed by the column underline and labels.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for row in (0..ROWS).rev() {
        out.push('\t');
        for col in 0..COLS {
            let _ = write!(out, "| {} ", cell_symbol(board.cell(row, col)));
        }
        out.push_str("|\n");
    }
    out.push('\t');
    for _ in 0..COLS {
        out.push_str("  _ ");
    }
    out.push('\n');
    out.push('\t');
    for col in 1..=COLS {
        let _ = write!(out, "  {} ", col);
    }
    out.push('\n');
    out
}

/// Full status screen: title, round, board and the result once decided.
pub fn render_text(state: &GameState, players: &Players) -> String {
    let mut out = format!("{TITLE}!\nRound: {}\n", state.round());
    out.push_str(&render_board(state.board()));

    match state.outcome() {
        GameOutcome::Ongoing => {}
        GameOutcome::Win { piece, .. } => {
            let name = players.get(*piece).map_or("Nobody", |p| p.name.as_str());
            let _ = write!(out, "Game Over!\n{name} is the winner\n");
        }
        GameOutcome::Draw => out.push_str("Game Over!\nGame was a draw\n"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Piece;

    #[test]
    fn empty_board_layout() {
        let text = render_board(&Board::new());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), ROWS + 2);
        assert_eq!(lines[0], "\t|   |   |   |   |   |   |   |");
        assert_eq!(lines[6], "\t  _   _   _   _   _   _   _ ");
        assert_eq!(lines[7], "\t  1   2   3   4   5   6   7 ");
    }

    #[test]
    fn bottom_row_is_printed_last() {
        let mut board = Board::new();
        board.drop_piece(0, Piece::Player).unwrap();
        board.drop_piece(0, Piece::Ai).unwrap();
        let text = render_board(&board);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[5], "\t| x |   |   |   |   |   |   |");
        assert_eq!(lines[4], "\t| o |   |   |   |   |   |   |");
    }

    #[test]
    fn winner_is_announced_with_uppercase_line() {
        let players = Players::new("Ada", 2);
        let mut state = GameState::new(Piece::Player);
        for col in [0, 0, 1, 1, 2, 2, 3] {
            state.apply_move_mut(col).unwrap();
        }
        let text = render_text(&state, &players);
        assert!(text.starts_with("Connect 4!\nRound: 8\n"));
        assert!(text.contains("\t| X | X | X | X |   |   |   |"));
        assert!(text.contains("\t| o | o | o |   |   |   |   |"));
        assert!(text.ends_with("Game Over!\nAda is the winner\n"));
    }

    #[test]
    fn ongoing_game_has_no_result_line() {
        let players = Players::new("Ada", 2);
        let state = GameState::new(Piece::Ai);
        let text = render_text(&state, &players);
        assert!(!text.contains("Game Over!"));
    }
}
