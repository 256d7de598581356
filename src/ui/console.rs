//! Line-oriented front-end: prompts on one stream, prints the board to another.

use std::io::{self, BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use log::{debug, warn};

use crate::ai::choose_move;
use crate::error::MoveError;
use crate::game::{GameOutcome, GameState, Piece, PlayerKind, Players, COLS};

use super::text::render_text;

pub struct Console<R, W> {
    input: R,
    output: W,
    /// Clear the terminal before every board redraw
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, clear_screen: bool) -> Self {
        Console {
            input,
            output,
            clear_screen,
        }
    }

    /// Play one game to completion. Fails only on I/O errors, including the
    /// input running dry mid-game.
    pub fn play(&mut self, players: &Players, first: Piece) -> io::Result<GameOutcome> {
        self.play_from(GameState::new(first), players)
    }

    /// Continue a game from an arbitrary position.
    pub fn play_from(
        &mut self,
        mut state: GameState,
        players: &Players,
    ) -> io::Result<GameOutcome> {
        self.show(&state, players)?;

        while !state.is_terminal() {
            let piece = state.current_piece();
            let Some(player) = players.get(piece) else {
                break;
            };
            writeln!(
                self.output,
                "{}'s turn.  {} is {}",
                player.name,
                player.name,
                piece.symbol()
            )?;

            let column = match player.kind {
                PlayerKind::Human => self.prompt_column()?,
                PlayerKind::Computer { depth } => choose_move(state.board(), depth, piece)
                    .or_else(|| state.legal_actions().first().copied())
                    .unwrap_or_default(),
            };

            match state.apply_move_mut(column) {
                Ok(()) => self.show(&state, players)?,
                Err(MoveError::ColumnFull(_)) => {
                    writeln!(self.output, "Invalid move (column is full)")?;
                }
                Err(e) => {
                    warn!("rejected move {column}: {e}");
                    writeln!(self.output, "Invalid move ({e})")?;
                }
            }
        }

        debug!("game finished after {} rounds", state.round() - 1);
        Ok(state.outcome().clone())
    }

    /// Ask until the reply is a column number between 1 and 7; returns it
    /// zero-based.
    fn prompt_column(&mut self) -> io::Result<usize> {
        loop {
            write!(self.output, "Enter a move (by column number): ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before the game ended",
                ));
            }

            match line.trim().parse::<i64>() {
                Ok(choice) if (1..=COLS as i64).contains(&choice) => {
                    return Ok(choice as usize - 1);
                }
                Ok(_) => writeln!(
                    self.output,
                    "Column must be between 1 and {COLS}, try again"
                )?,
                Err(_) => writeln!(self.output, "Invalid choice, try again")?,
            }
        }
    }

    fn show(&mut self, state: &GameState, players: &Players) -> io::Result<()> {
        if self.clear_screen {
            queue!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        write!(self.output, "{}", render_text(state, players))?;
        self.output.flush()
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn play(input: &str, players: &Players, first: Piece) -> (io::Result<GameOutcome>, String) {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false);
        let result = console.play(players, first);
        let output = String::from_utf8(console.into_output()).unwrap();
        (result, output)
    }

    #[test]
    fn rejects_bad_input_then_accepts_column() {
        let players = Players::new("Ada", 2);
        let (result, output) = play("abc\n9\n0\n4\n", &players, Piece::Player);

        // Input runs out on the second human turn
        let err = result.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

        assert!(output.contains("Ada's turn.  Ada is x"));
        assert!(output.contains("Invalid choice, try again"));
        assert_eq!(
            output.matches("Column must be between 1 and 7, try again").count(),
            2
        );
        assert!(output.contains("\t|   |   |   | x |   |   |   |"));
        assert!(output.contains("AI's turn.  AI is o"));
        assert!(output.contains("Round: 3"));
    }

    #[test]
    fn full_column_is_reported() {
        let players = Players::new("Ada", 2);
        let mut state = GameState::new(Piece::Player);
        for _ in 0..6 {
            state.apply_move_mut(0).unwrap();
        }

        let mut console = Console::new(Cursor::new(b"1\n".to_vec()), Vec::new(), false);
        let result = console.play_from(state, &players);
        let output = String::from_utf8(console.into_output()).unwrap();

        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
        assert_eq!(output.matches("Invalid move (column is full)").count(), 1);
        // The bounced move does not advance the round
        assert!(!output.contains("Round: 8"));
    }

    #[test]
    fn plays_complete_game() {
        let players = Players::new("Ada", 3);
        let input = "1\n2\n3\n4\n5\n6\n7\n".repeat(20);
        let (result, output) = play(&input, &players, Piece::Ai);
        let outcome = result.unwrap();
        assert!(outcome.is_over());
        assert!(output.contains("Game Over!"));
        assert!(output.starts_with("Connect 4!\nRound: 1\n"));
    }
}
