use crate::ai::{Agent, MinimaxAgent};
use crate::config::FirstMove;
use crate::error::MoveError;
use crate::game::{GameOutcome, GameState, Piece, Players, CENTER_COL, COLS};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::Backend, Terminal};
use std::io;

pub struct App {
    game_state: GameState,
    players: Players,
    opponent: MinimaxAgent,
    first_move: FirstMove,
    rng: StdRng,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(players: Players, depth: usize, first_move: FirstMove) -> Self {
        Self::with_rng(players, depth, first_move, StdRng::from_os_rng())
    }

    pub fn with_rng(players: Players, depth: usize, first_move: FirstMove, mut rng: StdRng) -> Self {
        let first = first_move.resolve(&mut rng);
        let mut app = App {
            game_state: GameState::new(first),
            players,
            opponent: MinimaxAgent::new(depth, Piece::Ai),
            first_move,
            rng,
            selected_column: CENTER_COL, // Start in middle
            should_quit: false,
            message: None,
        };
        app.computer_turn();
        app
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = c as usize - '1' as usize;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.reset();
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    fn reset(&mut self) {
        let first = self.first_move.resolve(&mut self.rng);
        self.game_state = GameState::new(first);
        self.selected_column = CENTER_COL;
        self.computer_turn();
    }

    /// Drop the human's piece in the selected column, then let the computer reply
    fn drop_piece(&mut self) {
        if self.game_state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        match self.game_state.apply_move_mut(self.selected_column) {
            Ok(()) => {
                self.computer_turn();
                self.announce_result();
            }
            Err(MoveError::ColumnFull(_)) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveError::InvalidColumn(_)) | Err(MoveError::EmptyPiece) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game is over!".to_string());
            }
        }
    }

    /// Play the computer's move if it is the computer's turn
    fn computer_turn(&mut self) {
        if self.game_state.is_terminal() || self.game_state.current_piece() != Piece::Ai {
            return;
        }
        let Some(column) = self.opponent.select_action(&self.game_state) else {
            return;
        };
        debug!("{} plays column {}", self.opponent.name(), column + 1);
        if let Err(e) = self.game_state.apply_move_mut(column) {
            self.message = Some(format!("Computer move failed: {e}"));
        }
    }

    fn announce_result(&mut self) {
        self.message = match self.game_state.outcome() {
            GameOutcome::Win { piece, .. } => self
                .players
                .get(*piece)
                .map(|p| format!("{} wins! Press 'r' to play again.", p.name)),
            GameOutcome::Draw => Some("It's a draw!".to_string()),
            GameOutcome::Ongoing => None,
        };
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.game_state,
            &self.players,
            self.selected_column,
            &self.message,
        );
    }
}
