use crate::game::{Board, GameOutcome, GameState, Piece, Players, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::text::{cell_symbol, TITLE};

pub fn render(
    frame: &mut Frame,
    game_state: &GameState,
    players: &Players,
    selected_column: usize,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, game_state, players, chunks[0]);
    render_board(frame, game_state.board(), selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn piece_color(piece: Piece) -> Color {
    match piece {
        Piece::Empty => Color::DarkGray,
        Piece::Player => Color::Red,
        Piece::Ai => Color::Yellow,
    }
}

fn render_header(
    frame: &mut Frame,
    game_state: &GameState,
    players: &Players,
    area: ratatui::layout::Rect,
) {
    let current = game_state.current_piece();
    let name_of = move |piece: Piece| players.get(piece).map_or("?", |p| p.name.as_str());

    let (status, color) = match game_state.outcome() {
        GameOutcome::Ongoing => (
            format!(
                "Round {}  |  {}'s turn ({})",
                game_state.round(),
                name_of(current),
                current.symbol()
            ),
            piece_color(current),
        ),
        GameOutcome::Win { piece, .. } => (
            format!("Game Over  |  {} is the winner", name_of(*piece)),
            piece_color(*piece),
        ),
        GameOutcome::Draw => ("Game Over  |  Game was a draw".to_string(), Color::White),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(TITLE));

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    board: &Board,
    selected_column: usize,
    area: ratatui::layout::Rect,
) {
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..COLS {
        if col == selected_column {
            col_line.push(Span::styled(
                format!(" {} ", col + 1),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {} ", col + 1)));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    lines.push(Line::from("  ╔═════════════════════╗"));

    // Top row first
    for row in (0..ROWS).rev() {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..COLS {
            let cell = board.cell(row, col);
            let symbol = match cell.piece {
                Piece::Empty => " . ".to_string(),
                _ => format!(" {} ", cell_symbol(cell)),
            };
            let mut style = Style::default().fg(piece_color(cell.piece));
            if cell.highlighted {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            row_spans.push(Span::styled(symbol, style));
        }

        row_spans.push(Span::raw("║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from("  ╚═════════════════════╝"));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: ratatui::layout::Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: ratatui::layout::Rect) {
    let controls = Paragraph::new("←/→ or 1-7: Select  |  Enter: Drop  |  R: Restart  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(state: &GameState) -> String {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let players = Players::new("Ada", 2);
        terminal
            .draw(|f| render(f, state, &players, 3, &None))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn header_shows_turn_and_round() {
        let state = GameState::new(Piece::Player);
        let screen = draw(&state);
        assert!(screen.contains("Round 1  |  Ada's turn (x)"));
    }

    #[test]
    fn winning_line_is_uppercase() {
        let mut state = GameState::new(Piece::Ai);
        for col in [0, 0, 1, 1, 2, 2, 3] {
            state.apply_move_mut(col).unwrap();
        }
        let screen = draw(&state);
        assert!(screen.contains("AI is the winner"));
        assert!(screen.contains(" O  O  O  O "));
    }
}
