//! Front-ends: a ratatui game view, a line-oriented console, and the plain
//! text rendering both of them share.

mod app;
pub mod console;
mod game_view;
pub mod text;

pub use app::App;
pub use console::Console;
pub use text::{render_board, render_text};
