use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use connect_four::config::{AppConfig, FirstMove};
use connect_four::game::{GameOutcome, Players};
use connect_four::ui::{App, Console};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, LevelFilter};
use ratatui::{backend::CrosstermBackend, Terminal};
use simple_logger::SimpleLogger;

/// Play Connect Four against a minimax opponent.
#[derive(Parser)]
#[command(name = "connect-four", version, about)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override the player's name
    #[arg(long)]
    name: Option<String>,

    /// Override the difficulty (1-4)
    #[arg(long)]
    difficulty: Option<u8>,

    /// Override who moves first
    #[arg(long, value_parser = parse_first_move)]
    first: Option<FirstMove>,

    /// Line-oriented prompts instead of the full-screen view
    #[arg(long)]
    plain: bool,
}

fn parse_first_move(s: &str) -> Result<FirstMove, String> {
    match s {
        "random" => Ok(FirstMove::Random),
        "human" => Ok(FirstMove::Human),
        "ai" => Ok(FirstMove::Ai),
        other => Err(format!(
            "unknown first mover '{other}' (expected 'random', 'human', or 'ai')"
        )),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(name) = cli.name {
        config.game.player_name = name;
    }
    if let Some(difficulty) = cli.difficulty {
        config.game.difficulty = difficulty;
    }
    if let Some(first) = cli.first {
        config.game.first_move = first;
    }
    config.validate().context("invalid configuration")?;

    let depth = config.game.search_depth()?;
    let players = Players::new(config.game.player_name.clone(), depth);

    if cli.plain {
        init_logging(config.logging.level_filter()?)?;
        run_plain(&config, &players)
    } else {
        // stderr shares the alternate screen, so nothing is logged here
        init_logging(LevelFilter::Off)?;
        run_tui(players, depth, config.game.first_move).context("terminal UI failed")
    }
}

fn init_logging(level: LevelFilter) -> Result<()> {
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("installing logger")
}

fn run_plain(config: &AppConfig, players: &Players) -> Result<()> {
    let first = config.game.first_move.resolve(&mut rand::rng());
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), true);

    println!("Welcome to Connect 4!");
    println!("{} will be x", players.human.name);
    println!("{} will be o", players.computer.name);

    let outcome = console.play(players, first).context("console game aborted")?;
    match outcome {
        GameOutcome::Win { piece, .. } => info!("game won by {:?}", piece),
        GameOutcome::Draw => info!("game drawn"),
        GameOutcome::Ongoing => {}
    }
    Ok(())
}

fn run_tui(players: Players, depth: usize, first_move: FirstMove) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(players, depth, first_move);
    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
