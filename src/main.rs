use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_four_ai::ai::Difficulty;
use connect_four_ai::config::AppConfig;
use connect_four_ai::game::{Opponent, Session};
use connect_four_ai::ui::App;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OpponentKind {
    Human,
    Computer,
}

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four against a friend or the computer")]
struct Cli {
    /// Who plays Yellow
    #[arg(long, value_enum, default_value = "computer")]
    opponent: OpponentKind,

    /// Computer strength: beginner, easy, medium or hard
    #[arg(long, default_value = "easy")]
    difficulty: String,

    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

/// Resolve the opponent flags. An unknown tier falls back to easy and the
/// returned warning says so, since the TUI runs without a logger.
fn opponent_from_cli(cli: &Cli) -> (Opponent, Option<String>) {
    let difficulty = Difficulty::from_name(&cli.difficulty);
    let warning = difficulty.is_none().then(|| {
        format!(
            "unknown difficulty '{}', falling back to {}",
            cli.difficulty,
            Difficulty::Easy.name()
        )
    });
    let opponent = match cli.opponent {
        OpponentKind::Human => Opponent::Human,
        OpponentKind::Computer => Opponent::Computer(difficulty.unwrap_or(Difficulty::Easy)),
    };
    (opponent, warning)
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let (opponent, warning) = opponent_from_cli(&cli);
    if let Some(warning) = warning {
        eprintln!("Warning: {warning}");
    }
    let session = Session::new(config, opponent).context("creating game session")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running terminal UI")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_difficulty() {
        let cli = Cli::parse_from(["connect-four", "--difficulty", "Hard"]);
        assert_eq!(
            opponent_from_cli(&cli),
            (Opponent::Computer(Difficulty::Hard), None)
        );
    }

    #[test]
    fn test_unknown_difficulty_warns_and_falls_back() {
        let cli = Cli::parse_from(["connect-four", "--difficulty", "expert"]);
        let (opponent, warning) = opponent_from_cli(&cli);
        assert_eq!(opponent, Opponent::Computer(Difficulty::Easy));
        assert_eq!(
            warning.as_deref(),
            Some("unknown difficulty 'expert', falling back to easy")
        );
    }

    #[test]
    fn test_human_opponent() {
        let cli = Cli::parse_from(["connect-four", "--opponent", "human"]);
        assert_eq!(opponent_from_cli(&cli), (Opponent::Human, None));
    }
}
