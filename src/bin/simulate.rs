use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, info};

use connect_four_ai::ai::{Agent, Difficulty, RandomAgent, SearchAgent};
use connect_four_ai::config::AppConfig;
use connect_four_ai::game::{Board, Outcome, Player};

/// Attempts at drawing an opening that leaves the game undecided.
const OPENING_ATTEMPTS: usize = 100;

/// Play computer-vs-computer matches without a terminal UI.
#[derive(Parser)]
#[command(name = "simulate", about = "Run headless matches between difficulty tiers")]
struct Cli {
    /// Tier playing Red (moves first)
    #[arg(long, default_value = "medium")]
    red: String,

    /// Tier playing Yellow
    #[arg(long, default_value = "easy")]
    yellow: String,

    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Random plies played before the searchers take over
    #[arg(long, default_value_t = 2)]
    random_openings: usize,

    /// Seed for the random openings
    #[arg(long)]
    seed: Option<u64>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
}

#[derive(Debug, Default)]
struct MatchTally {
    red_wins: usize,
    yellow_wins: usize,
    ties: usize,
    total_moves: usize,
}

impl MatchTally {
    fn record(&mut self, outcome: Outcome, moves: usize) {
        match outcome {
            Outcome::Win(Player::Red) => self.red_wins += 1,
            Outcome::Win(Player::Yellow) => self.yellow_wins += 1,
            Outcome::Tie => self.ties += 1,
        }
        self.total_moves += moves;
    }

    fn games(&self) -> usize {
        self.red_wins + self.yellow_wins + self.ties
    }

    fn rate(&self, count: usize) -> f64 {
        match self.games() {
            0 => 0.0,
            n => count as f64 * 100.0 / n as f64,
        }
    }

    fn average_length(&self) -> f64 {
        match self.games() {
            0 => 0.0,
            n => self.total_moves as f64 / n as f64,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let red_tier = Difficulty::parse_or_default(&cli.red);
    let yellow_tier = Difficulty::parse_or_default(&cli.yellow);

    let mut red = SearchAgent::for_difficulty(red_tier, &config.difficulty, config.eval);
    let mut yellow = SearchAgent::for_difficulty(yellow_tier, &config.difficulty, config.eval);
    let mut openings = match cli.seed {
        Some(seed) => RandomAgent::with_seed(seed),
        None => RandomAgent::new(),
    };

    info!(
        "{} (Red) vs {} (Yellow): {} games, {} random opening plies",
        red.name(),
        yellow.name(),
        cli.games,
        cli.random_openings
    );

    let start = Instant::now();
    let mut tally = MatchTally::default();
    for game in 1..=cli.games {
        let mut board = opening(&config, &mut openings, cli.random_openings)?;
        let outcome = play_game(&mut board, &mut red, &mut yellow)?;
        info!("game {game}: {outcome:?} after {} moves", board.move_count());
        debug!("final position:\n{board}");
        tally.record(outcome, board.move_count());
    }

    print_results(&tally, &red, &yellow);
    info!("finished in {:.2?}", start.elapsed());
    Ok(())
}

/// Fresh board with `plies` random moves that do not end the game.
fn opening(config: &AppConfig, random: &mut RandomAgent, plies: usize) -> Result<Board> {
    'attempt: for _ in 0..OPENING_ATTEMPTS {
        let mut board = config.board.new_board()?;
        let mut player = Player::Red;
        for _ in 0..plies {
            let column = random.select_action(&mut board, player)?;
            board.apply_move(column, player)?;
            if board.outcome()?.is_some() {
                continue 'attempt;
            }
            player = player.other();
        }
        return Ok(board);
    }
    bail!("no undecided {plies}-ply opening found in {OPENING_ATTEMPTS} attempts")
}

/// Play to the end, starting with whichever side is due to move.
fn play_game(board: &mut Board, red: &mut dyn Agent, yellow: &mut dyn Agent) -> Result<Outcome> {
    let mut player = if board.move_count() % 2 == 0 {
        Player::Red
    } else {
        Player::Yellow
    };

    loop {
        let agent: &mut dyn Agent = match player {
            Player::Red => &mut *red,
            Player::Yellow => &mut *yellow,
        };
        let column = agent
            .select_action(board, player)
            .with_context(|| format!("{} failed to move", agent.name()))?;
        board.apply_move(column, player)?;
        if let Some(outcome) = board.outcome()? {
            return Ok(outcome);
        }
        player = player.other();
    }
}

fn print_results(tally: &MatchTally, red: &SearchAgent, yellow: &SearchAgent) {
    println!("-------------------------------------------");
    println!("{:<28} {:>6} {:>8}", "Result", "Games", "Share");
    println!(
        "{:<28} {:>6} {:>7.1}%",
        format!("{} wins", red.name()),
        tally.red_wins,
        tally.rate(tally.red_wins)
    );
    println!(
        "{:<28} {:>6} {:>7.1}%",
        format!("{} wins", yellow.name()),
        tally.yellow_wins,
        tally.rate(tally.yellow_wins)
    );
    println!("{:<28} {:>6} {:>7.1}%", "Ties", tally.ties, tally.rate(tally.ties));
    println!("-------------------------------------------");
    println!(
        "Games: {} | average length: {:.1} moves",
        tally.games(),
        tally.average_length()
    );
}
