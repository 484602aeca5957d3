//! Noughts - terminal client
//!
//! Plays against the minimax engine, or analyses a single position.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command, Side};
use noughts_core::{Coord, Game, GameStatus, Grid, Mark, best_move, is_terminal};
use noughts_server::{GameService, MemoryRepository, NoughtsConfig};
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => NoughtsConfig::from_file(path)?,
        None => NoughtsConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Play { mark, json } => run_play(config, mark, json),
        Command::Hint { grid, player, json } => run_hint(grid, player, json),
        Command::Check { grid } => run_check(grid),
    }
}

/// Run an interactive game on stdin/stdout
#[instrument(skip(config))]
fn run_play(config: NoughtsConfig, mark: Option<Side>, json: bool) -> Result<()> {
    let config = match mark {
        Some(side) => NoughtsConfig::new(side.into())?,
        None => config,
    };
    let human = *config.human_mark();
    let service = GameService::new(MemoryRepository::new(), config);

    let mut game = service.new_game()?;
    let id = game.id().to_string();
    info!(game_id = %id, %human, "Starting interactive game");

    println!("You play {}. Enter moves as \"row col\" (0-2), or \"q\" to quit.", human);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    while game.status() == GameStatus::InProgress {
        println!("\n{}\n", game.grid());
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            debug!("Input closed");
            break;
        };
        let line = line?;
        if line.trim().eq_ignore_ascii_case("q") {
            break;
        }

        let coord = match parse_coord(&line) {
            Ok(coord) => coord,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match service.play_move(&id, coord) {
            Ok(updated) => game = updated,
            Err(e) => {
                warn!(error = %e, "Move rejected");
                println!("{}", e.kind());
            }
        }
    }

    println!("\n{}\n", game.grid());
    print_outcome(&game, human);

    if json {
        println!("{}", serde_json::to_string_pretty(&game)?);
    }
    Ok(())
}

/// Print the optimal move for a position
#[instrument]
fn run_hint(grid: Grid, player: Side, json: bool) -> Result<()> {
    let mark = Mark::from(player);
    let mut game = Game::from_parts(
        noughts_core::GameId::generate(),
        grid,
        GameStatus::InProgress,
        Mark::Empty,
    );
    let (score, coord) = best_move(&mut game, mark)?;

    if json {
        let value = serde_json::json!({
            "player": mark,
            "row": coord.row,
            "col": coord.col,
            "score": score,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{} plays {} (score {})", mark, coord, score);
    }
    Ok(())
}

/// Print whether a position is terminal
#[instrument]
fn run_check(grid: Grid) -> Result<()> {
    let game = Game::from_parts(
        noughts_core::GameId::generate(),
        grid,
        GameStatus::InProgress,
        Mark::Empty,
    );
    match is_terminal(&game) {
        (true, Mark::Empty) => println!("Game over: draw"),
        (true, winner) => println!("Game over: {} wins", winner),
        (false, _) => println!("Game in progress"),
    }
    Ok(())
}

fn parse_coord(line: &str) -> Result<Coord> {
    let parts: Vec<_> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .collect();
    let [row, col] = parts.as_slice() else {
        bail!("Expected two numbers: row col");
    };
    let row = row.parse().with_context(|| format!("Invalid row {:?}", row))?;
    let col = col.parse().with_context(|| format!("Invalid column {:?}", col))?;
    Ok(Coord::new(row, col))
}

fn print_outcome(game: &Game, human: Mark) {
    match (game.status(), game.winner()) {
        (GameStatus::InProgress, _) => println!("Game abandoned."),
        (GameStatus::Completed, Mark::Empty) => println!("Draw!"),
        (GameStatus::Completed, winner) if winner == human => println!("You win!"),
        (GameStatus::Completed, winner) => println!("{} wins.", winner),
    }
}
