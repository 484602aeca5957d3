//! Command-line interface for noughts.

use clap::{Parser, Subcommand, ValueEnum};
use noughts_core::{Grid, Mark};

/// Noughts - play noughts and crosses against a perfect opponent
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Noughts and crosses with a minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game in the terminal
    Play {
        /// Side to play (overrides config). Cross opens, so choosing
        /// nought lets the engine move first.
        #[arg(long, value_enum)]
        mark: Option<Side>,

        /// Print the final game as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the optimal move for a position
    Hint {
        /// Board rows, e.g. "XX./OO./..."
        #[arg(short, long)]
        grid: Grid,

        /// Side to move
        #[arg(short, long, value_enum, default_value = "cross")]
        player: Side,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report whether a position is terminal
    Check {
        /// Board rows, e.g. "XXX/OO./..."
        #[arg(short, long)]
        grid: Grid,
    },
}

/// A playable side.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Cross (X), moves first
    Cross,
    /// Nought (O)
    Nought,
}

impl From<Side> for Mark {
    fn from(side: Side) -> Self {
        match side {
            Side::Cross => Mark::Cross,
            Side::Nought => Mark::Nought,
        }
    }
}
