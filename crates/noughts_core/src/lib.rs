//! Noughts and crosses engine.
//!
//! Tracks a 3x3 board, enforces move legality, detects terminal positions
//! and computes optimal replies by exhaustive minimax search.
//!
//! # Example
//!
//! ```
//! use noughts_core::{Coord, Mark, apply_move, compute_reply, create_game};
//!
//! let mut game = create_game();
//! apply_move(&mut game, Coord::new(1, 1), Mark::Cross)?;
//! let reply = compute_reply(&game, Mark::Nought)?;
//! apply_move(&mut game, reply, Mark::Nought)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The search borrows the game mutably and uses its grid as scratch space.
//! Concurrent callers must each work on their own `Game`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod diff;
mod error;
mod game;
mod search;
mod types;

pub use diff::{changed_cells, validate_single_cell_diff};
pub use error::{GridParseError, IdError, MoveError, SearchError, ValidationError};
pub use game::{Game, GameId, apply_move, create_game, is_terminal};
pub use search::{WIN_SCORE, best_move, compute_reply, leaf_score, minimax, next_move};
pub use types::{Coord, GRID_SIZE, GameStatus, Grid, Mark};
