//! Exhaustive minimax search.
//!
//! Cross maximises, Nought minimises. The search writes speculative marks
//! into the borrowed grid and reverts each one before trying the next, so
//! the board is unchanged when a call returns. There is no pruning: the
//! tree is bounded by the nine cells of the board.

use crate::error::SearchError;
use crate::game::Game;
use crate::types::{Coord, GRID_SIZE, Mark};
use tracing::{debug, instrument};

/// Magnitude of a win before the depth adjustment.
///
/// Depth never exceeds the nine cells of the board, so a win always
/// outscores a draw.
pub const WIN_SCORE: i32 = 10;

/// Scores a terminal position reached after `depth` plies.
///
/// Faster Cross wins score higher, faster Nought wins score lower.
pub fn leaf_score(winner: Mark, depth: i32) -> i32 {
    match winner {
        Mark::Cross => WIN_SCORE - depth,
        Mark::Nought => depth - WIN_SCORE,
        Mark::Empty => 0,
    }
}

fn worst_score(player: Mark) -> i32 {
    match player {
        Mark::Cross => i32::MIN,
        _ => i32::MAX,
    }
}

fn improves(player: Mark, score: i32, best: i32) -> bool {
    match player {
        Mark::Cross => score > best,
        _ => score < best,
    }
}

/// Returns the best attainable score for `player` and the move achieving it.
///
/// The coordinate is [`Coord::NONE`] when the position is terminal. Ties
/// keep the first cell in row-major order. Searching for `Mark::Empty`
/// finds no moves.
pub fn minimax(game: &mut Game, player: Mark, depth: i32) -> (i32, Coord) {
    let (over, winner) = game.is_over();
    if over || !player.is_player() {
        return (leaf_score(winner, depth), Coord::NONE);
    }

    let opponent = player.opponent();
    let depth = depth + 1;
    let mut best_score = worst_score(player);
    let mut best_coord = Coord::NONE;

    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            if game.grid.at(row, col) != Mark::Empty {
                continue;
            }

            game.grid.put(row, col, player);
            let (score, _) = minimax(game, opponent, depth);
            game.grid.put(row, col, Mark::Empty);

            if improves(player, score, best_score) {
                best_score = score;
                best_coord = Coord::from_indices(row, col);
            }
        }
    }

    (best_score, best_coord)
}

/// Runs a full search from the current position and returns the score and move.
///
/// # Errors
///
/// - [`SearchError::InvalidPlayer`] if `player` is `Empty`.
/// - [`SearchError::NoValidMove`] if the position is terminal.
#[instrument(skip(game), fields(game_id = %game.id()))]
pub fn best_move(game: &mut Game, player: Mark) -> Result<(i32, Coord), SearchError> {
    if !player.is_player() {
        return Err(SearchError::InvalidPlayer(player));
    }

    let (score, coord) = minimax(game, player, 0);
    if coord.is_none() {
        debug!("No move available from terminal position");
        return Err(SearchError::NoValidMove);
    }

    debug!(score, %coord, "Search complete");
    Ok((score, coord))
}

/// Computes the optimal move for `player`.
///
/// # Errors
///
/// See [`best_move`].
pub fn next_move(game: &mut Game, player: Mark) -> Result<Coord, SearchError> {
    best_move(game, player).map(|(_, coord)| coord)
}

/// Computes the optimal reply for `mark` on a private copy of the game.
///
/// Callers holding only a shared reference never observe speculative writes.
pub fn compute_reply(game: &Game, mark: Mark) -> Result<Coord, SearchError> {
    let mut scratch = game.clone();
    next_move(&mut scratch, mark)
}
