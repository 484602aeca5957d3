//! Game aggregate: identity, board, lifecycle status and winner.

use crate::error::{IdError, MoveError};
use crate::types::{Coord, GameStatus, Grid, Mark};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Opaque, globally unique game identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct GameId(Uuid);

impl GameId {
    /// Generates a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an identifier supplied by a collaborator.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| IdError::InvalidIdentifier(s.to_string()))
    }
}

impl FromStr for GameId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A single game of noughts and crosses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    id: GameId,
    pub(crate) grid: Grid,
    status: GameStatus,
    winner: Mark,
}

impl Game {
    /// Creates a fresh game: new identifier, empty grid, in progress, no winner.
    #[instrument]
    pub fn new() -> Self {
        let game = Self {
            id: GameId::generate(),
            grid: Grid::new(),
            status: GameStatus::InProgress,
            winner: Mark::Empty,
        };
        debug!(game_id = %game.id, "Created game");
        game
    }

    /// Rebuilds a game from a stored snapshot.
    pub fn from_parts(id: GameId, grid: Grid, status: GameStatus, winner: Mark) -> Self {
        Self {
            id,
            grid,
            status,
            winner,
        }
    }

    /// Returns the identifier.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Returns the board.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the lifecycle status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the winner. Only meaningful once the game is completed;
    /// `Empty` on a completed game means a draw.
    pub fn winner(&self) -> Mark {
        self.winner
    }

    /// Checks if the current position is terminal. See [`Grid::is_over`].
    pub fn is_over(&self) -> (bool, Mark) {
        self.grid.is_over()
    }

    /// Places `mark` at `coord`.
    ///
    /// Does not update status or winner on success; call
    /// [`Game::refresh_status`] afterwards.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameAlreadyOver`] if the position is terminal. The
    ///   status is set to `Completed` even though the write is rejected.
    /// - [`MoveError::OutOfBounds`] if `coord` is off the board.
    /// - [`MoveError::CellOccupied`] if the cell is taken.
    /// - [`MoveError::EmptyMark`] if `mark` is `Empty`.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn set_move(&mut self, coord: Coord, mark: Mark) -> Result<(), MoveError> {
        let (over, _) = self.is_over();
        if over {
            self.status = GameStatus::Completed;
            warn!("Move attempted on finished game");
            return Err(MoveError::GameAlreadyOver);
        }

        let (row, col) = coord.indices().ok_or(MoveError::OutOfBounds(coord))?;

        if self.grid.at(row, col) != Mark::Empty {
            return Err(MoveError::CellOccupied(coord));
        }

        if !mark.is_player() {
            return Err(MoveError::EmptyMark);
        }

        self.grid.put(row, col, mark);
        debug!(%coord, %mark, "Move applied");
        Ok(())
    }

    /// Finalises the game if the position is terminal.
    ///
    /// Sets status to `Completed` and records the winner. Returns whether
    /// the position is terminal. A completed game never returns to
    /// `InProgress`.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn refresh_status(&mut self) -> bool {
        let (over, winner) = self.is_over();
        if over {
            if self.status == GameStatus::InProgress {
                debug!(%winner, "Game completed");
            }
            self.status = GameStatus::Completed;
            self.winner = winner;
        }
        over
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a fresh game.
pub fn create_game() -> Game {
    Game::new()
}

/// Applies a rule-checked move. See [`Game::set_move`].
pub fn apply_move(game: &mut Game, coord: Coord, mark: Mark) -> Result<(), MoveError> {
    game.set_move(coord, mark)
}

/// Terminal-state check without side effects. See [`Grid::is_over`].
pub fn is_terminal(game: &Game) -> (bool, Mark) {
    game.is_over()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_with(grid: &str) -> Game {
        Game::from_parts(
            GameId::generate(),
            grid.parse().expect("valid grid"),
            GameStatus::InProgress,
            Mark::Empty,
        )
    }

    #[test]
    fn test_new_game_is_fresh() {
        let game = Game::new();
        assert_eq!(game.grid(), &Grid::new());
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.winner(), Mark::Empty);
    }

    #[test]
    fn test_new_games_have_distinct_ids() {
        assert_ne!(Game::new().id(), Game::new().id());
    }

    #[test]
    fn test_id_round_trips_through_string() {
        let id = GameId::generate();
        assert_eq!(GameId::parse(&id.to_string()), Ok(id));
    }

    #[test]
    fn test_invalid_id_rejected() {
        assert_eq!(
            GameId::parse("not-a-uuid"),
            Err(IdError::InvalidIdentifier("not-a-uuid".to_string()))
        );
    }

    #[test]
    fn test_set_move_writes_cell() {
        let mut game = Game::new();
        game.set_move(Coord::new(1, 1), Mark::Cross).expect("legal move");
        assert_eq!(game.grid().get(Coord::new(1, 1)), Some(Mark::Cross));
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_set_move_does_not_finalise_winning_move() {
        let mut game = game_with("XX./OO./...");
        game.set_move(Coord::new(0, 2), Mark::Cross).expect("legal move");
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.winner(), Mark::Empty);
        assert!(game.refresh_status());
        assert_eq!(game.status(), GameStatus::Completed);
        assert_eq!(game.winner(), Mark::Cross);
    }

    #[test]
    fn test_set_move_out_of_bounds() {
        let mut game = Game::new();
        for coord in [Coord::new(3, 0), Coord::new(0, 3), Coord::new(-1, 0), Coord::NONE] {
            assert_eq!(
                game.set_move(coord, Mark::Cross),
                Err(MoveError::OutOfBounds(coord))
            );
        }
        assert_eq!(game.grid(), &Grid::new());
    }

    #[test]
    fn test_set_move_occupied() {
        let mut game = game_with("X../.../...");
        let before = *game.grid();
        assert_eq!(
            game.set_move(Coord::new(0, 0), Mark::Nought),
            Err(MoveError::CellOccupied(Coord::new(0, 0)))
        );
        assert_eq!(game.grid(), &before);
    }

    #[test]
    fn test_set_move_empty_mark_rejected() {
        let mut game = Game::new();
        assert_eq!(
            game.set_move(Coord::new(0, 0), Mark::Empty),
            Err(MoveError::EmptyMark)
        );
    }

    #[test]
    fn test_set_move_on_finished_game_completes_it() {
        let mut game = game_with("XOX/OXX/OXO");
        let before = *game.grid();
        assert_eq!(
            game.set_move(Coord::new(0, 0), Mark::Cross),
            Err(MoveError::GameAlreadyOver)
        );
        assert_eq!(game.status(), GameStatus::Completed);
        assert_eq!(game.grid(), &before);
    }

    #[test]
    fn test_refresh_status_draw() {
        let mut game = game_with("XOX/OXX/OXO");
        assert!(game.refresh_status());
        assert_eq!(game.status(), GameStatus::Completed);
        assert_eq!(game.winner(), Mark::Empty);
    }

    #[test]
    fn test_refresh_status_unfinished_is_noop() {
        let mut game = game_with("X../.O./...");
        assert!(!game.refresh_status());
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_is_over_is_pure() {
        let game = game_with("XXX/OO./...");
        let first = game.is_over();
        let second = game.is_over();
        assert_eq!(first, second);
        assert_eq!(first, (true, Mark::Cross));
        assert_eq!(game.status(), GameStatus::InProgress);
    }
}
