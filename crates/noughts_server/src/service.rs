//! Turn orchestration: human move, engine reply, finalisation, storage.

use crate::config::NoughtsConfig;
use crate::error::{ServiceError, ServiceErrorKind};
use crate::repository::GameRepository;
use noughts_core::{
    Coord, Game, GameId, GameStatus, Grid, MoveError, changed_cells, next_move,
    validate_single_cell_diff,
};
use tracing::{debug, info, instrument, warn};

/// Plays games between a human and the minimax engine.
///
/// Each turn loads a snapshot, plays on it and saves it back without holding
/// a lock across the whole turn. Callers must serialise turns on the same
/// game; concurrent turns on one game can overwrite each other.
#[derive(Debug, Clone, derive_new::new)]
pub struct GameService<R> {
    repo: R,
    config: NoughtsConfig,
}

impl<R: GameRepository> GameService<R> {
    /// Returns the configuration.
    pub fn config(&self) -> &NoughtsConfig {
        &self.config
    }

    /// Creates and stores a fresh game. When the engine plays Cross it makes
    /// the opening move.
    #[instrument(skip(self))]
    pub fn new_game(&self) -> Result<Game, ServiceError> {
        let game = Game::new();
        self.repo.save_game(&game)?;
        info!(game_id = %game.id(), "New game started");

        if self.config.engine_first() {
            return self.engine_opening(&game.id().to_string());
        }
        Ok(game)
    }

    /// Plays the engine's Cross opening on a stored, untouched game.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceErrorKind::OutOfTurn`] if the engine plays Nought or
    /// the game already has a move on it.
    #[instrument(skip(self))]
    pub fn engine_opening(&self, id: &str) -> Result<Game, ServiceError> {
        let mut game = self.get_game(id)?;
        let mark = self.config.engine_mark();

        let untouched = game.grid().coords().all(|coord| game.grid().is_empty(coord));
        if !self.config.engine_first() || !untouched {
            warn!(%mark, "Engine asked to open out of turn");
            return Err(ServiceError::new(ServiceErrorKind::OutOfTurn(mark)));
        }

        self.engine_reply(&mut game)?;
        self.repo.save_game(&game)?;
        Ok(game)
    }

    /// Loads a game by its identifier string.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceErrorKind::Identifier`] for malformed identifiers and
    /// [`ServiceErrorKind::NotFound`] for unknown ones.
    #[instrument(skip(self))]
    pub fn get_game(&self, id: &str) -> Result<Game, ServiceError> {
        let id = GameId::parse(id)?;
        self.repo.get_game(id)
    }

    /// Lists every stored game.
    #[instrument(skip(self))]
    pub fn all_games(&self) -> Result<Vec<Game>, ServiceError> {
        self.repo.all_games()
    }

    /// Plays the human's move at `coord`, then the engine's reply.
    ///
    /// Returns the updated game, which is also stored.
    #[instrument(skip(self))]
    pub fn play_move(&self, id: &str, coord: Coord) -> Result<Game, ServiceError> {
        let game = self.get_game(id)?;
        self.play_turn(game, coord)
    }

    /// Accepts a whole board from the human and plays the engine's reply.
    ///
    /// The submitted grid must differ from the stored one in exactly one
    /// cell, and that cell must hold the human's mark.
    #[instrument(skip(self, after))]
    pub fn submit_grid(&self, id: &str, after: &Grid) -> Result<Game, ServiceError> {
        let game = self.get_game(id)?;
        if game.status() == GameStatus::Completed {
            return Err(MoveError::GameAlreadyOver.into());
        }

        validate_single_cell_diff(game.grid(), after)?;
        let coord = changed_cells(game.grid(), after)[0];

        let expected = *self.config.human_mark();
        let found = after.get(coord).unwrap_or_default();
        if found != expected {
            warn!(%coord, %expected, %found, "Submitted grid placed the wrong mark");
            return Err(ServiceError::new(ServiceErrorKind::WrongMark {
                expected,
                found,
            }));
        }

        self.play_turn(game, coord)
    }

    fn play_turn(&self, game: Game, coord: Coord) -> Result<Game, ServiceError> {
        let mut updated = game.clone();

        if let Err(err) = updated.set_move(coord, *self.config.human_mark()) {
            if err == MoveError::GameAlreadyOver {
                updated.refresh_status();
                self.repo.save_game(&updated)?;
            }
            return Err(err.into());
        }
        validate_single_cell_diff(game.grid(), updated.grid())?;

        if !updated.refresh_status() {
            self.engine_reply(&mut updated)?;
            updated.refresh_status();
        }

        self.repo.save_game(&updated)?;
        debug!(
            game_id = %updated.id(),
            status = %updated.status(),
            winner = %updated.winner(),
            "Turn complete"
        );
        Ok(updated)
    }

    fn engine_reply(&self, game: &mut Game) -> Result<Coord, ServiceError> {
        let mark = self.config.engine_mark();
        let coord = next_move(game, mark)?;
        game.set_move(coord, mark)?;
        debug!(%coord, %mark, "Engine replied");
        Ok(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryRepository;
    use noughts_core::Mark;

    fn service() -> GameService<MemoryRepository> {
        GameService::new(MemoryRepository::new(), NoughtsConfig::default())
    }

    #[test]
    fn test_turn_places_two_marks() {
        let service = service();
        let game = service.new_game().expect("new game");
        let id = game.id().to_string();

        let after = service.play_move(&id, Coord::new(1, 1)).expect("turn");
        assert_eq!(changed_cells(game.grid(), after.grid()).len(), 2);
        assert_eq!(after.grid().get(Coord::new(1, 1)), Some(Mark::Cross));
        assert_eq!(service.get_game(&id).expect("stored"), after);
    }

    #[test]
    fn test_engine_opens_as_cross() {
        let config = NoughtsConfig::new(Mark::Nought).expect("config");
        let service = GameService::new(MemoryRepository::new(), config);
        let game = service.new_game().expect("new game");
        assert_eq!(game.grid().get(Coord::new(0, 0)), Some(Mark::Cross));
        assert_eq!(game.grid().empty_cells().count(), 8);
    }

    #[test]
    fn test_human_cross_opens_on_empty_board() {
        let game = service().new_game().expect("new game");
        assert_eq!(game.grid().empty_cells().count(), 9);
    }

    #[test]
    fn test_engine_opening_rejected_when_engine_is_nought() {
        let service = service();
        let game = service.new_game().expect("new game");
        let err = service
            .engine_opening(&game.id().to_string())
            .expect_err("engine plays nought");
        assert_eq!(err.kind(), &ServiceErrorKind::OutOfTurn(Mark::Nought));
    }

    #[test]
    fn test_engine_opening_only_once() {
        let config = NoughtsConfig::new(Mark::Nought).expect("config");
        let service = GameService::new(MemoryRepository::new(), config);
        let game = service.new_game().expect("new game");
        let err = service
            .engine_opening(&game.id().to_string())
            .expect_err("already opened");
        assert_eq!(err.kind(), &ServiceErrorKind::OutOfTurn(Mark::Cross));
    }
}
