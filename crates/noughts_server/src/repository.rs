//! Game storage.

use crate::error::{ServiceError, ServiceErrorKind};
use noughts_core::{Game, GameId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, instrument, warn};

/// Storage for game snapshots.
///
/// Implementations hand out owned copies, so a caller searching on a game
/// never shares its scratch grid with another caller.
pub trait GameRepository {
    /// Stores (or replaces) a game.
    fn save_game(&self, game: &Game) -> Result<(), ServiceError>;

    /// Loads a game by identifier.
    fn get_game(&self, id: GameId) -> Result<Game, ServiceError>;

    /// Loads every stored game.
    fn all_games(&self) -> Result<Vec<Game>, ServiceError>;
}

/// Thread-safe in-memory repository.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    games: Arc<Mutex<HashMap<GameId, Game>>>,
}

impl MemoryRepository {
    /// Creates an empty repository.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<GameId, Game>>, ServiceError> {
        self.games.lock().map_err(|_| {
            warn!("Game storage lock poisoned");
            ServiceError::new(ServiceErrorKind::StoragePoisoned)
        })
    }
}

impl GameRepository for MemoryRepository {
    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    fn save_game(&self, game: &Game) -> Result<(), ServiceError> {
        self.lock()?.insert(game.id(), game.clone());
        debug!("Game saved");
        Ok(())
    }

    #[instrument(skip(self))]
    fn get_game(&self, id: GameId) -> Result<Game, ServiceError> {
        self.lock()?.get(&id).cloned().ok_or_else(|| {
            debug!(game_id = %id, "Game not found");
            ServiceError::new(ServiceErrorKind::NotFound(id))
        })
    }

    #[instrument(skip(self))]
    fn all_games(&self) -> Result<Vec<Game>, ServiceError> {
        let games: Vec<_> = self.lock()?.values().cloned().collect();
        debug!(count = games.len(), "Listed games");
        Ok(games)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noughts_core::{Coord, Mark};

    #[test]
    fn test_save_and_get() {
        let repo = MemoryRepository::new();
        let game = Game::new();
        repo.save_game(&game).expect("save");
        assert_eq!(repo.get_game(game.id()).expect("get"), game);
    }

    #[test]
    fn test_save_replaces() {
        let repo = MemoryRepository::new();
        let mut game = Game::new();
        repo.save_game(&game).expect("save");
        game.set_move(Coord::new(0, 0), Mark::Cross).expect("move");
        repo.save_game(&game).expect("save");

        assert_eq!(repo.all_games().expect("list").len(), 1);
        assert_eq!(repo.get_game(game.id()).expect("get"), game);
    }

    #[test]
    fn test_missing_game() {
        let repo = MemoryRepository::new();
        let id = GameId::generate();
        let err = repo.get_game(id).expect_err("should be missing");
        assert_eq!(err.kind(), &ServiceErrorKind::NotFound(id));
    }

    #[test]
    fn test_clones_share_storage() {
        let repo = MemoryRepository::new();
        let other = repo.clone();
        let game = Game::new();
        repo.save_game(&game).expect("save");
        assert!(other.get_game(game.id()).is_ok());
    }
}
