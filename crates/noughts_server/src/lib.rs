//! Noughts game service.
//!
//! Wraps the `noughts_core` engine with the plumbing a front end needs:
//! identifier parsing, storage, turn orchestration and configuration.
//!
//! # Architecture
//!
//! - **Repository**: thread-safe in-memory storage of game snapshots
//! - **Service**: one human move plus the engine's reply per turn
//! - **Config**: seat assignment and log filter loaded from TOML
//!
//! # Example
//!
//! ```
//! use noughts_server::{GameService, MemoryRepository, NoughtsConfig};
//! use noughts_core::{Coord, Mark};
//!
//! let service = GameService::new(MemoryRepository::new(), NoughtsConfig::default());
//! let game = service.new_game()?;
//! let game = service.play_move(&game.id().to_string(), Coord::new(1, 1))?;
//! assert_eq!(game.grid().get(Coord::new(1, 1)), Some(Mark::Cross));
//! assert_eq!(game.grid().empty_cells().count(), 7);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod repository;
mod service;

pub use config::{ConfigError, NoughtsConfig};
pub use error::{ServiceError, ServiceErrorKind};
pub use repository::{GameRepository, MemoryRepository};
pub use service::GameService;
