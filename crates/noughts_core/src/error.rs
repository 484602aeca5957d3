//! Error types for moves, search and validation.
//!
//! Every error here is an expected, caller-recoverable condition.

use crate::types::{Coord, Mark};

/// Error that can occur when applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The position is already terminal. The game has been finalised.
    #[display("No move possible: game is over")]
    GameAlreadyOver,

    /// The coordinate is outside the board.
    #[display("No move possible: {:?} is not on the board", _0)]
    OutOfBounds(Coord),

    /// The target cell already holds a mark.
    #[display("No move possible: cell {} is occupied", _0)]
    CellOccupied(Coord),

    /// An empty mark cannot be played.
    #[display("No move possible: cannot play an empty mark")]
    EmptyMark,
}

impl std::error::Error for MoveError {}

/// Error returned by the search engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SearchError {
    /// The position is terminal, so there is nothing to play.
    #[display("Could not find a valid move")]
    NoValidMove,

    /// Only `Cross` and `Nought` can be searched for.
    #[display("Cannot search on behalf of {:?}", _0)]
    InvalidPlayer(Mark),
}

impl std::error::Error for SearchError {}

/// Error returned when two grid snapshots are not one move apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ValidationError {
    /// Zero or more than one cell differs.
    #[display("Invalid move on field: {} cells changed", changed)]
    InvalidDiff {
        /// Number of differing cells.
        changed: usize,
    },
}

impl std::error::Error for ValidationError {}

/// Error returned when an identifier string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum IdError {
    /// The string is not a valid game identifier.
    #[display("Invalid game identifier: {:?}", _0)]
    InvalidIdentifier(String),
}

impl std::error::Error for IdError {}

/// Error returned when a grid cannot be parsed from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GridParseError {
    /// A character is not one of `X`, `O`, `.`, `_` or `-`.
    #[display("Invalid cell character {:?}", _0)]
    InvalidCell(char),

    /// The text does not describe exactly nine cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongCellCount(usize),
}

impl std::error::Error for GridParseError {}
