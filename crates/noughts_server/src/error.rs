//! Service error types.

use derive_more::{Display, Error};
use noughts_core::{GameId, IdError, Mark, MoveError, SearchError, ValidationError};
use tracing::instrument;

/// What went wrong in the service layer.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ServiceErrorKind {
    /// A move was rejected by the game rules.
    #[display("{}", _0)]
    Move(MoveError),

    /// The engine could not produce a reply.
    #[display("{}", _0)]
    Search(SearchError),

    /// A submitted grid is not exactly one move ahead.
    #[display("{}", _0)]
    Validation(ValidationError),

    /// The identifier string could not be parsed.
    #[display("{}", _0)]
    Identifier(IdError),

    /// No game with this identifier is stored.
    #[display("Game {} not found", _0)]
    NotFound(GameId),

    /// A submitted grid placed the wrong mark.
    #[display("Expected a {} move, found {}", expected, found)]
    WrongMark {
        /// Mark the player is assigned.
        expected: Mark,
        /// Mark found in the submitted cell.
        found: Mark,
    },

    /// This mark is not due to move.
    #[display("It's not {}'s turn", _0)]
    OutOfTurn(Mark),

    /// The storage lock was poisoned by a panicking writer.
    #[display("Game storage is unavailable")]
    StoragePoisoned,
}

/// Service error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Service error: {} at {}:{}", kind, file, line)]
pub struct ServiceError {
    /// Error category.
    pub kind: ServiceErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ServiceError {
    /// Creates a new service error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: ServiceErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error category.
    pub fn kind(&self) -> &ServiceErrorKind {
        &self.kind
    }
}

impl From<MoveError> for ServiceError {
    #[track_caller]
    fn from(err: MoveError) -> Self {
        Self::new(ServiceErrorKind::Move(err))
    }
}

impl From<SearchError> for ServiceError {
    #[track_caller]
    fn from(err: SearchError) -> Self {
        Self::new(ServiceErrorKind::Search(err))
    }
}

impl From<ValidationError> for ServiceError {
    #[track_caller]
    fn from(err: ValidationError) -> Self {
        Self::new(ServiceErrorKind::Validation(err))
    }
}

impl From<IdError> for ServiceError {
    #[track_caller]
    fn from(err: IdError) -> Self {
        Self::new(ServiceErrorKind::Identifier(err))
    }
}
