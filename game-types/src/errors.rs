use thiserror::Error;

/// Recoverable failures surfaced to the API caller. Invalid guesses are not
/// errors: they come back as ordinary game messages on the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("{0} already exists")]
    Conflict(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("word list unavailable: {0}")]
    Configuration(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
