pub mod game_repository;
pub mod move_repository;
pub mod score_repository;
pub mod user_repository;

pub use game_repository::GameRepository;
pub use move_repository::MoveRepository;
pub use score_repository::ScoreRepository;
pub use user_repository::UserRepository;

use game_types::GameError;
use sea_orm::DbErr;

/// Storage failures surface to callers as the recoverable `Unavailable`
/// kind; retries are the storage layer's business.
pub(crate) fn storage_error(err: DbErr) -> GameError {
    GameError::Unavailable(err.to_string())
}
