use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Scoreboard entry written once when a game ends in a win or a loss.
/// Cancelled games never score. `misses` is attempts_remaining minus
/// attempts_allowed, so zero is a perfect game and more negative is worse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    pub user_id: Uuid,
    pub date: String, // ISO 8601 date
    pub won: bool,
    pub misses: i32,
}
