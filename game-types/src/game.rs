use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stands in for letters of the secret word not yet revealed.
pub const PLACEHOLDER: char = '-';

/// Guesses a player gets unless the new-game request says otherwise.
pub const DEFAULT_ATTEMPTS: i32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
    Cancelled,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::InProgress => "in_progress",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
            GameStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "in_progress" => Some(GameStatus::InProgress),
            "won" => Some(GameStatus::Won),
            "lost" => Some(GameStatus::Lost),
            "cancelled" => Some(GameStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    pub user_id: Uuid,
    pub secret_word: String,
    pub word_status: String,
    pub attempts_allowed: i32,
    pub attempts_remaining: i32,
    pub current_move: i32,
    pub status: GameStatus,
    pub created_at: String, // ISO 8601 string
}

impl Game {
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Client-facing view of a game for HTTP responses.
/// Never exposes the secret word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub key: Uuid,
    pub user_name: String,
    pub attempts_remaining: i32,
    pub word_status: String,
    pub game_over: bool,
    pub message: String,
}

impl GameSnapshot {
    pub fn new(game: &Game, user_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: game.id,
            user_name: user_name.into(),
            attempts_remaining: game.attempts_remaining,
            word_status: game.word_status.clone(),
            game_over: game.is_over(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Hit,
    Miss,
}

impl Verdict {
    pub fn from_hit(hit: bool) -> Self {
        if hit { Verdict::Hit } else { Verdict::Miss }
    }

    pub fn is_hit(self) -> bool {
        matches!(self, Verdict::Hit)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Hit => "Hit",
            Verdict::Miss => "Miss",
        }
    }
}

/// One accepted guess, recorded for history playback. Never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub game_id: Uuid,
    pub move_index: i32,
    pub guess: String,
    pub word_status: String,
    pub verdict: Verdict,
}
