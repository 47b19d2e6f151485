use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGameRequest {
    pub user_name: String,
    pub attempts: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakeMoveRequest {
    pub guess: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveForm {
    pub index: i32,
    pub guess: String,
    pub verdict: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameHistory {
    pub moves: Vec<MoveForm>,
    pub current_status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreForm {
    pub user_name: String,
    pub date: String,
    pub won: bool,
    pub misses: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRank {
    pub user_name: String,
    pub win_loss_ratio: f64,
}
