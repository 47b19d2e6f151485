use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub wins: i32,
    pub losses: i32,
    pub win_loss_ratio: f64,
    pub created_at: String, // ISO 8601 string
}
