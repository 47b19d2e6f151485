use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::warn;

use crate::game_service::GameService;

/// Cached mean of attempts remaining across in-progress games, the number
/// the original service kept warm out of band. Refreshed off the request
/// path after each game creation.
#[derive(Default)]
pub struct AverageAttemptsCache {
    value: RwLock<Option<f64>>,
}

impl AverageAttemptsCache {
    pub fn new() -> Self {
        Self {
            value: RwLock::new(None),
        }
    }

    pub async fn get(&self) -> Option<f64> {
        *self.value.read().await
    }

    pub async fn refresh(&self, service: &GameService) {
        match service.average_attempts_remaining().await {
            Ok(average) => *self.value.write().await = average,
            Err(err) => warn!("average-attempts refresh failed: {err}"),
        }
    }
}

/// Queue a refresh without blocking the caller. Failures are logged inside
/// the task; the response never waits on this.
pub fn refresh_in_background(cache: Arc<AverageAttemptsCache>, service: Arc<GameService>) {
    tokio::spawn(async move {
        cache.refresh(&service).await;
    });
}
