use sea_orm::{
    ActiveValue::Set, ConnectionTrait, EntityTrait, QueryOrder, QuerySelect,
};

use crate::entities::{prelude::*, scores};
use crate::repositories::storage_error;
use game_types::{GameError, Score, ScoreForm};

/// The score board: one immutable row per finished (won or lost) game.
pub struct ScoreRepository;

impl ScoreRepository {
    pub async fn insert<C: ConnectionTrait>(db: &C, score: &Score) -> Result<(), GameError> {
        let date = score
            .date
            .parse::<chrono::NaiveDate>()
            .unwrap_or_else(|_| chrono::Utc::now().date_naive());

        let model = scores::ActiveModel {
            user_id: Set(score.user_id),
            date: Set(date),
            won: Set(score.won),
            misses: Set(score.misses),
            ..Default::default()
        };
        Scores::insert(model).exec(db).await.map_err(storage_error)?;
        Ok(())
    }

    /// Scores with their owner's name, best performances first: misses are
    /// non-positive, so descending order puts the least-negative values on
    /// top. A positive `limit` truncates the board.
    pub async fn leaderboard<C: ConnectionTrait>(
        db: &C,
        limit: Option<u64>,
    ) -> Result<Vec<ScoreForm>, GameError> {
        let mut query = Scores::find()
            .find_also_related(Users)
            .order_by_desc(scores::Column::Misses);
        if let Some(limit) = limit.filter(|l| *l > 0) {
            query = query.limit(limit);
        }

        let rows = query.all(db).await.map_err(storage_error)?;
        Ok(rows
            .into_iter()
            .map(|(score, user)| ScoreForm {
                user_name: user.map(|u| u.name).unwrap_or_default(),
                date: score.date.to_string(),
                won: score.won,
                misses: score.misses,
            })
            .collect())
    }
}
