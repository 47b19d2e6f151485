use sea_orm::{
    ActiveValue, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QuerySelect,
};
use uuid::Uuid;

use crate::entities::{games, prelude::*};
use crate::repositories::storage_error;
use game_types::{Game, GameError, GameStatus};

/// Queries over the `games` table.
pub struct GameRepository;

impl GameRepository {
    fn model_to_game(model: games::Model) -> Result<Game, GameError> {
        let status = GameStatus::parse(&model.status).ok_or_else(|| {
            GameError::Unavailable(format!("unknown game status {:?}", model.status))
        })?;

        Ok(Game {
            id: model.id,
            user_id: model.user_id,
            secret_word: model.secret_word,
            word_status: model.word_status,
            attempts_allowed: model.attempts_allowed,
            attempts_remaining: model.attempts_remaining,
            current_move: model.current_move,
            status,
            created_at: model.created_at.to_rfc3339(),
        })
    }

    pub async fn insert<C: ConnectionTrait>(db: &C, game: &Game) -> Result<(), GameError> {
        let created_at = chrono::DateTime::parse_from_rfc3339(&game.created_at)
            .unwrap_or_else(|_| chrono::Utc::now().into());

        let model = games::ActiveModel {
            id: Set(game.id),
            user_id: Set(game.user_id),
            secret_word: Set(game.secret_word.clone()),
            word_status: Set(game.word_status.clone()),
            attempts_allowed: Set(game.attempts_allowed),
            attempts_remaining: Set(game.attempts_remaining),
            current_move: Set(game.current_move),
            status: Set(game.status.as_str().to_string()),
            created_at: Set(created_at),
            updated_at: Set(chrono::Utc::now().into()),
        };
        Games::insert(model).exec(db).await.map_err(storage_error)?;
        Ok(())
    }

    /// Resolve an opaque game key. Absent games are `None`; the API layer
    /// decides whether that is a 404.
    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<Game>, GameError> {
        let model = Games::find_by_id(id).one(db).await.map_err(storage_error)?;
        model.map(Self::model_to_game).transpose()
    }

    /// Persist the mutable slice of a game after a guess or a cancel. The
    /// secret word and attempt budget never change after creation.
    pub async fn update<C: ConnectionTrait>(db: &C, game: &Game) -> Result<(), GameError> {
        let model = games::ActiveModel {
            id: ActiveValue::Unchanged(game.id),
            word_status: Set(game.word_status.clone()),
            attempts_remaining: Set(game.attempts_remaining),
            current_move: Set(game.current_move),
            status: Set(game.status.as_str().to_string()),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };
        Games::update(model).exec(db).await.map_err(storage_error)?;
        Ok(())
    }

    /// A user's games that are still in progress.
    pub async fn active_games_for_user<C: ConnectionTrait>(
        db: &C,
        user_id: Uuid,
    ) -> Result<Vec<Game>, GameError> {
        let models = Games::find()
            .filter(games::Column::UserId.eq(user_id))
            .filter(games::Column::Status.eq(GameStatus::InProgress.as_str()))
            .all(db)
            .await
            .map_err(storage_error)?;
        models.into_iter().map(Self::model_to_game).collect()
    }

    /// Mean attempts remaining across every in-progress game, `None` when
    /// there are none. Feeds the fire-and-forget stats cache.
    pub async fn average_attempts_remaining<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Option<f64>, GameError> {
        let remaining: Vec<i32> = Games::find()
            .filter(games::Column::Status.eq(GameStatus::InProgress.as_str()))
            .select_only()
            .column(games::Column::AttemptsRemaining)
            .into_tuple()
            .all(db)
            .await
            .map_err(storage_error)?;

        if remaining.is_empty() {
            return Ok(None);
        }
        let total: i64 = remaining.iter().map(|v| i64::from(*v)).sum();
        Ok(Some(total as f64 / remaining.len() as f64))
    }
}
