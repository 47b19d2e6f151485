use std::collections::HashSet;

use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::entities::{moves, prelude::*};
use crate::repositories::storage_error;
use game_types::{GameError, Move, Verdict};

/// The append-only guess ledger.
pub struct MoveRepository;

impl MoveRepository {
    fn model_to_move(model: moves::Model) -> Move {
        Move {
            game_id: model.game_id,
            move_index: model.move_index,
            guess: model.guess,
            word_status: model.word_status,
            verdict: Verdict::from_hit(model.verdict),
        }
    }

    /// Append one immutable row for an accepted guess.
    pub async fn append<C: ConnectionTrait>(db: &C, record: &Move) -> Result<(), GameError> {
        let model = moves::ActiveModel {
            game_id: Set(record.game_id),
            move_index: Set(record.move_index),
            guess: Set(record.guess.clone()),
            word_status: Set(record.word_status.clone()),
            verdict: Set(record.verdict.is_hit()),
            ..Default::default()
        };
        Moves::insert(model).exec(db).await.map_err(storage_error)?;
        Ok(())
    }

    /// Letters already guessed in a game; backs the duplicate-guess check.
    pub async fn guessed_letters<C: ConnectionTrait>(
        db: &C,
        game_id: Uuid,
    ) -> Result<HashSet<char>, GameError> {
        let guesses: Vec<String> = Moves::find()
            .filter(moves::Column::GameId.eq(game_id))
            .select_only()
            .column(moves::Column::Guess)
            .into_tuple()
            .all(db)
            .await
            .map_err(storage_error)?;

        Ok(guesses.iter().filter_map(|g| g.chars().next()).collect())
    }

    /// Full move history ascending by sequence index, for replay.
    pub async fn history<C: ConnectionTrait>(
        db: &C,
        game_id: Uuid,
    ) -> Result<Vec<Move>, GameError> {
        let models = Moves::find()
            .filter(moves::Column::GameId.eq(game_id))
            .order_by_asc(moves::Column::MoveIndex)
            .all(db)
            .await
            .map_err(storage_error)?;
        Ok(models.into_iter().map(Self::model_to_move).collect())
    }
}
