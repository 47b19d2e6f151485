use sea_orm::{
    ActiveValue, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use uuid::Uuid;

use crate::entities::{games, prelude::*, users};
use crate::repositories::storage_error;
use game_types::{GameError, GameStatus, User};

/// Queries over the `users` table. Methods take the connection explicitly so
/// the game-end statistics update can join the guess's transaction.
pub struct UserRepository;

impl UserRepository {
    fn model_to_user(model: users::Model) -> User {
        User {
            id: model.id,
            name: model.name,
            email: model.email,
            wins: model.wins,
            losses: model.losses,
            win_loss_ratio: model.win_loss_ratio,
            created_at: model.created_at.to_rfc3339(),
        }
    }

    pub async fn create<C: ConnectionTrait>(db: &C, user: &User) -> Result<User, GameError> {
        if Self::find_by_name(db, &user.name).await?.is_some() {
            return Err(GameError::Conflict(format!("user {}", user.name)));
        }

        let now = chrono::Utc::now().into();
        let model = users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            wins: Set(user.wins),
            losses: Set(user.losses),
            win_loss_ratio: Set(user.win_loss_ratio),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Users::insert(model).exec(db).await.map_err(storage_error)?;

        Self::find_by_id(db, user.id)
            .await?
            .ok_or_else(|| GameError::Unavailable("created user could not be read back".to_string()))
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<User>, GameError> {
        let model = Users::find_by_id(id).one(db).await.map_err(storage_error)?;
        Ok(model.map(Self::model_to_user))
    }

    pub async fn find_by_name<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> Result<Option<User>, GameError> {
        let model = Users::find()
            .filter(users::Column::Name.eq(name))
            .one(db)
            .await
            .map_err(storage_error)?;
        Ok(model.map(Self::model_to_user))
    }

    /// Persist counters recomputed by the statistics module at game end.
    pub async fn update_stats<C: ConnectionTrait>(db: &C, user: &User) -> Result<(), GameError> {
        let model = users::ActiveModel {
            id: ActiveValue::Unchanged(user.id),
            wins: Set(user.wins),
            losses: Set(user.losses),
            win_loss_ratio: Set(user.win_loss_ratio),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };
        Users::update(model).exec(db).await.map_err(storage_error)?;
        Ok(())
    }

    /// All users ordered by win/loss ratio, best first.
    pub async fn rankings<C: ConnectionTrait>(db: &C) -> Result<Vec<User>, GameError> {
        let models = Users::find()
            .order_by_desc(users::Column::WinLossRatio)
            .all(db)
            .await
            .map_err(storage_error)?;
        Ok(models.into_iter().map(Self::model_to_user).collect())
    }

    /// Users with a contact address who still have a game in progress.
    /// This is the read the reminder sweep runs.
    pub async fn reminder_candidates<C: ConnectionTrait>(db: &C) -> Result<Vec<User>, GameError> {
        let models = Users::find()
            .filter(users::Column::Email.is_not_null())
            .join(JoinType::InnerJoin, users::Relation::Games.def())
            .filter(games::Column::Status.eq(GameStatus::InProgress.as_str()))
            .distinct()
            .all(db)
            .await
            .map_err(storage_error)?;
        Ok(models.into_iter().map(Self::model_to_user).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_to_memory_database;
    use crate::repositories::GameRepository;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::DatabaseConnection;

    async fn setup_test_db() -> DatabaseConnection {
        let db = connect_to_memory_database().await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    fn test_user(name: &str, email: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.map(str::to_string),
            wins: 0,
            losses: 0,
            win_loss_ratio: 0.0,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let db = setup_test_db().await;
        let user = test_user("alice", Some("alice@example.com"));

        let created = UserRepository::create(&db, &user).await.unwrap();
        assert_eq!(created.name, "alice");
        assert_eq!(created.email.as_deref(), Some("alice@example.com"));

        let by_id = UserRepository::find_by_id(&db, user.id).await.unwrap();
        assert!(by_id.is_some());

        let by_name = UserRepository::find_by_name(&db, "alice").await.unwrap();
        assert_eq!(by_name.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_a_conflict() {
        let db = setup_test_db().await;
        UserRepository::create(&db, &test_user("alice", None))
            .await
            .unwrap();

        let result = UserRepository::create(&db, &test_user("alice", None)).await;
        assert!(matches!(result, Err(GameError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_stats_roundtrip() {
        let db = setup_test_db().await;
        let mut user = UserRepository::create(&db, &test_user("bob", None))
            .await
            .unwrap();

        user.wins = 3;
        user.losses = 1;
        user.win_loss_ratio = 3.0;
        UserRepository::update_stats(&db, &user).await.unwrap();

        let reloaded = UserRepository::find_by_id(&db, user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.wins, 3);
        assert_eq!(reloaded.losses, 1);
        assert_eq!(reloaded.win_loss_ratio, 3.0);
    }

    #[tokio::test]
    async fn test_rankings_order_by_ratio_descending() {
        let db = setup_test_db().await;
        for (name, ratio) in [("low", 0.5), ("high", 4.0), ("mid", 2.0)] {
            let mut user = UserRepository::create(&db, &test_user(name, None))
                .await
                .unwrap();
            user.win_loss_ratio = ratio;
            UserRepository::update_stats(&db, &user).await.unwrap();
        }

        let ranked = UserRepository::rankings(&db).await.unwrap();
        let names: Vec<_> = ranked.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
    }

    #[tokio::test]
    async fn test_reminder_candidates_need_email_and_active_game() {
        let db = setup_test_db().await;
        let with_game = UserRepository::create(&db, &test_user("playing", Some("p@example.com")))
            .await
            .unwrap();
        let idle = UserRepository::create(&db, &test_user("idle", Some("i@example.com")))
            .await
            .unwrap();
        let no_email = UserRepository::create(&db, &test_user("quiet", None))
            .await
            .unwrap();

        let active = game_core_like_game(with_game.id, GameStatus::InProgress);
        GameRepository::insert(&db, &active).await.unwrap();
        // An active game does not qualify a user without a contact address.
        let unreachable = game_core_like_game(no_email.id, GameStatus::InProgress);
        GameRepository::insert(&db, &unreachable).await.unwrap();

        let candidates = UserRepository::reminder_candidates(&db).await.unwrap();
        let names: Vec<_> = candidates.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["playing"]);
        assert!(!names.contains(&idle.name.as_str()));
    }

    fn game_core_like_game(user_id: Uuid, status: GameStatus) -> game_types::Game {
        game_types::Game {
            id: Uuid::new_v4(),
            user_id,
            secret_word: "cat".to_string(),
            word_status: "---".to_string(),
            attempts_allowed: 6,
            attempts_remaining: 6,
            current_move: 0,
            status,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
