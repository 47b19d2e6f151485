use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tracing::info;
use uuid::Uuid;

use game_core::engine::{self, GuessOutcome};
use game_core::stats;
use game_core::words::WordList;
use game_persistence::repositories::{
    GameRepository, MoveRepository, ScoreRepository, UserRepository,
};
use game_types::{
    DEFAULT_ATTEMPTS, Game, GameError, GameHistory, GameSnapshot, GameStatus, MoveForm, ScoreForm,
    User, UserRank,
};

/// Coordinates the word list, the game engine, and the repositories behind
/// the HTTP handlers.
pub struct GameService {
    db: DatabaseConnection,
    words: WordList,
}

impl GameService {
    pub fn new(db: DatabaseConnection, words: WordList) -> Self {
        Self { db, words }
    }

    pub async fn create_user(
        &self,
        name: String,
        email: Option<String>,
    ) -> Result<User, GameError> {
        let user = User {
            id: Uuid::new_v4(),
            name,
            email,
            wins: 0,
            losses: 0,
            win_loss_ratio: 0.0,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        UserRepository::create(&self.db, &user).await
    }

    pub async fn start_game(
        &self,
        user_name: &str,
        attempts: Option<i32>,
    ) -> Result<GameSnapshot, GameError> {
        let user = UserRepository::find_by_name(&self.db, user_name)
            .await?
            .ok_or_else(|| GameError::NotFound(format!("user {user_name}")))?;

        let secret = self.words.pick_secret_word()?;
        let game = engine::new_game(user.id, secret, attempts.unwrap_or(DEFAULT_ATTEMPTS));
        GameRepository::insert(&self.db, &game).await?;

        info!(game_id = %game.id, user = %user.name, "game created");
        Ok(GameSnapshot::new(&game, user.name, "Good luck playing Hangman!"))
    }

    pub async fn get_game(&self, key: Uuid) -> Result<GameSnapshot, GameError> {
        let game = load_game(&self.db, key).await?;
        let user = load_owner(&self.db, &game).await?;
        Ok(GameSnapshot::new(&game, user.name, "Time to make a move!"))
    }

    /// Run one guess through the state machine. The game update, ledger
    /// append, and end-of-game statistics share a single transaction.
    pub async fn make_move(&self, key: Uuid, raw_guess: &str) -> Result<GameSnapshot, GameError> {
        let txn = self.db.begin().await.map_err(transaction_error)?;

        let mut game = load_game(&txn, key).await?;
        let user = load_owner(&txn, &game).await?;
        let guessed = MoveRepository::guessed_letters(&txn, game.id).await?;

        let outcome = engine::apply_guess(&mut game, raw_guess, &guessed);
        if let GuessOutcome::Applied {
            record, finished, ..
        } = &outcome
        {
            GameRepository::update(&txn, &game).await?;
            MoveRepository::append(&txn, record).await?;

            if let Some(won) = finished {
                let mut owner = user.clone();
                stats::record_outcome(&mut owner, *won);
                UserRepository::update_stats(&txn, &owner).await?;
                ScoreRepository::insert(&txn, &stats::build_score(&game, *won)).await?;
            }
        }

        txn.commit().await.map_err(transaction_error)?;
        Ok(GameSnapshot::new(&game, user.name, outcome.message()))
    }

    /// Cancel a game. Terminal games are left as they are; the caller still
    /// gets a snapshot back.
    pub async fn cancel_game(&self, key: Uuid) -> Result<GameSnapshot, GameError> {
        let txn = self.db.begin().await.map_err(transaction_error)?;

        let mut game = load_game(&txn, key).await?;
        let user = load_owner(&txn, &game).await?;
        if engine::cancel_game(&mut game) {
            GameRepository::update(&txn, &game).await?;
        }

        txn.commit().await.map_err(transaction_error)?;
        Ok(GameSnapshot::new(&game, user.name, "Game cancelled."))
    }

    pub async fn history(&self, key: Uuid) -> Result<GameHistory, GameError> {
        let game = load_game(&self.db, key).await?;
        let moves = MoveRepository::history(&self.db, game.id).await?;

        let current_status = match game.status {
            GameStatus::InProgress => "Not over",
            GameStatus::Won | GameStatus::Lost => "Over",
            GameStatus::Cancelled => "Cancelled",
        };

        Ok(GameHistory {
            moves: moves
                .into_iter()
                .map(|m| MoveForm {
                    index: m.move_index,
                    guess: m.guess,
                    verdict: m.verdict.as_str().to_string(),
                })
                .collect(),
            current_status: current_status.to_string(),
        })
    }

    pub async fn active_games(&self, user_name: &str) -> Result<Vec<GameSnapshot>, GameError> {
        let user = UserRepository::find_by_name(&self.db, user_name)
            .await?
            .ok_or_else(|| GameError::NotFound(format!("user {user_name}")))?;

        let games = GameRepository::active_games_for_user(&self.db, user.id).await?;
        Ok(games
            .iter()
            .map(|game| GameSnapshot::new(game, user.name.clone(), "Time to make a move!"))
            .collect())
    }

    pub async fn leaderboard(&self, limit: Option<u64>) -> Result<Vec<ScoreForm>, GameError> {
        ScoreRepository::leaderboard(&self.db, limit).await
    }

    pub async fn user_rankings(&self) -> Result<Vec<UserRank>, GameError> {
        let users = UserRepository::rankings(&self.db).await?;
        Ok(users
            .into_iter()
            .map(|u| UserRank {
                user_name: u.name,
                win_loss_ratio: u.win_loss_ratio,
            })
            .collect())
    }

    /// Users a reminder job would contact: contact address plus at least one
    /// unfinished game.
    pub async fn reminder_candidates(&self) -> Result<Vec<User>, GameError> {
        UserRepository::reminder_candidates(&self.db).await
    }

    pub async fn average_attempts_remaining(&self) -> Result<Option<f64>, GameError> {
        GameRepository::average_attempts_remaining(&self.db).await
    }
}

async fn load_game<C: ConnectionTrait>(db: &C, key: Uuid) -> Result<Game, GameError> {
    GameRepository::find_by_id(db, key)
        .await?
        .ok_or_else(|| GameError::NotFound(format!("game {key}")))
}

async fn load_owner<C: ConnectionTrait>(db: &C, game: &Game) -> Result<User, GameError> {
    UserRepository::find_by_id(db, game.user_id)
        .await?
        .ok_or_else(|| GameError::NotFound(format!("user {}", game.user_id)))
}

fn transaction_error(err: sea_orm::DbErr) -> GameError {
    GameError::Unavailable(err.to_string())
}
