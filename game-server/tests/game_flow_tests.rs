use game_core::words::WordList;
use game_persistence::connection::connect_to_memory_database;
use game_server::game_service::GameService;
use game_types::{GameError, GameSnapshot};
use migration::{Migrator, MigratorTrait};

/// Service over an in-memory database with a single-word list, so every
/// game's secret is known to the test.
async fn setup_service(word: &str) -> GameService {
    let db = connect_to_memory_database().await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    GameService::new(db, WordList::from_word_list(word).unwrap())
}

async fn win_game(service: &GameService, key: uuid::Uuid) -> GameSnapshot {
    let mut last = service.make_move(key, "c").await.unwrap();
    for letter in ["a", "t"] {
        last = service.make_move(key, letter).await.unwrap();
    }
    last
}

#[tokio::test]
async fn test_end_of_game_runs_exactly_once() {
    let service = setup_service("cat").await;
    service.create_user("alice".to_string(), None).await.unwrap();
    let key = service.start_game("alice", None).await.unwrap().key;

    let snapshot = win_game(&service, key).await;
    assert_eq!(snapshot.message, "You win!");

    let board = service.leaderboard(None).await.unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].misses, 0);

    // Post-terminal guesses change nothing and score nothing.
    let snapshot = service.make_move(key, "z").await.unwrap();
    assert_eq!(snapshot.message, "Game already over!");

    let board = service.leaderboard(None).await.unwrap();
    assert_eq!(board.len(), 1);

    let rankings = service.user_rankings().await.unwrap();
    assert_eq!(rankings[0].win_loss_ratio, 1.0);
}

#[tokio::test]
async fn test_lost_game_updates_loss_counters() {
    let service = setup_service("dog").await;
    service.create_user("bob".to_string(), None).await.unwrap();
    let key = service.start_game("bob", Some(1)).await.unwrap().key;

    let snapshot = service.make_move(key, "x").await.unwrap();
    assert_eq!(snapshot.message, "Game over!");
    assert_eq!(snapshot.attempts_remaining, 0);

    let board = service.leaderboard(None).await.unwrap();
    assert_eq!(board.len(), 1);
    assert!(!board[0].won);
    assert_eq!(board[0].misses, -1);

    let rankings = service.user_rankings().await.unwrap();
    assert_eq!(rankings[0].win_loss_ratio, 0.0);
}

#[tokio::test]
async fn test_cancel_is_idempotent_and_never_scores() {
    let service = setup_service("cat").await;
    service.create_user("alice".to_string(), None).await.unwrap();
    let key = service.start_game("alice", None).await.unwrap().key;

    let snapshot = service.cancel_game(key).await.unwrap();
    assert!(snapshot.game_over);
    assert_eq!(snapshot.message, "Game cancelled.");

    // Cancelling again changes nothing.
    let snapshot = service.cancel_game(key).await.unwrap();
    assert!(snapshot.game_over);
    assert_eq!(snapshot.message, "Game cancelled.");

    assert!(service.leaderboard(None).await.unwrap().is_empty());

    let history = service.history(key).await.unwrap();
    assert_eq!(history.current_status, "Cancelled");
}

#[tokio::test]
async fn test_cancelling_a_won_game_keeps_it_won() {
    let service = setup_service("cat").await;
    service.create_user("alice".to_string(), None).await.unwrap();
    let key = service.start_game("alice", None).await.unwrap().key;
    win_game(&service, key).await;

    service.cancel_game(key).await.unwrap();

    let history = service.history(key).await.unwrap();
    assert_eq!(history.current_status, "Over");
    assert_eq!(service.leaderboard(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_moves_and_game_state_stay_consistent() {
    let service = setup_service("cat").await;
    service.create_user("alice".to_string(), None).await.unwrap();
    let key = service.start_game("alice", None).await.unwrap().key;

    service.make_move(key, "c").await.unwrap();
    service.make_move(key, "z").await.unwrap();
    service.make_move(key, "q").await.unwrap();

    let snapshot = service.get_game(key).await.unwrap();
    let history = service.history(key).await.unwrap();

    let miss_count = history.moves.iter().filter(|m| m.verdict == "Miss").count();
    assert_eq!(miss_count, 2);
    assert_eq!(snapshot.attempts_remaining, 6 - miss_count as i32);

    let indices: Vec<_> = history.moves.iter().map(|m| m.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(snapshot.word_status, "c--");
}

#[tokio::test]
async fn test_unknown_user_and_game_are_not_found() {
    let service = setup_service("cat").await;

    let err = service.start_game("ghost", None).await.unwrap_err();
    assert!(matches!(err, GameError::NotFound(_)));

    let err = service.make_move(uuid::Uuid::new_v4(), "a").await.unwrap_err();
    assert!(matches!(err, GameError::NotFound(_)));

    let err = service.active_games("ghost").await.unwrap_err();
    assert!(matches!(err, GameError::NotFound(_)));
}

#[tokio::test]
async fn test_rankings_order_users_by_ratio() {
    let service = setup_service("cat").await;
    service.create_user("winner".to_string(), None).await.unwrap();
    service.create_user("loser".to_string(), None).await.unwrap();

    let key = service.start_game("winner", None).await.unwrap().key;
    win_game(&service, key).await;

    let key = service.start_game("loser", Some(1)).await.unwrap().key;
    service.make_move(key, "z").await.unwrap();

    let rankings = service.user_rankings().await.unwrap();
    let names: Vec<_> = rankings.iter().map(|r| r.user_name.as_str()).collect();
    assert_eq!(names, vec!["winner", "loser"]);
}

#[tokio::test]
async fn test_reminder_candidates_follow_active_games() {
    let service = setup_service("cat").await;
    service
        .create_user("alice".to_string(), Some("alice@example.com".to_string()))
        .await
        .unwrap();

    assert!(service.reminder_candidates().await.unwrap().is_empty());

    let key = service.start_game("alice", None).await.unwrap().key;
    let candidates = service.reminder_candidates().await.unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name, "alice");

    service.cancel_game(key).await.unwrap();
    assert!(service.reminder_candidates().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_average_attempts_tracks_in_progress_games() {
    let service = setup_service("cat").await;
    service.create_user("alice".to_string(), None).await.unwrap();

    assert_eq!(service.average_attempts_remaining().await.unwrap(), None);

    let first = service.start_game("alice", None).await.unwrap().key;
    service.start_game("alice", None).await.unwrap();
    service.make_move(first, "z").await.unwrap();
    service.make_move(first, "q").await.unwrap();

    // One game at 4 attempts, one untouched at 6.
    assert_eq!(
        service.average_attempts_remaining().await.unwrap(),
        Some(5.0)
    );
}
