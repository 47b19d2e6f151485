use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;
use warp::Filter;
use warp::http::StatusCode;

use crate::game_service::GameService;
use crate::stats_cache::AverageAttemptsCache;
use game_types::{CreateUserRequest, GameError, MakeMoveRequest, NewGameRequest};

pub mod config;
pub mod game_service;
pub mod stats_cache;

#[derive(Deserialize)]
struct LeaderboardQuery {
    limit: Option<u64>,
}

pub fn create_routes(
    service: Arc<GameService>,
    cache: Arc<AverageAttemptsCache>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // Clone for filters
    let service_filter = warp::any().map({
        let service = service.clone();
        move || service.clone()
    });

    let cache_filter = warp::any().map({
        let cache = cache.clone();
        move || cache.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let create_user = warp::path("users")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(service_filter.clone())
        .and_then(handle_create_user);

    let new_game = warp::path("games")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(service_filter.clone())
        .and(cache_filter.clone())
        .and_then(handle_new_game);

    let get_game = warp::path!("games" / Uuid)
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(handle_get_game);

    let cancel_game = warp::path!("games" / Uuid)
        .and(warp::delete())
        .and(service_filter.clone())
        .and_then(handle_cancel_game);

    let make_move = warp::path!("games" / Uuid / "moves")
        .and(warp::post())
        .and(warp::body::json())
        .and(service_filter.clone())
        .and_then(handle_make_move);

    let game_history = warp::path!("games" / Uuid / "history")
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(handle_game_history);

    let active_games = warp::path!("users" / String / "games")
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(handle_active_games);

    // Leaderboard endpoint
    let leaderboard = warp::path("leaderboard")
        .and(warp::get())
        .and(warp::query::<LeaderboardQuery>())
        .and(service_filter.clone())
        .and_then(handle_leaderboard);

    let rankings = warp::path("rankings")
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(handle_rankings);

    let average_attempts = warp::path!("stats" / "average-attempts")
        .and(warp::get())
        .and(cache_filter.clone())
        .and_then(handle_average_attempts);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST", "DELETE"]);

    health
        .or(create_user)
        .or(new_game)
        .or(get_game)
        .or(cancel_game)
        .or(make_move)
        .or(game_history)
        .or(active_games)
        .or(leaderboard)
        .or(rankings)
        .or(average_attempts)
        .with(cors)
        .with(warp::log("hangman"))
}

fn json_error(err: GameError) -> warp::reply::WithStatus<warp::reply::Json> {
    let status = match &err {
        GameError::Conflict(_) => StatusCode::CONFLICT,
        GameError::NotFound(_) => StatusCode::NOT_FOUND,
        GameError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        GameError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };

    warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "error": err.to_string() })),
        status,
    )
}

async fn handle_create_user(
    request: CreateUserRequest,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match service.create_user(request.name, request.email).await {
        Ok(user) => Ok(warp::reply::with_status(
            warp::reply::json(&user),
            StatusCode::CREATED,
        )),
        Err(err) => Ok(json_error(err)),
    }
}

async fn handle_new_game(
    request: NewGameRequest,
    service: Arc<GameService>,
    cache: Arc<AverageAttemptsCache>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match service.start_game(&request.user_name, request.attempts).await {
        Ok(snapshot) => {
            // Refresh the stats cache off the request path.
            stats_cache::refresh_in_background(cache, service.clone());
            Ok(warp::reply::with_status(
                warp::reply::json(&snapshot),
                StatusCode::CREATED,
            ))
        }
        Err(err) => Ok(json_error(err)),
    }
}

async fn handle_get_game(
    key: Uuid,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match service.get_game(key).await {
        Ok(snapshot) => Ok(warp::reply::with_status(
            warp::reply::json(&snapshot),
            StatusCode::OK,
        )),
        Err(err) => Ok(json_error(err)),
    }
}

async fn handle_cancel_game(
    key: Uuid,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match service.cancel_game(key).await {
        Ok(snapshot) => Ok(warp::reply::with_status(
            warp::reply::json(&snapshot),
            StatusCode::OK,
        )),
        Err(err) => Ok(json_error(err)),
    }
}

async fn handle_make_move(
    key: Uuid,
    request: MakeMoveRequest,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match service.make_move(key, &request.guess).await {
        Ok(snapshot) => Ok(warp::reply::with_status(
            warp::reply::json(&snapshot),
            StatusCode::OK,
        )),
        Err(err) => Ok(json_error(err)),
    }
}

async fn handle_game_history(
    key: Uuid,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match service.history(key).await {
        Ok(history) => Ok(warp::reply::with_status(
            warp::reply::json(&history),
            StatusCode::OK,
        )),
        Err(err) => Ok(json_error(err)),
    }
}

async fn handle_active_games(
    user_name: String,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match service.active_games(&user_name).await {
        Ok(snapshots) => Ok(warp::reply::with_status(
            warp::reply::json(&snapshots),
            StatusCode::OK,
        )),
        Err(err) => Ok(json_error(err)),
    }
}

async fn handle_leaderboard(
    query: LeaderboardQuery,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match service.leaderboard(query.limit).await {
        Ok(scores) => Ok(warp::reply::with_status(
            warp::reply::json(&scores),
            StatusCode::OK,
        )),
        Err(err) => Ok(json_error(err)),
    }
}

async fn handle_rankings(
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match service.user_rankings().await {
        Ok(rankings) => Ok(warp::reply::with_status(
            warp::reply::json(&rankings),
            StatusCode::OK,
        )),
        Err(err) => Ok(json_error(err)),
    }
}

async fn handle_average_attempts(
    cache: Arc<AverageAttemptsCache>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let average = cache.get().await;
    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "average_attempts_remaining": average })),
        StatusCode::OK,
    ))
}
