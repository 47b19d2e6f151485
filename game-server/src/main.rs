use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};

use game_core::words::WordList;
use game_persistence::connection::connect_and_migrate;
use game_server::{
    config::Config, create_routes, game_service::GameService, stats_cache::AverageAttemptsCache,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting hangman server...");

    let config = Config::new();

    // Load the word list: from disk when configured, otherwise embedded
    let words = match &config.word_list_path {
        Some(path) => {
            info!("Loading word list from {}", path);
            WordList::from_file(path)
        }
        None => WordList::embedded(),
    };
    let words = match words {
        Ok(words) => words,
        Err(e) => {
            tracing::error!("Failed to load word list: {}", e);
            tracing::error!("Set WORD_LIST_PATH to a newline-separated word file.");
            std::process::exit(1);
        }
    };

    // Initialize database connection and run migrations
    let db = match connect_and_migrate().await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };

    let service = Arc::new(GameService::new(db, words));
    let cache = Arc::new(AverageAttemptsCache::new());

    // Warm the stats cache once before serving
    cache.refresh(&service).await;

    let routes = create_routes(service.clone(), cache.clone());

    // Periodic reminder sweep: users with a contact address and unfinished
    // games. Delivery belongs to an external mailer; this only surfaces them.
    let sweep_service = service.clone();
    let sweep_interval = Duration::from_secs(config.reminder_interval_seconds);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_interval);
        loop {
            interval.tick().await;
            match sweep_service.reminder_candidates().await {
                Ok(users) => {
                    for user in users {
                        info!(user = %user.name, "reminder: unfinished games waiting");
                    }
                }
                Err(e) => warn!("reminder sweep failed: {}", e),
            }
        }
    });

    info!("Server starting on {}:{}", config.host, config.port);

    let addr = (
        config.host.parse::<std::net::IpAddr>().unwrap(),
        config.port,
    );

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt()).unwrap();
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate()).unwrap();

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}
