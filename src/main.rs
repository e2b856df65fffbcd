use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quizcast::{broadcast, config::Config, questions, state::AppState, ws};

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quizcast=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting quizcast...");

    let config = Config::from_env();

    let bank = match &config.questions_path {
        Some(path) => match questions::load_questions(path) {
            Ok(bank) => {
                tracing::info!("Loaded {} questions from {}", bank.len(), path.display());
                bank
            }
            Err(e) => {
                tracing::error!("Failed to load question bank {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => questions::builtin_questions(),
    };

    let state = Arc::new(AppState::new(Arc::new(bank), config.default_timer_seconds));

    // Spawn background task re-broadcasting standings for live displays
    broadcast::spawn_rankings_broadcaster(state.clone());

    let app = Router::new()
        .route("/ws", get(ws::ws_handler))
        .fallback_service(ServeDir::new("static"))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::new(config.bind_addr, config.port);
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
