//! Host-only command handlers
//!
//! All handlers in this module require the Host role. Authorization is
//! checked in the main dispatch layer before calling these.

use crate::protocol::ServerMessage;
use crate::state::AppState;
use std::sync::Arc;

pub async fn handle_create_quiz(
    state: &Arc<AppState>,
    host_name: String,
    timer_seconds: Option<u32>,
) -> Option<ServerMessage> {
    let timer_seconds = timer_seconds.unwrap_or(state.default_timer_seconds);
    tracing::info!(
        "Host {} creating quiz with a {}s timer",
        host_name,
        timer_seconds
    );

    match state.create_quiz(host_name, timer_seconds).await {
        Ok(quiz) => Some(ServerMessage::QuizCreated { quiz }),
        Err(e) => Some((&e).into()),
    }
}

pub async fn handle_start_quiz(state: &Arc<AppState>, code: String) -> Option<ServerMessage> {
    tracing::info!("Host starting quiz {}", code);
    match state.start_quiz(&code).await {
        Ok(quiz) => Some(ServerMessage::QuizUpdated { quiz }),
        Err(e) => Some((&e).into()),
    }
}

pub async fn handle_next_question(state: &Arc<AppState>, code: String) -> Option<ServerMessage> {
    tracing::info!("Host advancing quiz {}", code);
    match state.advance_question(&code).await {
        Ok(quiz) => Some(ServerMessage::QuizUpdated { quiz }),
        Err(e) => Some((&e).into()),
    }
}

pub async fn handle_complete_quiz(state: &Arc<AppState>, code: String) -> Option<ServerMessage> {
    tracing::info!("Host completing quiz {}", code);
    match state.complete_quiz(&code).await {
        Ok(quiz) => Some(ServerMessage::QuizUpdated { quiz }),
        Err(e) => Some((&e).into()),
    }
}
