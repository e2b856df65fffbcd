use crate::protocol::ServerMessage;
use crate::state::AppState;
use crate::types::QuizStatus;
use std::sync::Arc;
use std::time::Duration;

/// Spawn a background task that re-broadcasts the standings of every
/// in-progress quiz at a fixed cadence. Displays normally refresh from the
/// per-mutation change feed; this loop re-sends the current state for
/// clients that connected late. The engine never depends on it.
pub fn spawn_rankings_broadcaster(state: Arc<AppState>) {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_millis(2000)).await;

            let codes: Vec<String> = state
                .quizzes
                .read()
                .await
                .values()
                .filter(|q| q.status == QuizStatus::InProgress)
                .map(|q| q.code.clone())
                .collect();

            for code in codes {
                match state.rankings(&code).await {
                    Ok(entries) => {
                        state.publish(&code, ServerMessage::Rankings { entries });
                    }
                    Err(e) => {
                        tracing::warn!("Rankings broadcast skipped for {}: {}", code, e);
                    }
                }
            }
        }
    });
}
