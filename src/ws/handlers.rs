//! WebSocket message dispatch
//!
//! This module provides the main entry point for handling client messages.
//! Authorization is checked here, then dispatched to role-specific handler
//! modules.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;
use crate::types::Role;
use std::sync::Arc;

use super::{host, participant, viewer};

/// Macro to check host authorization and return early if unauthorized
macro_rules! check_host {
    ($role:expr, $action:expr) => {
        if *$role != Role::Host {
            return Some(ServerMessage::Error {
                code: "UNAUTHORIZED".to_string(),
                msg: format!("Only host can {}", $action),
            });
        }
    };
}

/// Handle client messages and return optional response
pub async fn handle_message(
    msg: ClientMessage,
    role: &Role,
    state: &Arc<AppState>,
) -> Option<ServerMessage> {
    match msg {
        // Host-only commands (authorization checked before dispatch)
        ClientMessage::HostCreateQuiz {
            host_name,
            timer_seconds,
        } => {
            check_host!(role, "create quizzes");
            host::handle_create_quiz(state, host_name, timer_seconds).await
        }

        ClientMessage::HostStartQuiz { code } => {
            check_host!(role, "start quizzes");
            host::handle_start_quiz(state, code).await
        }

        ClientMessage::HostNextQuestion { code } => {
            check_host!(role, "advance questions");
            host::handle_next_question(state, code).await
        }

        ClientMessage::HostCompleteQuiz { code } => {
            check_host!(role, "complete quizzes");
            host::handle_complete_quiz(state, code).await
        }

        // Participant messages
        ClientMessage::Join { code, name } => participant::handle_join(state, code, name).await,

        ClientMessage::GetQuestion {
            code,
            question_index,
        } => participant::handle_get_question(state, code, question_index).await,

        ClientMessage::SubmitAnswer {
            code,
            participant_id,
            question_index,
            answer,
            response_time_ms,
        } => {
            participant::handle_submit_answer(
                state,
                code,
                participant_id,
                question_index,
                answer,
                response_time_ms,
            )
            .await
        }

        // Display fetches
        ClientMessage::GetQuiz { code } => viewer::handle_get_quiz(state, code).await,

        ClientMessage::GetParticipants { code } => {
            viewer::handle_get_participants(state, code).await
        }

        ClientMessage::GetRankings { code } => viewer::handle_get_rankings(state, code).await,

        ClientMessage::GetAnswers {
            code,
            question_index,
        } => viewer::handle_get_answers(state, code, question_index).await,
    }
}
