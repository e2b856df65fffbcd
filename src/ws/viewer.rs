//! Display fetch handlers, available to every role
//!
//! These back the host and result screens between change-feed pushes.

use crate::protocol::{AnswerInfo, ServerMessage};
use crate::state::AppState;
use std::sync::Arc;

pub async fn handle_get_quiz(state: &Arc<AppState>, code: String) -> Option<ServerMessage> {
    match state.get_quiz(&code).await {
        Some(quiz) => Some(ServerMessage::QuizUpdated { quiz }),
        None => Some(ServerMessage::Error {
            code: "QUIZ_NOT_FOUND".to_string(),
            msg: "Quiz not found".to_string(),
        }),
    }
}

pub async fn handle_get_participants(
    state: &Arc<AppState>,
    code: String,
) -> Option<ServerMessage> {
    let quiz = match state.get_quiz(&code).await {
        Some(q) => q,
        None => {
            return Some(ServerMessage::Error {
                code: "QUIZ_NOT_FOUND".to_string(),
                msg: "Quiz not found".to_string(),
            });
        }
    };

    let participants = state.participants_for(&quiz.id).await;
    Some(ServerMessage::ParticipantsUpdated { participants })
}

pub async fn handle_get_rankings(state: &Arc<AppState>, code: String) -> Option<ServerMessage> {
    match state.rankings(&code).await {
        Ok(entries) => Some(ServerMessage::Rankings { entries }),
        Err(e) => Some((&e).into()),
    }
}

pub async fn handle_get_answers(
    state: &Arc<AppState>,
    code: String,
    question_index: usize,
) -> Option<ServerMessage> {
    match state.answers_for_question(&code, question_index).await {
        Ok(answers) => Some(ServerMessage::Answers {
            question_index,
            answers: answers.iter().map(AnswerInfo::from).collect(),
        }),
        Err(e) => Some((&e).into()),
    }
}
