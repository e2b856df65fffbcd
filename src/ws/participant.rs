//! Participant message handlers
//!
//! Joining a quiz, fetching the current question, and submitting answers.

use crate::protocol::{QuestionInfo, ServerMessage};
use crate::state::AppState;
use std::sync::Arc;

pub async fn handle_join(
    state: &Arc<AppState>,
    code: String,
    name: String,
) -> Option<ServerMessage> {
    tracing::info!("Join request for quiz {}: {}", code, name);
    match state.join_quiz(&code, &name).await {
        Ok(participant) => {
            let quiz = state.get_quiz(&code).await?;
            Some(ServerMessage::Joined { participant, quiz })
        }
        Err(e) => Some((&e).into()),
    }
}

pub async fn handle_get_question(
    state: &Arc<AppState>,
    code: String,
    question_index: usize,
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

    match state.question_at(&quiz, question_index) {
        Some(question) => Some(ServerMessage::Question {
            question_index,
            question: QuestionInfo::from(question),
        }),
        None => Some(ServerMessage::Error {
            code: "QUESTION_OUT_OF_RANGE".to_string(),
            msg: "Invalid question index".to_string(),
        }),
    }
}

pub async fn handle_submit_answer(
    state: &Arc<AppState>,
    code: String,
    participant_id: String,
    question_index: usize,
    answer: String,
    response_time_ms: u64,
) -> Option<ServerMessage> {
    tracing::info!(
        "Answer submitted for quiz {} question {} ({}ms)",
        code,
        question_index,
        response_time_ms
    );

    match state
        .submit_answer(&code, &participant_id, question_index, &answer, response_time_ms)
        .await
    {
        Ok(record) => Some(ServerMessage::AnswerAccepted {
            answer: (&record).into(),
        }),
        Err(e) => Some((&e).into()),
    }
}
