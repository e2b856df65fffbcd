mod answer;
mod participant;
mod quiz;

pub use answer::compute_points;

use crate::protocol::ServerMessage;
use crate::questions::QuestionBank;
use crate::types::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// A change-feed event scoped to a single quiz.
///
/// Connections forward only the events for the quiz they watch. The feed is
/// display plumbing: the engine publishes after mutations but never waits on
/// or reads from it.
#[derive(Debug, Clone)]
pub struct FeedEvent {
    pub quiz_code: String,
    pub message: ServerMessage,
}

/// Shared application state
///
/// Lock order, where more than one guard is held: quizzes, then answers,
/// then participants.
#[derive(Clone)]
pub struct AppState {
    pub quizzes: Arc<RwLock<HashMap<QuizId, Quiz>>>,
    pub participants: Arc<RwLock<HashMap<ParticipantId, Participant>>>,
    pub answers: Arc<RwLock<HashMap<AnswerId, Answer>>>,
    /// Read-only question bank shared by every quiz
    pub questions: QuestionBank,
    /// Quiz-duration budget used when the host does not pick one
    pub default_timer_seconds: u32,
    /// Insertion counter for answers; tie-break on equal response times
    answer_seq: Arc<AtomicU64>,
    /// Broadcast channel carrying change notifications to connected clients
    pub feed: broadcast::Sender<FeedEvent>,
}

impl AppState {
    pub fn new(questions: QuestionBank, default_timer_seconds: u32) -> Self {
        let (tx, _rx) = broadcast::channel(256);
        Self {
            quizzes: Arc::new(RwLock::new(HashMap::new())),
            participants: Arc::new(RwLock::new(HashMap::new())),
            answers: Arc::new(RwLock::new(HashMap::new())),
            questions,
            default_timer_seconds,
            answer_seq: Arc::new(AtomicU64::new(0)),
            feed: tx,
        }
    }

    pub(crate) fn next_answer_seq(&self) -> u64 {
        self.answer_seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Publish a change notification for a quiz. A send error only means no
    /// client is connected.
    pub fn publish(&self, quiz_code: &str, message: ServerMessage) {
        let _ = self.feed.send(FeedEvent {
            quiz_code: quiz_code.to_string(),
            message,
        });
    }

    /// Resolve a position in a quiz's question sequence against the bank.
    pub fn question_at(&self, quiz: &Quiz, question_index: usize) -> Option<&Question> {
        let bank_index = *quiz.question_indices.get(question_index)?;
        self.questions.get(bank_index)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::state;
    use crate::error::QuizError;
    use crate::types::QuizStatus;

    #[tokio::test]
    async fn test_create_quiz() {
        let state = state();
        let quiz = state.create_quiz("Host".to_string(), 30).await.unwrap();

        assert_eq!(quiz.status, QuizStatus::Waiting);
        assert_eq!(quiz.code.len(), 8);
        assert!(quiz
            .code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert_eq!(quiz.current_question_index, 0);
        assert_eq!(quiz.question_indices, vec![0, 1]);
        assert!(quiz.started_at.is_none());
        assert!(state.get_quiz(&quiz.code).await.is_some());
    }

    #[tokio::test]
    async fn test_get_quiz_unknown_code() {
        let state = state();
        assert!(state.get_quiz("NOPE1234").await.is_none());
    }

    #[tokio::test]
    async fn test_join_quiz() {
        let state = state();
        let quiz = state.create_quiz("Host".to_string(), 30).await.unwrap();

        let participant = state.join_quiz(&quiz.code, "Alice").await.unwrap();
        assert_eq!(participant.name, "Alice");
        assert_eq!(participant.score, 0);
        assert_eq!(participant.quiz_id, quiz.id);
    }

    #[tokio::test]
    async fn test_join_trims_name() {
        let state = state();
        let quiz = state.create_quiz("Host".to_string(), 30).await.unwrap();

        let participant = state.join_quiz(&quiz.code, "  Alice ").await.unwrap();
        assert_eq!(participant.name, "Alice");
    }

    #[tokio::test]
    async fn test_join_rejects_duplicate_name() {
        let state = state();
        let quiz = state.create_quiz("Host".to_string(), 30).await.unwrap();

        state.join_quiz(&quiz.code, "Alice").await.unwrap();
        let result = state.join_quiz(&quiz.code, "Alice").await;
        assert_eq!(result.unwrap_err(), QuizError::NameTaken);

        // Case-sensitive: a different casing is a different name
        assert!(state.join_quiz(&quiz.code, "alice").await.is_ok());
    }

    #[tokio::test]
    async fn test_join_rejected_after_start() {
        let state = state();
        let quiz = state.create_quiz("Host".to_string(), 30).await.unwrap();
        state.start_quiz(&quiz.code).await.unwrap();

        let result = state.join_quiz(&quiz.code, "Late").await;
        assert_eq!(result.unwrap_err(), QuizError::QuizAlreadyStarted);
    }

    #[tokio::test]
    async fn test_start_sets_started_at_once() {
        let state = state();
        let quiz = state.create_quiz("Host".to_string(), 30).await.unwrap();

        let started = state.start_quiz(&quiz.code).await.unwrap();
        assert_eq!(started.status, QuizStatus::InProgress);
        assert!(started.started_at.is_some());

        // Re-starting is an invalid transition
        let result = state.start_quiz(&quiz.code).await;
        assert_eq!(
            result.unwrap_err(),
            QuizError::InvalidTransition {
                from: QuizStatus::InProgress,
                to: QuizStatus::InProgress,
            }
        );
    }

    #[tokio::test]
    async fn test_status_moves_only_forward() {
        let state = state();
        let quiz = state.create_quiz("Host".to_string(), 30).await.unwrap();

        // Completing a waiting quiz skips in_progress
        let result = state.complete_quiz(&quiz.code).await;
        assert_eq!(
            result.unwrap_err(),
            QuizError::InvalidTransition {
                from: QuizStatus::Waiting,
                to: QuizStatus::Completed,
            }
        );

        state.start_quiz(&quiz.code).await.unwrap();
        let completed = state.complete_quiz(&quiz.code).await.unwrap();
        assert_eq!(completed.status, QuizStatus::Completed);

        // Completed is terminal
        assert!(state.complete_quiz(&quiz.code).await.is_err());
    }

    #[tokio::test]
    async fn test_advance_question() {
        let state = state();
        let quiz = state.create_quiz("Host".to_string(), 30).await.unwrap();

        // Not started yet
        let result = state.advance_question(&quiz.code).await;
        assert_eq!(result.unwrap_err(), QuizError::QuizNotInProgress);

        state.start_quiz(&quiz.code).await.unwrap();
        let advanced = state.advance_question(&quiz.code).await.unwrap();
        assert_eq!(advanced.current_question_index, 1);

        // Already on the last question; the host completes instead
        let result = state.advance_question(&quiz.code).await;
        assert_eq!(result.unwrap_err(), QuizError::QuestionOutOfRange);
    }

    #[tokio::test]
    async fn test_question_at_resolves_sequence_indices() {
        let state = state();
        let quiz = state.create_quiz("Host".to_string(), 30).await.unwrap();

        let q0 = state.question_at(&quiz, 0).unwrap();
        assert_eq!(q0.question, state.questions[quiz.question_indices[0]].question);
        assert!(state.question_at(&quiz, 2).is_none());
    }
}
