use super::AppState;
use crate::error::QuizError;
use crate::protocol::ServerMessage;
use crate::questions;
use crate::types::*;
use rand::Rng;

/// Character set for quiz codes (uppercase alphanumeric)
const CODE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CODE_LENGTH: usize = 8;
/// Bounded retries when a freshly generated code collides
const MAX_CODE_ATTEMPTS: usize = 10;

/// Generate a random 8-character quiz code
fn generate_quiz_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_CHARS[rng.random_range(0..CODE_CHARS.len())] as char)
        .collect()
}

impl AppState {
    /// Create a new quiz in the waiting state and hand back its join code.
    /// The question sequence is drawn from the bank here and never changes
    /// afterwards.
    pub async fn create_quiz(
        &self,
        host_name: String,
        timer_seconds: u32,
    ) -> Result<Quiz, QuizError> {
        let mut quizzes = self.quizzes.write().await;

        let mut code = generate_quiz_code();
        let mut attempts = 0;
        while quizzes.values().any(|q| q.code == code) {
            attempts += 1;
            if attempts >= MAX_CODE_ATTEMPTS {
                return Err(QuizError::CodeGeneration);
            }
            code = generate_quiz_code();
        }

        let quiz = Quiz {
            id: ulid::Ulid::new().to_string(),
            code,
            host_name,
            status: QuizStatus::Waiting,
            current_question_index: 0,
            question_indices: questions::select_question_indices(
                &self.questions,
                questions::MIN_QUIZ_QUESTIONS,
            ),
            timer_seconds,
            started_at: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        quizzes.insert(quiz.id.clone(), quiz.clone());
        drop(quizzes);

        tracing::info!("Created quiz {} ({})", quiz.code, quiz.id);
        self.publish(&quiz.code, ServerMessage::QuizUpdated { quiz: quiz.clone() });
        Ok(quiz)
    }

    /// Look up a quiz by its join code.
    pub async fn get_quiz(&self, code: &str) -> Option<Quiz> {
        self.quizzes
            .read()
            .await
            .values()
            .find(|q| q.code == code)
            .cloned()
    }

    /// The quiz lifecycle is strictly forward, single direction, no re-entry.
    fn is_valid_status_transition(from: QuizStatus, to: QuizStatus) -> bool {
        use QuizStatus::*;
        matches!((from, to), (Waiting, InProgress) | (InProgress, Completed))
    }

    async fn transition_status(&self, code: &str, to: QuizStatus) -> Result<Quiz, QuizError> {
        let mut quizzes = self.quizzes.write().await;
        let quiz = quizzes
            .values_mut()
            .find(|q| q.code == code)
            .ok_or(QuizError::QuizNotFound)?;

        if !Self::is_valid_status_transition(quiz.status, to) {
            return Err(QuizError::InvalidTransition {
                from: quiz.status,
                to,
            });
        }

        quiz.status = to;
        if to == QuizStatus::InProgress && quiz.started_at.is_none() {
            quiz.started_at = Some(chrono::Utc::now().to_rfc3339());
        }
        let quiz = quiz.clone();
        drop(quizzes);

        tracing::info!("Quiz {} is now {:?}", quiz.code, quiz.status);
        self.publish(&quiz.code, ServerMessage::QuizUpdated { quiz: quiz.clone() });
        Ok(quiz)
    }

    /// Start a waiting quiz: joining closes, answers open.
    pub async fn start_quiz(&self, code: &str) -> Result<Quiz, QuizError> {
        self.transition_status(code, QuizStatus::InProgress).await
    }

    /// Complete an in-progress quiz. Nothing in the model mutates afterwards.
    pub async fn complete_quiz(&self, code: &str) -> Result<Quiz, QuizError> {
        self.transition_status(code, QuizStatus::Completed).await
    }

    /// Advance the host's question pointer. Rejected on the last question;
    /// the host completes the quiz instead.
    pub async fn advance_question(&self, code: &str) -> Result<Quiz, QuizError> {
        let mut quizzes = self.quizzes.write().await;
        let quiz = quizzes
            .values_mut()
            .find(|q| q.code == code)
            .ok_or(QuizError::QuizNotFound)?;

        if quiz.status != QuizStatus::InProgress {
            return Err(QuizError::QuizNotInProgress);
        }
        if quiz.current_question_index + 1 >= quiz.question_indices.len() {
            return Err(QuizError::QuestionOutOfRange);
        }

        quiz.current_question_index += 1;
        let quiz = quiz.clone();
        drop(quizzes);

        self.publish(&quiz.code, ServerMessage::QuizUpdated { quiz: quiz.clone() });
        Ok(quiz)
    }
}
