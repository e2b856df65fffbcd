use serde::{Deserialize, Serialize};

/// Opaque ID types for type safety
pub type QuizId = String;
pub type ParticipantId = String;
pub type AnswerId = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuizStatus {
    Waiting,
    InProgress,
    Completed,
}

/// A quiz session. The question sequence and timer budget are fixed at
/// creation; `status` only moves forward and `current_question_index` only
/// increases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: QuizId,
    /// Human-shareable join code (8 uppercase alphanumeric characters)
    pub code: String,
    pub host_name: String,
    pub status: QuizStatus,
    /// Host-driven pointer into the question sequence (0-based)
    pub current_question_index: usize,
    /// Ordered indices into the question bank, immutable after creation
    pub question_indices: Vec<usize>,
    /// Quiz-duration budget in seconds, used by the scoring decay
    pub timer_seconds: u32,
    /// Set exactly once, on transition to in_progress (RFC3339)
    pub started_at: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub quiz_id: QuizId,
    /// Unique within a quiz, case-sensitive
    pub name: String,
    /// Monotonically non-decreasing, only touched by the scoring engine
    pub score: u32,
    pub joined_at: String,
}

/// One answer per (quiz, participant, question_index), ever.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub quiz_id: QuizId,
    pub participant_id: ParticipantId,
    pub question_index: usize,
    pub answer: String,
    pub is_correct: bool,
    /// 0 at insert; updated at most once, right after insertion
    pub points_awarded: u32,
    /// Client-measured milliseconds between question display and submission
    pub response_time_ms: u64,
    /// Insertion counter, tie-break for equal response times
    pub seq: u64,
    pub answered_at: String,
}

/// A question bank entry. Quizzes reference these by index only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    /// Must match one of `options` exactly; submitted answers are compared
    /// by exact string equality, case-sensitive
    pub correct_answer: String,
    pub timer_seconds: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Host,
    Participant,
    Viewer,
}
