use crate::error::QuizError;
use crate::types::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    // Host-only messages
    HostCreateQuiz {
        host_name: String,
        /// Falls back to the server default when omitted
        timer_seconds: Option<u32>,
    },
    HostStartQuiz {
        code: String,
    },
    HostNextQuestion {
        code: String,
    },
    HostCompleteQuiz {
        code: String,
    },

    // Participant messages
    Join {
        code: String,
        name: String,
    },
    GetQuestion {
        code: String,
        question_index: usize,
    },
    SubmitAnswer {
        code: String,
        participant_id: ParticipantId,
        question_index: usize,
        answer: String,
        response_time_ms: u64,
    },

    // Display fetches (any role)
    GetQuiz {
        code: String,
    },
    GetParticipants {
        code: String,
    },
    GetRankings {
        code: String,
    },
    GetAnswers {
        code: String,
        question_index: usize,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol: String,
        role: Role,
        server_now: String,
    },
    QuizCreated {
        quiz: Quiz,
    },
    /// Broadcast whenever a quiz row changes (status, question pointer)
    QuizUpdated {
        quiz: Quiz,
    },
    Joined {
        participant: Participant,
        quiz: Quiz,
    },
    /// Broadcast whenever the participant set or a score changes
    ParticipantsUpdated {
        participants: Vec<Participant>,
    },
    Question {
        question_index: usize,
        question: QuestionInfo,
    },
    /// Sent to the submitting participant once their answer is recorded
    AnswerAccepted {
        answer: AnswerInfo,
    },
    /// Broadcast whenever an answer row is created or scored
    AnswerRecorded {
        answer: AnswerInfo,
    },
    Answers {
        question_index: usize,
        answers: Vec<AnswerInfo>,
    },
    Rankings {
        entries: Vec<RankingEntry>,
    },
    Error {
        code: String,
        msg: String,
    },
}

impl From<&QuizError> for ServerMessage {
    fn from(e: &QuizError) -> Self {
        ServerMessage::Error {
            code: e.code().to_string(),
            msg: e.to_string(),
        }
    }
}

/// Question as shown to participants (the correct answer is withheld to
/// prevent spoilers)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionInfo {
    pub question: String,
    pub options: Vec<String>,
    pub timer_seconds: u32,
}

impl From<&Question> for QuestionInfo {
    fn from(q: &Question) -> Self {
        Self {
            question: q.question.clone(),
            options: q.options.clone(),
            timer_seconds: q.timer_seconds,
        }
    }
}

/// Answer row as shown on result screens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerInfo {
    pub id: AnswerId,
    pub participant_id: ParticipantId,
    pub question_index: usize,
    pub is_correct: bool,
    pub points_awarded: u32,
    pub response_time_ms: u64,
}

impl From<&Answer> for AnswerInfo {
    fn from(a: &Answer) -> Self {
        Self {
            id: a.id.clone(),
            participant_id: a.participant_id.clone(),
            question_index: a.question_index,
            is_correct: a.is_correct,
            points_awarded: a.points_awarded,
            response_time_ms: a.response_time_ms,
        }
    }
}

/// One leaderboard row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankingEntry {
    pub rank: usize,
    pub participant_id: ParticipantId,
    pub name: String,
    pub score: u32,
}
