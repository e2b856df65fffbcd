use super::AppState;
use crate::error::QuizError;
use crate::protocol::ServerMessage;
use crate::types::*;

/// Base points for the three fastest correct answers, by rank
const BASE_POINTS: [u32; 3] = [100, 50, 25];

/// Points for a correct answer at `rank` (1-based) among the correct answers
/// to one question. Ranks past 3 score nothing. Within the top 3, a decay
/// multiplier scales the base between 50% (entire time budget used) and 100%
/// (instant answer):
///
/// `points = round(base * (0.5 + 0.5 * max(0, 1 - response_time_ms / (timer_seconds * 1000))))`
pub fn compute_points(rank: usize, response_time_ms: u64, timer_seconds: u32) -> u32 {
    if rank == 0 || rank > BASE_POINTS.len() {
        return 0;
    }
    let base = f64::from(BASE_POINTS[rank - 1]);
    let max_time_ms = f64::from(timer_seconds) * 1000.0;
    let time_ratio = (1.0 - response_time_ms as f64 / max_time_ms).max(0.0);
    (base * (0.5 + 0.5 * time_ratio)).round() as u32
}

impl AppState {
    /// Submit an answer for a participant/question pair.
    ///
    /// Validation is fail-fast, in order: the quiz must exist and be in
    /// progress, the question index must lie within the quiz's sequence, and
    /// the participant must not have answered this question before. A failed
    /// validation leaves no trace.
    ///
    /// Participants may answer any question in the sequence; the host's
    /// current question pointer does not gate submissions.
    ///
    /// Duplicate check, insert, ranking, and points award all run under the
    /// answers write guard, so concurrent submissions for one question
    /// serialize and each ranks against a consistent snapshot. The score
    /// update is a separate delta increment; if it fails, the answer row
    /// stays recorded.
    pub async fn submit_answer(
        &self,
        code: &str,
        participant_id: &ParticipantId,
        question_index: usize,
        answer: &str,
        response_time_ms: u64,
    ) -> Result<Answer, QuizError> {
        let quiz = self.get_quiz(code).await.ok_or(QuizError::QuizNotFound)?;

        if quiz.status != QuizStatus::InProgress {
            return Err(QuizError::QuizNotInProgress);
        }
        if question_index >= quiz.question_indices.len() {
            return Err(QuizError::QuestionOutOfRange);
        }
        let question = self
            .question_at(&quiz, question_index)
            .ok_or(QuizError::QuestionOutOfRange)?;

        // Exact string equality, case-sensitive, no normalization
        let is_correct = answer == question.correct_answer;

        let mut answers = self.answers.write().await;
        let duplicate = answers.values().any(|a| {
            a.quiz_id == quiz.id
                && a.participant_id == *participant_id
                && a.question_index == question_index
        });
        if duplicate {
            return Err(QuizError::AnswerAlreadySubmitted);
        }

        let mut record = Answer {
            id: ulid::Ulid::new().to_string(),
            quiz_id: quiz.id.clone(),
            participant_id: participant_id.clone(),
            question_index,
            answer: answer.to_string(),
            is_correct,
            points_awarded: 0,
            response_time_ms,
            seq: self.next_answer_seq(),
            answered_at: chrono::Utc::now().to_rfc3339(),
        };
        answers.insert(record.id.clone(), record.clone());

        let mut points = 0;
        if is_correct {
            // Rank among the correct answers for this question, fastest
            // first, insertion order on ties
            let mut correct: Vec<&Answer> = answers
                .values()
                .filter(|a| {
                    a.quiz_id == quiz.id && a.question_index == question_index && a.is_correct
                })
                .collect();
            correct.sort_by(|a, b| {
                a.response_time_ms
                    .cmp(&b.response_time_ms)
                    .then_with(|| a.seq.cmp(&b.seq))
            });
            let rank = correct
                .iter()
                .position(|a| a.id == record.id)
                .map_or(0, |i| i + 1);

            points = compute_points(rank, response_time_ms, quiz.timer_seconds);
            if points > 0 {
                if let Some(stored) = answers.get_mut(&record.id) {
                    stored.points_awarded = points;
                    record = stored.clone();
                }
            } else {
                tracing::debug!(
                    "Correct answer for question {} ranked {}, no points",
                    question_index,
                    rank
                );
            }
        }
        drop(answers);

        if points > 0 {
            match self.increment_score(participant_id, points).await {
                Ok(total) => {
                    tracing::info!(
                        "Participant {} scored {} points on question {} (total {})",
                        participant_id,
                        points,
                        question_index,
                        total
                    );
                    let roster = self.participants_for(&quiz.id).await;
                    self.publish(
                        code,
                        ServerMessage::ParticipantsUpdated {
                            participants: roster,
                        },
                    );
                }
                Err(e) => {
                    // The answer row stays; points durably recorded on it
                    tracing::error!(
                        "Failed to credit {} points to participant {}: {}",
                        points,
                        participant_id,
                        e
                    );
                    return Err(e);
                }
            }
        }

        self.publish(
            code,
            ServerMessage::AnswerRecorded {
                answer: (&record).into(),
            },
        );
        Ok(record)
    }

    /// Answers for one question of a quiz, fastest first.
    pub async fn answers_for_question(
        &self,
        code: &str,
        question_index: usize,
    ) -> Result<Vec<Answer>, QuizError> {
        let quiz = self.get_quiz(code).await.ok_or(QuizError::QuizNotFound)?;

        let mut list: Vec<Answer> = self
            .answers
            .read()
            .await
            .values()
            .filter(|a| a.quiz_id == quiz.id && a.question_index == question_index)
            .cloned()
            .collect();
        list.sort_by(|a, b| {
            a.response_time_ms
                .cmp(&b.response_time_ms)
                .then_with(|| a.seq.cmp(&b.seq))
        });
        Ok(list)
    }
}
