use super::AppState;
use crate::error::QuizError;
use crate::protocol::{RankingEntry, ServerMessage};
use crate::types::*;

impl AppState {
    /// Join a quiz as a participant. Only possible while the quiz is waiting
    /// and the (case-sensitive) name is unused within it. The quizzes guard
    /// is held across the insert so a concurrent start cannot slip in
    /// between the status check and the join.
    pub async fn join_quiz(&self, code: &str, name: &str) -> Result<Participant, QuizError> {
        let quizzes = self.quizzes.read().await;
        let quiz = quizzes
            .values()
            .find(|q| q.code == code)
            .ok_or(QuizError::QuizNotFound)?
            .clone();

        if quiz.status != QuizStatus::Waiting {
            return Err(QuizError::QuizAlreadyStarted);
        }

        let name = name.trim();

        let mut participants = self.participants.write().await;
        if participants
            .values()
            .any(|p| p.quiz_id == quiz.id && p.name == name)
        {
            return Err(QuizError::NameTaken);
        }

        let participant = Participant {
            id: ulid::Ulid::new().to_string(),
            quiz_id: quiz.id.clone(),
            name: name.to_string(),
            score: 0,
            joined_at: chrono::Utc::now().to_rfc3339(),
        };
        participants.insert(participant.id.clone(), participant.clone());
        drop(participants);
        drop(quizzes);

        tracing::info!("{} joined quiz {}", participant.name, code);
        let roster = self.participants_for(&quiz.id).await;
        self.publish(
            code,
            ServerMessage::ParticipantsUpdated {
                participants: roster,
            },
        );
        Ok(participant)
    }

    /// Fetch a participant by id.
    pub async fn get_participant(&self, id: &str) -> Option<Participant> {
        self.participants.read().await.get(id).cloned()
    }

    /// Participants of a quiz in join order.
    pub async fn participants_for(&self, quiz_id: &QuizId) -> Vec<Participant> {
        let mut list: Vec<Participant> = self
            .participants
            .read()
            .await
            .values()
            .filter(|p| p.quiz_id == *quiz_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.joined_at.cmp(&b.joined_at).then_with(|| a.id.cmp(&b.id)));
        list
    }

    /// Current standings for a quiz: score descending, join order on ties.
    pub async fn rankings(&self, code: &str) -> Result<Vec<RankingEntry>, QuizError> {
        let quiz = self.get_quiz(code).await.ok_or(QuizError::QuizNotFound)?;

        let mut list = self.participants_for(&quiz.id).await;
        list.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.joined_at.cmp(&b.joined_at)));

        Ok(list
            .into_iter()
            .enumerate()
            .map(|(i, p)| RankingEntry {
                rank: i + 1,
                participant_id: p.id,
                name: p.name,
                score: p.score,
            })
            .collect())
    }

    /// Add points to a participant's score. A single delta under the write
    /// guard, never a read-modify-write across a suspension point.
    pub(crate) async fn increment_score(
        &self,
        participant_id: &ParticipantId,
        delta: u32,
    ) -> Result<u32, QuizError> {
        let mut participants = self.participants.write().await;
        let participant = participants
            .get_mut(participant_id)
            .ok_or(QuizError::ParticipantNotFound)?;
        participant.score += delta;
        Ok(participant.score)
    }
}
