use std::sync::Arc;

use prep_core::model::{Identity, Question, Skill};
use prep_core::scoring::{AttemptSample, ProgressSummary, RECENT_ATTEMPT_WINDOW, summarize};
use storage::repository::{AttemptRepository, QuestionRepository};

use crate::error::BoardError;

/// Adaptive summary for one user plus the suggested next question.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressReport {
    pub summary: ProgressSummary,
    /// Lowest-id question of the weakest skill.
    pub recommendation: Option<Question>,
}

impl ProgressReport {
    #[must_use]
    pub fn weakest_skill(&self) -> Option<&Skill> {
        self.summary.weakest_skill()
    }
}

/// Computes statistics over a user's most recent attempts.
#[derive(Clone)]
pub struct ProgressService {
    attempts: Arc<dyn AttemptRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(attempts: Arc<dyn AttemptRepository>, questions: Arc<dyn QuestionRepository>) -> Self {
        Self {
            attempts,
            questions,
        }
    }

    /// Summarise the last `RECENT_ATTEMPT_WINDOW` attempts of `identity`.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::Storage` if attempts or questions cannot be read.
    pub async fn report(&self, identity: Identity) -> Result<ProgressReport, BoardError> {
        let window = u32::try_from(RECENT_ATTEMPT_WINDOW).unwrap_or(u32::MAX);
        let recent = self
            .attempts
            .recent_attempts(identity.user_id(), window)
            .await?;

        let samples: Vec<AttemptSample<'_>> = recent
            .iter()
            .map(|r| AttemptSample {
                skill: &r.skill,
                score: r.attempt.score(),
            })
            .collect();
        let summary = summarize(&samples);

        let recommendation = match summary.weakest_skill() {
            Some(skill) => self.questions.first_question_in_skill(skill.id()).await?,
            None => None,
        };

        Ok(ProgressReport {
            summary,
            recommendation,
        })
    }
}
