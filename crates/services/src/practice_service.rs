use std::sync::Arc;

use prep_core::Clock;
use prep_core::model::{AttemptId, Identity, Question, QuestionId, Skill, parse_score};
use prep_core::navigation::{Destination, destination_after};
use storage::repository::{
    AttemptRepository, NewAttemptRecord, QuestionRepository, SkillRepository,
};
use tracing::{debug, info, warn};

use crate::error::{FeedbackError, PracticeError};
use crate::feedback::{API_KEY_ENV, FeedbackGateway, FeedbackRequest};

//
// ─── REQUEST ───────────────────────────────────────────────────────────────────
//

/// What the user asked for when submitting a question form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeAction {
    /// Ask the coach to critique the notes and stay on the question.
    Feedback,
    /// Record the score (if any) and move on.
    Advance,
}

impl PracticeAction {
    /// Only `ai` selects feedback; anything else, including nothing, advances.
    #[must_use]
    pub fn from_form(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("ai") => Self::Feedback,
            _ => Self::Advance,
        }
    }
}

/// A submitted question form, unvalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub action: PracticeAction,
    pub notes: Option<String>,
    pub score: Option<String>,
}

//
// ─── RESPONSE ──────────────────────────────────────────────────────────────────
//

/// A question with its skill and the question "next" would lead to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPage {
    pub question: Question,
    pub skill: Skill,
    /// `None` when the skill has no other question.
    pub next_question: Option<QuestionId>,
}

/// Result of the feedback action, shown on the question page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackNotice {
    /// The coach's text, unchanged.
    Critique(String),
    MissingNotes,
    NotConfigured,
    /// The gateway failed; carries the cause.
    Failed(String),
}

impl FeedbackNotice {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            FeedbackNotice::Critique(text) => text.clone(),
            FeedbackNotice::MissingNotes => {
                "Please type your answer in the notes box before asking for AI feedback.".into()
            }
            FeedbackNotice::NotConfigured => format!(
                "AI feedback is not configured yet. \
                 Set the {API_KEY_ENV} environment variable to enable this feature."
            ),
            FeedbackNotice::Failed(cause) => format!("Sorry, AI feedback failed: {cause}"),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, FeedbackNotice::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Stay on the question and show the notice next to the submitted notes.
    Feedback {
        page: QuestionPage,
        notes: String,
        notice: FeedbackNotice,
    },
    /// Leave the question; `attempt` is set when a score was recorded.
    Advanced {
        attempt: Option<AttemptId>,
        destination: Destination,
    },
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Drives a single question-answer interaction.
///
/// Each `submit` writes at most one attempt and makes at most one gateway
/// request.
#[derive(Clone)]
pub struct PracticeService {
    clock: Clock,
    skills: Arc<dyn SkillRepository>,
    questions: Arc<dyn QuestionRepository>,
    attempts: Arc<dyn AttemptRepository>,
    gateway: Arc<dyn FeedbackGateway>,
}

impl PracticeService {
    #[must_use]
    pub fn new(
        clock: Clock,
        skills: Arc<dyn SkillRepository>,
        questions: Arc<dyn QuestionRepository>,
        attempts: Arc<dyn AttemptRepository>,
        gateway: Arc<dyn FeedbackGateway>,
    ) -> Self {
        Self {
            clock,
            skills,
            questions,
            attempts,
            gateway,
        }
    }

    /// Load a question with its skill and next-question link.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::QuestionNotFound` for an unknown id, or
    /// storage errors.
    pub async fn load_question(&self, id: QuestionId) -> Result<QuestionPage, PracticeError> {
        let question = self
            .questions
            .get_question(id)
            .await?
            .ok_or(PracticeError::QuestionNotFound(id))?;
        let skill = self
            .skills
            .get_skill(question.skill_id())
            .await?
            .ok_or(PracticeError::SkillNotFound(question.skill_id()))?;

        let next_question = match self.destination_after(&question).await? {
            Destination::Question(next) => Some(next),
            Destination::Board => None,
        };

        Ok(QuestionPage {
            question,
            skill,
            next_question,
        })
    }

    /// Handle a form submission for question `id` on behalf of `identity`.
    ///
    /// Gateway failures are reported through `FeedbackNotice::Failed`, never
    /// as an error.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::QuestionNotFound` for an unknown id, or
    /// storage errors.
    pub async fn submit(
        &self,
        identity: Identity,
        id: QuestionId,
        submission: Submission,
    ) -> Result<SubmissionOutcome, PracticeError> {
        match submission.action {
            PracticeAction::Feedback => {
                let page = self.load_question(id).await?;
                let notes = submission.notes.unwrap_or_default().trim().to_owned();
                let notice = self.request_feedback(&page, &notes).await;
                Ok(SubmissionOutcome::Feedback {
                    page,
                    notes,
                    notice,
                })
            }
            PracticeAction::Advance => {
                let question = self
                    .questions
                    .get_question(id)
                    .await?
                    .ok_or(PracticeError::QuestionNotFound(id))?;
                self.advance(identity, &question, submission.score.as_deref())
                    .await
            }
        }
    }

    async fn request_feedback(&self, page: &QuestionPage, notes: &str) -> FeedbackNotice {
        if notes.is_empty() {
            return FeedbackNotice::MissingNotes;
        }
        if !self.gateway.is_configured() {
            return FeedbackNotice::NotConfigured;
        }

        let request = FeedbackRequest {
            question_text: page.question.text().to_owned(),
            skill_name: page.skill.name().to_owned(),
            difficulty: page.question.difficulty(),
            notes: notes.to_owned(),
        };

        match self.gateway.critique(&request).await {
            Ok(text) => FeedbackNotice::Critique(text),
            Err(FeedbackError::NotConfigured) => FeedbackNotice::NotConfigured,
            Err(err) => {
                warn!(question = %page.question.id(), error = %err, "feedback request failed");
                FeedbackNotice::Failed(err.to_string())
            }
        }
    }

    async fn advance(
        &self,
        identity: Identity,
        question: &Question,
        raw_score: Option<&str>,
    ) -> Result<SubmissionOutcome, PracticeError> {
        let attempt = match parse_score(raw_score) {
            Some(score) => {
                let attempt_id = self
                    .attempts
                    .append_attempt(NewAttemptRecord {
                        user_id: identity.user_id(),
                        question_id: question.id(),
                        score: Some(score),
                        created_at: self.clock.now(),
                    })
                    .await?;
                info!(
                    attempt = %attempt_id,
                    question = %question.id(),
                    user = %identity.user_id(),
                    score,
                    "attempt recorded"
                );
                Some(attempt_id)
            }
            None => {
                debug!(question = %question.id(), "no valid score submitted; nothing recorded");
                None
            }
        };

        let destination = self.destination_after(question).await?;
        debug!(from = %question.id(), ?destination, "advancing");

        Ok(SubmissionOutcome::Advanced {
            attempt,
            destination,
        })
    }

    async fn destination_after(&self, question: &Question) -> Result<Destination, PracticeError> {
        let siblings = self
            .questions
            .question_ids_for_skill(question.skill_id())
            .await?;
        Ok(destination_after(&siblings, question.id()))
    }
}
