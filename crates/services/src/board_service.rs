use std::sync::Arc;

use prep_core::model::{Identity, Question, QuestionId, Skill, SkillId};
use storage::repository::{QuestionRepository, SkillRepository};

use crate::error::BoardError;
use crate::progress_service::{ProgressReport, ProgressService};

/// Maximum number of questions shown on the board.
pub const BOARD_QUESTION_LIMIT: u32 = 25;

/// A question row on the board, with its skill name resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardQuestion {
    pub question: Question,
    pub skill_name: String,
}

/// Everything the question list page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeBoard {
    /// All skills, ordered by name, for the filter bar.
    pub skills: Vec<Skill>,
    /// The skill filter in effect, if the requested one exists.
    pub active_skill: Option<Skill>,
    pub questions: Vec<BoardQuestion>,
    /// Entry point for a "start session" link.
    pub first_question: Option<QuestionId>,
    pub progress: ProgressReport,
}

#[derive(Clone)]
pub struct BoardService {
    skills: Arc<dyn SkillRepository>,
    questions: Arc<dyn QuestionRepository>,
    progress: ProgressService,
}

impl BoardService {
    #[must_use]
    pub fn new(
        skills: Arc<dyn SkillRepository>,
        questions: Arc<dyn QuestionRepository>,
        progress: ProgressService,
    ) -> Self {
        Self {
            skills,
            questions,
            progress,
        }
    }

    /// Build the board, filtered by `skill_param` when it names an existing
    /// skill id. Blank, malformed or unknown values show every skill.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::Storage` on repository failures.
    pub async fn home(
        &self,
        identity: Identity,
        skill_param: Option<&str>,
    ) -> Result<HomeBoard, BoardError> {
        let skills = self.skills.list_skills().await?;

        let active_skill = match skill_param.and_then(|raw| raw.parse::<SkillId>().ok()) {
            Some(id) => self.skills.get_skill(id).await?,
            None => None,
        };

        let questions = self
            .questions
            .list_questions(active_skill.as_ref().map(Skill::id), BOARD_QUESTION_LIMIT)
            .await?;
        let first_question = questions.first().map(Question::id);

        let questions = questions
            .into_iter()
            .map(|question| {
                let skill_name = skills
                    .iter()
                    .find(|s| s.id() == question.skill_id())
                    .map(|s| s.name().to_owned())
                    .unwrap_or_default();
                BoardQuestion {
                    question,
                    skill_name,
                }
            })
            .collect();

        let progress = self.progress.report(identity).await?;

        Ok(HomeBoard {
            skills,
            active_skill,
            questions,
            first_question,
            progress,
        })
    }
}
