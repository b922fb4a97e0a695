use thiserror::Error;

use crate::model::{QuestionError, SkillError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Skill(#[from] SkillError),
    #[error(transparent)]
    Question(#[from] QuestionError),
}
