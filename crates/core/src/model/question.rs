use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{QuestionId, SkillId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// How hard a question is. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(QuestionError::UnknownDifficulty(s.to_owned())),
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A practice question. Questions are created once and never edited, so the
/// type only exposes getters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    skill_id: SkillId,
    difficulty: Difficulty,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` if the trimmed text is empty.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        skill_id: SkillId,
        difficulty: Difficulty,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        Ok(Self {
            id,
            text,
            skill_id,
            difficulty,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// First 50 characters of the text, for list views.
    #[must_use]
    pub fn preview(&self) -> String {
        self.text.chars().take(50).collect()
    }

    #[must_use]
    pub fn skill_id(&self) -> SkillId {
        self.skill_id
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" easy ".parse::<Difficulty>().unwrap(), Difficulty::Easy);
    }

    #[test]
    fn difficulty_rejects_unknown() {
        assert_eq!(
            "extreme".parse::<Difficulty>(),
            Err(QuestionError::UnknownDifficulty("extreme".into()))
        );
    }

    #[test]
    fn difficulty_display_matches_storage_text() {
        assert_eq!(Difficulty::Medium.to_string(), "medium");
    }

    #[test]
    fn question_rejects_blank_text() {
        let res = Question::new(QuestionId::new(1), "  \n", SkillId::new(1), Difficulty::Easy);
        assert_eq!(res, Err(QuestionError::EmptyText));
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let text = "é".repeat(60);
        let q = Question::new(QuestionId::new(1), text, SkillId::new(1), Difficulty::Easy).unwrap();
        assert_eq!(q.preview().chars().count(), 50);
    }
}
