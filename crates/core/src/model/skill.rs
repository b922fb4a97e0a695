use thiserror::Error;

use crate::model::ids::SkillId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SkillError {
    #[error("skill name cannot be empty")]
    EmptyName,

    #[error("skill name is longer than {max} characters")]
    NameTooLong { max: usize },
}

/// A skill area that groups questions (e.g. "System Design").
///
/// Names are unique by convention only; lookups that need a stable answer go
/// through the id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Skill {
    id: SkillId,
    name: String,
}

impl Skill {
    pub const MAX_NAME_LEN: usize = 100;

    /// Creates a skill, trimming the name.
    ///
    /// # Errors
    ///
    /// Returns `SkillError` if the trimmed name is empty or too long.
    pub fn new(id: SkillId, name: impl Into<String>) -> Result<Self, SkillError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(SkillError::EmptyName);
        }
        if name.chars().count() > Self::MAX_NAME_LEN {
            return Err(SkillError::NameTooLong {
                max: Self::MAX_NAME_LEN,
            });
        }
        Ok(Self {
            id,
            name: name.to_owned(),
        })
    }

    #[must_use]
    pub fn id(&self) -> SkillId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
