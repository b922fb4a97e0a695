use chrono::{DateTime, Utc};

use crate::model::ids::{AttemptId, QuestionId, UserId};

/// Parses a submitted score field.
///
/// Missing, blank or non-integer input yields `None`; the caller records no
/// attempt in that case. Range is not enforced (0–100 is a convention).
#[must_use]
pub fn parse_score(raw: Option<&str>) -> Option<i32> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<i32>().ok())
}

/// One scored submission linking a user to a question. Append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    id: AttemptId,
    user_id: UserId,
    question_id: QuestionId,
    score: Option<i32>,
    created_at: DateTime<Utc>,
}

impl Attempt {
    #[must_use]
    pub fn from_persisted(
        id: AttemptId,
        user_id: UserId,
        question_id: QuestionId,
        score: Option<i32>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            question_id,
            score,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> AttemptId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    #[must_use]
    pub fn score(&self) -> Option<i32> {
        self.score
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_signed_integers() {
        assert_eq!(parse_score(Some("80")), Some(80));
        assert_eq!(parse_score(Some(" 7 ")), Some(7));
        assert_eq!(parse_score(Some("+5")), Some(5));
        assert_eq!(parse_score(Some("-3")), Some(-3));
    }

    #[test]
    fn invalid_or_missing_scores_are_absent() {
        assert_eq!(parse_score(None), None);
        assert_eq!(parse_score(Some("")), None);
        assert_eq!(parse_score(Some("abc")), None);
        assert_eq!(parse_score(Some("7.5")), None);
        assert_eq!(parse_score(Some("99999999999")), None);
    }
}
