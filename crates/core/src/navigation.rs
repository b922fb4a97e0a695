use crate::model::QuestionId;

/// Where to go after a question is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Question(QuestionId),
    /// Back to the question list.
    Board,
}

/// The question that follows `current` among `skill_questions`.
///
/// Picks the lowest id greater than `current`, wrapping to the lowest id in
/// the skill. `skill_questions` need not be sorted. Returns `None` when the
/// skill has no questions.
#[must_use]
pub fn next_in_skill(skill_questions: &[QuestionId], current: QuestionId) -> Option<QuestionId> {
    let after = skill_questions.iter().copied().filter(|id| *id > current).min();
    after.or_else(|| skill_questions.iter().copied().min())
}

/// Resolve the post-submission destination.
///
/// A skill whose only question is `current` sends the user back to the board.
#[must_use]
pub fn destination_after(skill_questions: &[QuestionId], current: QuestionId) -> Destination {
    match next_in_skill(skill_questions, current) {
        Some(next) if next != current => Destination::Question(next),
        _ => Destination::Board,
    }
}
