//! View models: service results flattened into render-ready strings.

use prep_core::model::{Question, QuestionId, Skill};
use services::{BoardQuestion, FeedbackNotice, HomeBoard, ProgressReport, QuestionPage};

#[must_use]
pub fn question_href(id: QuestionId) -> String {
    format!("/question/{id}/")
}

#[must_use]
pub fn skill_filter_href(skill: &Skill) -> String {
    format!("/?skill={}", skill.id())
}

/// Filter bar entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillLinkVm {
    pub name: String,
    pub href: String,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionRowVm {
    pub href: String,
    pub preview: String,
    pub skill_name: String,
    pub difficulty: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecommendationVm {
    pub href: String,
    pub preview: String,
    pub skill_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub total_attempts: usize,
    /// Mean score with one decimal, when any attempt was scored.
    pub average: Option<String>,
    pub best_skill: Option<String>,
    pub weakest_skill: Option<String>,
    pub recommendation: Option<RecommendationVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeVm {
    pub skills: Vec<SkillLinkVm>,
    pub filtering: bool,
    pub heading: String,
    pub questions: Vec<QuestionRowVm>,
    pub start_href: Option<String>,
    pub progress: ProgressVm,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub message: String,
    pub is_error: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub title: String,
    pub action_href: String,
    pub text: String,
    pub skill_name: String,
    pub skill_href: String,
    pub difficulty: &'static str,
    pub next_href: Option<String>,
    pub notes: String,
    pub feedback: Option<FeedbackVm>,
}

#[must_use]
pub fn map_home(board: &HomeBoard) -> HomeVm {
    let active_id = board.active_skill.as_ref().map(Skill::id);
    let skills = board
        .skills
        .iter()
        .map(|skill| SkillLinkVm {
            name: skill.name().to_owned(),
            href: skill_filter_href(skill),
            active: Some(skill.id()) == active_id,
        })
        .collect();

    let heading = match &board.active_skill {
        Some(skill) => format!("{} questions", skill.name()),
        None => "All questions".to_owned(),
    };

    HomeVm {
        skills,
        filtering: board.active_skill.is_some(),
        heading,
        questions: board.questions.iter().map(map_question_row).collect(),
        start_href: board.first_question.map(question_href),
        progress: map_progress(&board.progress),
    }
}

fn map_question_row(row: &BoardQuestion) -> QuestionRowVm {
    QuestionRowVm {
        href: question_href(row.question.id()),
        preview: row.question.preview(),
        skill_name: row.skill_name.clone(),
        difficulty: row.question.difficulty().as_str(),
    }
}

#[must_use]
pub fn map_progress(report: &ProgressReport) -> ProgressVm {
    let summary = &report.summary;
    let recommendation = match (report.weakest_skill(), &report.recommendation) {
        (Some(skill), Some(question)) => Some(map_recommendation(skill, question)),
        _ => None,
    };

    ProgressVm {
        total_attempts: summary.total_attempts,
        average: summary.average_score.map(|avg| format!("{avg:.1}")),
        best_skill: summary.best_skill().map(|s| s.name().to_owned()),
        weakest_skill: summary.weakest_skill().map(|s| s.name().to_owned()),
        recommendation,
    }
}

fn map_recommendation(skill: &Skill, question: &Question) -> RecommendationVm {
    RecommendationVm {
        href: question_href(question.id()),
        preview: question.preview(),
        skill_name: skill.name().to_owned(),
    }
}

#[must_use]
pub fn map_question(page: &QuestionPage, notes: &str, notice: Option<&FeedbackNotice>) -> QuestionVm {
    let id = page.question.id();
    QuestionVm {
        title: format!("Question {id}"),
        action_href: question_href(id),
        text: page.question.text().to_owned(),
        skill_name: page.skill.name().to_owned(),
        skill_href: skill_filter_href(&page.skill),
        difficulty: page.question.difficulty().as_str(),
        next_href: page.next_question.map(question_href),
        notes: notes.to_owned(),
        feedback: notice.map(|notice| FeedbackVm {
            message: notice.message(),
            is_error: notice.is_error(),
        }),
    }
}
