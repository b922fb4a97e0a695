use dioxus::prelude::*;

use super::layout::Layout;
use crate::vm::{FeedbackVm, QuestionVm};

#[derive(Props, Clone, PartialEq)]
pub struct QuestionPageProps {
    pub vm: QuestionVm,
}

/// One question, the answer form and any feedback for it.
#[component]
pub fn QuestionPage(props: QuestionPageProps) -> Element {
    let vm = props.vm;
    let next_label = if vm.next_href.is_some() {
        "Save score & next question"
    } else {
        "Save score & back to list"
    };

    rsx! {
        Layout {
            p { class: "meta",
                a { href: "{vm.skill_href}", "{vm.skill_name}" }
                " · {vm.difficulty}"
            }
            h2 { "{vm.title}" }
            p { class: "question", "{vm.text}" }

            form { method: "post", action: "{vm.action_href}",
                label { r#for: "notes", "Your answer / notes" }
                textarea { id: "notes", name: "notes", rows: "8", "{vm.notes}" }

                if let Some(feedback) = vm.feedback.clone() {
                    FeedbackBlock { feedback: feedback }
                }

                p {
                    button { r#type: "submit", name: "action", value: "ai", "Get AI feedback" }
                }

                p {
                    label { r#for: "score", "Self-score " }
                    input { id: "score", r#type: "number", name: "score", step: "1" }
                    " "
                    button { r#type: "submit", name: "action", value: "next", "{next_label}" }
                }
            }

            nav {
                match vm.next_href.as_deref() {
                    Some(next) => rsx! { a { href: "{next}", "Skip to next question" } },
                    None => rsx! { span { "This is the only question in its skill." } },
                }
                " | "
                a { href: "/", "All questions" }
            }
        }
    }
}

#[component]
fn FeedbackBlock(feedback: FeedbackVm) -> Element {
    let class = if feedback.is_error { "feedback error" } else { "feedback" };
    rsx! {
        section { class: "{class}",
            h3 { "Feedback" }
            div { "{feedback.message}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::views::{render_error, render_home, render_question};
    use crate::vm::{FeedbackVm, HomeVm, ProgressVm, QuestionRowVm, QuestionVm, SkillLinkVm};

    fn question_vm(feedback: Option<FeedbackVm>, next_href: Option<String>) -> QuestionVm {
        QuestionVm {
            title: "Question 5".into(),
            action_href: "/question/5/".into(),
            text: "What is a <trie>?".into(),
            skill_name: "Data Structures".into(),
            skill_href: "/?skill=1".into(),
            difficulty: "medium",
            next_href,
            notes: "prefix tree".into(),
            feedback,
        }
    }

    #[test]
    fn question_page_renders_form_and_escapes_text() {
        let html = render_question(question_vm(None, Some("/question/6/".into())));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Question 5 | Interview Prep</title>"));
        assert!(html.contains("action=\"/question/5/\""));
        assert!(html.contains("name=\"notes\""));
        assert!(html.contains("prefix tree"));
        assert!(html.contains("value=\"ai\""));
        assert!(html.contains("href=\"/question/6/\""));
        assert!(html.contains("&lt;trie&gt;"));
        assert!(!html.contains("<trie>"));
        assert!(!html.contains("class=\"feedback"));
    }

    #[test]
    fn question_page_shows_feedback_block() {
        let html = render_question(question_vm(
            Some(FeedbackVm {
                message: "Sorry, AI feedback failed: boom".into(),
                is_error: true,
            }),
            None,
        ));
        assert!(html.contains("class=\"feedback error\""));
        assert!(html.contains("Sorry, AI feedback failed: boom"));
        assert!(html.contains("only question in its skill"));
    }

    #[test]
    fn home_page_lists_rows_and_progress() {
        let vm = HomeVm {
            skills: vec![SkillLinkVm {
                name: "Algorithms".into(),
                href: "/?skill=2".into(),
                active: true,
            }],
            filtering: true,
            heading: "Algorithms questions".into(),
            questions: vec![QuestionRowVm {
                href: "/question/16/".into(),
                preview: "Given a sorted array".into(),
                skill_name: "Algorithms".into(),
                difficulty: "easy",
            }],
            start_href: Some("/question/16/".into()),
            progress: ProgressVm {
                total_attempts: 3,
                average: Some("71.7".into()),
                best_skill: Some("Algorithms".into()),
                weakest_skill: Some("Algorithms".into()),
                recommendation: None,
            },
        };

        let html = render_home(vm);
        assert!(html.contains("Algorithms questions"));
        assert!(html.contains("href=\"/question/16/\""));
        assert!(html.contains("Given a sorted array"));
        assert!(html.contains("71.7"));
        assert!(html.contains("Start practice session"));
    }

    #[test]
    fn error_page_shows_status() {
        let html = render_error(404, "Question 9 not found.".into());
        assert!(html.contains("404"));
        assert!(html.contains("Question 9 not found."));
    }
}
