use dioxus::prelude::*;

use super::layout::Layout;
use crate::vm::{HomeVm, ProgressVm};

#[derive(Props, Clone, PartialEq)]
pub struct HomePageProps {
    pub vm: HomeVm,
}

/// Question list with skill filter, progress panel and start link.
#[component]
pub fn HomePage(props: HomePageProps) -> Element {
    let vm = props.vm;
    let heading = vm.heading.clone();
    let all_class = if vm.filtering { "" } else { "active" };

    rsx! {
        Layout {
            ProgressPanel { progress: vm.progress.clone() }

            nav { class: "skills",
                a { class: all_class, href: "/", "All" }
                for skill in vm.skills.iter() {
                    a {
                        key: "{skill.href}",
                        class: if skill.active { "active" } else { "" },
                        href: "{skill.href}",
                        "{skill.name}"
                    }
                }
            }

            h2 { "{heading}" }

            match vm.start_href.as_deref() {
                Some(start) => rsx! {
                    p {
                        a { class: "start", href: "{start}", "Start practice session" }
                    }
                },
                None => rsx! {
                    p { "No questions yet. Run the seed command to load the catalogue." }
                },
            }

            ol { class: "questions",
                for row in vm.questions.iter() {
                    li { key: "{row.href}",
                        a { href: "{row.href}", "{row.preview}" }
                        " "
                        span { class: "meta", "({row.skill_name}, {row.difficulty})" }
                    }
                }
            }
        }
    }
}

#[component]
fn ProgressPanel(progress: ProgressVm) -> Element {
    let total = progress.total_attempts;

    if total == 0 {
        return rsx! {
            section { class: "stats",
                p { "No attempts yet. Score a question to see your progress." }
            }
        };
    }

    let average = progress.average.clone().unwrap_or_else(|| "n/a".to_owned());
    let best = progress.best_skill.clone().unwrap_or_else(|| "n/a".to_owned());
    let weakest = progress.weakest_skill.clone().unwrap_or_else(|| "n/a".to_owned());

    rsx! {
        section { class: "stats",
            h2 { "Your progress" }
            dl {
                dt { "Recent attempts" }
                dd { "{total}" }

                dt { "Average score" }
                dd { "{average}" }

                dt { "Strongest skill" }
                dd { "{best}" }

                dt { "Weakest skill" }
                dd { "{weakest}" }
            }
            if let Some(rec) = progress.recommendation.as_ref() {
                p { class: "recommendation",
                    "Suggested next ({rec.skill_name}): "
                    a { href: "{rec.href}", "{rec.preview}" }
                }
            }
        }
    }
}
