//! Page components and their server-side render entry points.

mod error_page;
mod home;
mod layout;
mod question;

use dioxus::prelude::*;

pub use error_page::{ErrorPage, ErrorPageProps};
pub use home::{HomePage, HomePageProps};
pub use question::{QuestionPage, QuestionPageProps};

use crate::vm::{HomeVm, QuestionVm};

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:52rem;margin:2rem auto;padding:0 1rem;color:#222}\
a{color:#2457a6}\
nav.skills a{margin-right:.75rem}\
nav.skills a.active{font-weight:bold}\
.stats{background:#f4f6fa;padding:.75rem 1rem;border-radius:6px}\
.feedback{white-space:pre-wrap;background:#eef7ee;padding:.75rem 1rem;border-radius:6px}\
.feedback.error{background:#fbecec}\
textarea{width:100%}";

fn document(title: &str, mut dom: VirtualDom) -> String {
    dom.rebuild_in_place();
    let body = dioxus_ssr::render(&dom);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} | Interview Prep</title>\n<style>{STYLE}</style>\n</head>\n\
         <body>\n{body}\n</body>\n</html>\n"
    )
}

#[must_use]
pub fn render_home(vm: HomeVm) -> String {
    document(
        "Questions",
        VirtualDom::new_with_props(HomePage, HomePageProps { vm }),
    )
}

#[must_use]
pub fn render_question(vm: QuestionVm) -> String {
    let title = vm.title.clone();
    document(
        &title,
        VirtualDom::new_with_props(QuestionPage, QuestionPageProps { vm }),
    )
}

#[must_use]
pub fn render_error(status: u16, message: String) -> String {
    document(
        "Error",
        VirtualDom::new_with_props(ErrorPage, ErrorPageProps { status, message }),
    )
}
