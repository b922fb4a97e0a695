use dioxus::prelude::*;

use super::layout::Layout;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorPageProps {
    pub status: u16,
    pub message: String,
}

#[component]
pub fn ErrorPage(props: ErrorPageProps) -> Element {
    let status = props.status;
    let message = props.message.clone();

    rsx! {
        Layout {
            h2 { "{status}" }
            p { class: "error", "{message}" }
            p {
                a { href: "/", "Back to the question list" }
            }
        }
    }
}
