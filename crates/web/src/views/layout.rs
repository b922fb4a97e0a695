use dioxus::prelude::*;

#[component]
pub fn Layout(children: Element) -> Element {
    rsx! {
        header {
            h1 {
                a { href: "/", "Interview Prep" }
            }
        }
        main { {children} }
    }
}
