use dioxus::prelude::*;

use crate::api::TestCase;

#[component]
pub fn TestCasesPanel(cases: Vec<TestCase>) -> Element {
    if cases.is_empty() {
        return rsx! {};
    }

    rsx! {
        section {
            class: "panel",
            h2 { "Test cases" }
            ul {
                class: "test-case-list",
                for case in cases {
                    li {
                        key: "{case.name}",
                        if let Some(status) = case.status {
                            span { class: status.css_class(), "{status}" }
                        }
                        span { "{case.name}" }
                    }
                }
            }
        }
    }
}
