use dioxus::prelude::*;
use report_types::{ReportSession, StatusFilter, TestStatus};

use crate::report::state::{filter_count, go_home};

#[component]
pub fn StatsBar(session: Signal<ReportSession>) -> Element {
    let stats = session.read().report_stats();
    let overall_class = format!("{} stats-overall", stats.overall.css_class());
    let badges = [
        ("Pass", stats.pass, TestStatus::Pass),
        ("Fail", stats.fail, TestStatus::Fail),
        ("Error", stats.error, TestStatus::Error),
        ("None", stats.none, TestStatus::None),
    ]
    .map(|(label, count, status)| (label, count, stats.percent(count), status.css_class()));

    rsx! {
        div {
            class: "stats-bar",
            span { class: "{overall_class}", "{stats.overall}" }
            span { class: "stats-total", "{stats.all} tests" }
            for (label, count, percent, class) in badges {
                span {
                    class,
                    title: "{percent}%",
                    "{label}: {count}"
                }
            }
        }
    }
}

#[component]
pub fn Sidebar(mut session: Signal<ReportSession>, on_select: Callback<String>) -> Element {
    let (stats, filter, selected, tests) = {
        let guard = session.read();
        let tests: Vec<(String, TestStatus)> = guard
            .visible_tests()
            .into_iter()
            .map(|name| (name.to_string(), guard.report().status_of(name)))
            .collect();
        (
            guard.report_stats(),
            guard.filter(),
            guard.selected().map(str::to_string),
            tests,
        )
    };

    rsx! {
        nav {
            class: "report-sidebar",

            button {
                class: if selected.is_none() { "home-button active" } else { "home-button" },
                onclick: move |_| go_home(session),
                "Summary"
            }

            div {
                class: "filter-bar",
                for (option, count) in StatusFilter::ALL.map(|f| (f, filter_count(&stats, f))) {
                    button {
                        key: "{option}",
                        class: if option == filter { "filter-button active" } else { "filter-button" },
                        onclick: move |_| session.write().set_filter(option),
                        "{option} ({count})"
                    }
                }
            }

            if tests.is_empty() {
                div { class: "placeholder", "No tests match this filter" }
            }

            ul {
                class: "test-list",
                for (name, status) in tests {
                    li {
                        key: "{name}",
                        class: if selected.as_deref() == Some(name.as_str()) { "test-item active" } else { "test-item" },
                        onclick: {
                            let name = name.clone();
                            move |_| on_select.call(name.clone())
                        },
                        span { class: status.css_class(), "{status}" }
                        span { class: "test-name", "{name}" }
                    }
                }
            }
        }
    }
}
