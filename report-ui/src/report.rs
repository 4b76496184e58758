//! Report viewer root
//!
//! Owns the single `ReportSession` signal and hands it to the panels.
//! Layout: header with aggregate statistics, sidebar with the filtered test
//! list, and a main pane showing either the report summary or one test.

pub mod effects;
pub mod state;
mod styles;

use dioxus::prelude::*;
use report_types::{Report, ReportSession};

use crate::api::TestCase;
use crate::components::{DetailPanel, Sidebar, StatsBar, SummaryPanel};
use crate::report::effects::{bootstrap_report, load_test_cases};
use crate::report::state::select_test;
use crate::report::styles::REPORT_STYLES;

#[component]
pub fn ReportView() -> Element {
    let session = use_signal(|| ReportSession::new(Report::default()));
    let boot_error = use_signal(|| None::<String>);
    let mut booted = use_signal(|| false);
    let test_cases = use_signal(Vec::<TestCase>::new);

    // Read window.myreport once after mount
    use_effect(move || {
        if booted() {
            return;
        }
        booted.set(true);
        bootstrap_report(session, boot_error);
    });

    use_effect(move || {
        spawn(load_test_cases(test_cases));
    });

    let on_select = use_callback(move |name: String| {
        select_test(session, name);
    });

    let title = session.read().report().title().to_string();
    let suite = session.read().report().test_suite_name.clone();
    let has_selection = session.read().selected().is_some();

    rsx! {
        style { {REPORT_STYLES} }

        div {
            class: "report-app",

            header {
                class: "report-header",
                div {
                    class: "report-title",
                    h1 { "{title}" }
                    if !suite.is_empty() {
                        span { class: "report-suite", "{suite}" }
                    }
                }
                StatsBar { session }
            }

            if let Some(error) = boot_error() {
                div {
                    class: "banner banner--error",
                    "Report data could not be read: {error}"
                }
            }

            div {
                class: "report-body",
                Sidebar { session, on_select }
                main {
                    class: "report-main",
                    if has_selection {
                        DetailPanel { session }
                    } else {
                        SummaryPanel { session, test_cases }
                    }
                }
            }
        }
    }
}
