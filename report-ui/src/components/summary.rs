use dioxus::prelude::*;
use report_types::html::{dut_html, env_html};
use report_types::ReportSession;

use crate::api::TestCase;
use crate::components::{HtmlBlock, TestCasesPanel};

#[component]
pub fn SummaryPanel(session: Signal<ReportSession>, test_cases: Signal<Vec<TestCase>>) -> Element {
    let guard = session.read();
    let report = guard.report();
    let statistics = report.statistics.clone();
    let env = env_html(&report.test_environment);
    let dut = dut_html(&report.device_under_test);
    let version = report.framework.version.clone();
    let incomplete = !report.report_is_complete && !report.test_names.is_empty();
    drop(guard);

    rsx! {
        div {
            class: "summary",

            if incomplete {
                div { class: "banner banner--warn", "The report is incomplete; the run did not finish." }
            }

            section {
                class: "panel",
                h2 { "Run" }
                dl {
                    class: "run-facts",
                    dt { "Date" } dd { "{statistics.date}" }
                    dt { "Time" } dd { "{statistics.time}" }
                    dt { "Duration" } dd { "{statistics.duration}" }
                    if !version.is_empty() {
                        dt { "Framework" } dd { "{version}" }
                    }
                }
            }

            section {
                class: "panel",
                h2 { "Test environment" }
                HtmlBlock { html: env, class: "table-scroll".to_string() }
            }

            section {
                class: "panel",
                h2 { "Device under test" }
                HtmlBlock { html: dut, class: "table-scroll".to_string() }
            }

            TestCasesPanel { cases: test_cases() }
        }
    }
}
