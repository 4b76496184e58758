use dioxus::prelude::*;
use report_types::html::scalar_text;
use report_types::{DiagnosticExchange, DiagnosticSection, LoadState, ReportSession};

use crate::components::{ChartPanel, TableBody};
use crate::report::state::{row_views, RowBody, RowView};

#[component]
pub fn DetailPanel(session: Signal<ReportSession>) -> Element {
    let guard = session.read();
    let name = guard.selected().unwrap_or_default().to_string();
    let state = guard.state().clone();
    let status = guard.detail().map(|detail| detail.status);
    let rows = row_views(&guard);
    drop(guard);

    let content = match state {
        LoadState::Loading => rsx! { LoadingState {} },
        LoadState::Failed(error) => rsx! {
            div {
                class: "banner banner--error",
                p { "Test details for {name} could not be loaded." }
                span { class: "banner-detail", "{error}" }
            }
        },
        LoadState::Idle => rsx! {},
        LoadState::Loaded => rsx! {
            DetailFacts { session }
            div {
                class: "step-tree",
                if rows.is_empty() {
                    div { class: "placeholder", "This test recorded no steps." }
                }
                for row in rows {
                    StepRow { key: "{row.path}", session, row }
                }
            }
        },
    };

    rsx! {
        div {
            class: "detail",
            div {
                class: "detail-header",
                h2 { "{name}" }
                if let Some(status) = status {
                    span { class: status.css_class(), "{status}" }
                }
            }
            {content}
        }
    }
}

#[component]
fn DetailFacts(session: Signal<ReportSession>) -> Element {
    let guard = session.read();
    let Some(detail) = guard.detail() else {
        return rsx! {};
    };
    let goal = detail.goal.clone();
    let requirements: Vec<String> = detail.requirements.iter().map(scalar_text).collect();
    let condition = detail.condition.clone();
    let condition_comment = detail.condition_comment.clone();
    let conditions = detail.conditions.clone();
    drop(guard);

    if goal.is_none() && requirements.is_empty() && condition.is_none() && conditions.is_empty() {
        return rsx! {};
    }

    rsx! {
        section {
            class: "panel detail-facts",
            if let Some(goal) = goal {
                p { class: "detail-goal", "{goal}" }
            }
            if !requirements.is_empty() {
                div {
                    class: "requirements",
                    for requirement in requirements {
                        span { class: "requirement", "{requirement}" }
                    }
                }
            }
            if let Some(condition) = condition {
                div {
                    class: "condition",
                    span { class: "mono", "{condition}" }
                    if let Some(comment) = condition_comment {
                        span { class: "condition-comment", "{comment}" }
                    }
                }
            }
            if !conditions.is_empty() {
                table {
                    class: "report-table condition-history",
                    thead {
                        tr { th { "Time" } th { "Condition" } th { "Comment" } th { "Status" } }
                    }
                    tbody {
                        for record in conditions {
                            tr {
                                td { "{record.timestamp}" }
                                td { class: "mono", "{record.description}" }
                                td { "{record.comment}" }
                                td { span { class: record.status.css_class(), "{record.status}" } }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn LoadingState() -> Element {
    rsx! {
        div {
            class: "loading-state",
            span { class: "spinner", "◐" }
            span { "Loading test details..." }
        }
    }
}

#[component]
fn StepRow(mut session: Signal<ReportSession>, row: RowView) -> Element {
    let RowView {
        path,
        depth,
        kind,
        open,
        status,
        label,
        note,
        timestamp,
        body,
    } = row;
    let expandable = kind.is_expandable();
    let indent = format!("padding-left: {}rem;", 0.5 + depth as f64 * 1.25);
    let caret = match (expandable, open) {
        (false, _) => "",
        (true, false) => "▸",
        (true, true) => "▾",
    };
    let row_class = format!("step-row step-row--{}", kind.as_str());

    let body = match body {
        Some(RowBody::Diagnostic(exchange)) => rsx! { DiagnosticBody { exchange } },
        Some(RowBody::Table(index)) => {
            let table = session.read().detail().and_then(|d| d.table(index)).cloned();
            match table {
                Some(table) => rsx! { TableBody { table } },
                None => rsx! {},
            }
        }
        Some(RowBody::Chart(index)) => rsx! { ChartPanel { session, index } },
        Some(RowBody::Text(details)) => rsx! {
            pre { class: "step-body text-body", "{details}" }
        },
        None => rsx! {},
    };

    rsx! {
        div {
            class: "step",
            div {
                class: "{row_class}",
                style: "{indent}",
                onclick: move |_| {
                    if expandable {
                        session.write().toggle(kind, &path);
                    }
                },
                span { class: "step-caret", "{caret}" }
                span { class: status.css_class(), "{status}" }
                span {
                    class: "step-label",
                    "{label}"
                    if let Some(note) = note {
                        span { class: "step-note", "{note}" }
                    }
                }
                span { class: "step-time", "{timestamp}" }
            }
            {body}
        }
    }
}

#[component]
fn DiagnosticBody(exchange: DiagnosticExchange) -> Element {
    let sections = [
        ("Request", exchange.request),
        ("Response", exchange.response),
        ("Expected", exchange.expected),
    ];

    rsx! {
        div {
            class: "step-body diagnostic-body",
            if let Some(request_name) = exchange.request_name {
                div { class: "diagnostic-name", "{request_name}" }
            }
            for (title, section) in sections {
                DiagnosticSectionView { title: title.to_string(), section }
            }
        }
    }
}

#[component]
fn DiagnosticSectionView(title: String, section: DiagnosticSection) -> Element {
    if section.is_empty() {
        return rsx! {
            div {
                class: "diagnostic-section",
                h4 { "{title}" }
                span { class: "placeholder", "--" }
            }
        };
    }

    rsx! {
        div {
            class: "diagnostic-section",
            h4 { "{title}" }
            if let Some(raw) = section.raw {
                code { class: "mono diagnostic-raw", "{raw}" }
            }
            if !section.params.is_empty() {
                table {
                    class: "report-table diagnostic-params",
                    tbody {
                        for (name, value) in section.params {
                            tr {
                                th { "{name}" }
                                td { class: "mono", "{value}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
