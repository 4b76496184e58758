use dioxus::prelude::{spawn, Signal, WritableExt};
use report_types::{
    DiagnosticExchange, NodeKind, ReportSession, StatusCounts, StatusFilter, Step, StepKind,
    TestStatus,
};

use crate::report::effects::load_test_details;

/// What an open row shows beneath its header.
#[derive(Debug, Clone, PartialEq)]
pub enum RowBody {
    Diagnostic(DiagnosticExchange),
    Table(usize),
    Chart(usize),
    Text(String),
}

/// Owned copy of what one tree row renders, so components don't hold the
/// session borrow. Group children are never copied.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub path: String,
    pub depth: usize,
    pub kind: NodeKind,
    pub open: bool,
    pub status: TestStatus,
    pub label: String,
    pub note: Option<String>,
    pub timestamp: String,
    /// Set only while the row is open.
    pub body: Option<RowBody>,
}

fn row_body(step: &Step) -> Option<RowBody> {
    match &step.kind {
        StepKind::Diagnostic(exchange) => Some(RowBody::Diagnostic(exchange.clone())),
        StepKind::Table { index } => Some(RowBody::Table(*index)),
        StepKind::Chart { index } => Some(RowBody::Chart(*index)),
        StepKind::Text { details } => Some(RowBody::Text(details.clone())),
        StepKind::Group { .. } | StepKind::Plain => None,
    }
}

pub fn row_views(session: &ReportSession) -> Vec<RowView> {
    session
        .rows()
        .into_iter()
        .map(|row| RowView {
            body: if row.open { row_body(row.step) } else { None },
            status: row.step.status,
            label: row.step.label.clone(),
            note: row.step.note.clone(),
            timestamp: row.step.timestamp.clone(),
            path: row.path,
            depth: row.depth,
            kind: row.kind,
            open: row.open,
        })
        .collect()
}

pub fn filter_count(stats: &StatusCounts, filter: StatusFilter) -> usize {
    match filter {
        StatusFilter::All => stats.all,
        StatusFilter::Pass => stats.pass,
        StatusFilter::Fail => stats.fail,
        StatusFilter::Error => stats.error,
    }
}

pub fn select_test(mut session: Signal<ReportSession>, name: String) {
    let ticket = session.write().select(&name);
    spawn(load_test_details(session, ticket));
}

pub fn go_home(mut session: Signal<ReportSession>) {
    session.write().go_home();
}

#[cfg(test)]
mod tests {
    use super::*;
    use report_types::{Report, TestDetail};
    use serde_json::json;

    #[test]
    fn row_views_mirror_session_rows() {
        let report = Report::from_value(json!({"testNames": ["A"]})).unwrap();
        let mut session = ReportSession::new(report);
        let ticket = session.select("A");
        let detail = TestDetail::from_value(json!({
            "name": "A",
            "lines": [
                {"category": "GROUP", "title": "g", "children": [{"category": "STEP", "comment": "s"}]},
                {"category": "CHART", "comment": "speed", "chart_idx": 0},
                {"category": "STEP", "comment": "log", "details": "raw dump", "details_type": "text"}
            ],
            "charts": [{"name": "speed", "x": [0, 1], "y": [1, 2]}]
        }))
        .unwrap();
        session.complete(&ticket, Ok(detail));
        session.toggle(NodeKind::Group, "0");
        session.toggle(NodeKind::Chart, "1");

        let rows = row_views(&session);
        assert_eq!(rows.len(), 4);
        assert!(rows[0].open);
        assert_eq!(rows[0].body, None);
        assert_eq!(rows[1].path, "0.0");
        assert_eq!(rows[1].depth, 1);
        assert_eq!(rows[1].label, "s");
        assert_eq!(rows[2].body, Some(RowBody::Chart(0)));
        assert_eq!(rows[3].kind, NodeKind::Text);
        assert_eq!(rows[3].body, None);
    }
}
