//! Session flow tests: selection, bundle completion and chart interaction
//! driven end to end through `ReportSession`, the way the UI drives it.
//!
//! Run:
//!   cargo test -p report-types --test session_flow_test

use report_types::{
    LoadError, LoadOutcome, LoadState, NodeKind, OverallStatus, Report, ReportSession,
    StatusFilter, TestDetail, ViewWindow,
};

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn report() -> Report {
    Report::from_script(
        r#"window.myreport = {
            "projectName": "Body Controller",
            "testNames": ["A", "B", "C"],
            "reportData": {
                "A": {"name": "A", "status": "PASS"},
                "B": {"name": "B", "status": "FAIL"},
                "C": {"name": "C", "status": "PASS"}
            }
        };"#,
    )
    .unwrap()
}

fn bundle(name: &str) -> TestDetail {
    TestDetail::from_script(&format!(
        r#"window.reportData = {{
            "name": "{name}",
            "lines": [
                {{"category": "GROUP", "title": "prepare", "status": "PASS", "children": [
                    {{"category": "STEP", "status": "PASS", "comment": "ignition on"}}
                ]}},
                {{"category": "CHART", "status": "PASS", "comment": "Speed", "chart_idx": 0}},
                {{"category": "CHART", "status": "PASS", "comment": "Voltage", "chart_idx": 1}},
                {{"category": "TABLE", "status": "PASS", "comment": "Results", "table_idx": 0}}
            ],
            "tables": [{{"name": "Results", "data": [["PASS"]]}}],
            "charts": [
                {{"name": "Speed", "legend": ["speed", "rpm"], "x": [0, 1, 2, 3],
                  "y": {{"speed": [10, 20, 30, 40], "rpm": [700, 800, 900, 1000]}}}},
                {{"name": "Voltage", "x": [0, 10], "y": [12.1, 12.4]}}
            ]
        }};"#
    ))
    .unwrap()
}

// ─── Navigation ──────────────────────────────────────────────────────────────

#[test]
fn filter_and_stats_follow_the_report() {
    let mut session = ReportSession::new(report());
    session.set_filter("pass".parse().unwrap());
    assert_eq!(session.visible_tests(), ["A", "C"]);
    session.set_filter(StatusFilter::All);
    assert_eq!(session.visible_tests(), ["A", "B", "C"]);

    let stats = session.report_stats();
    assert_eq!((stats.pass, stats.fail, stats.error, stats.none, stats.all), (2, 1, 0, 0, 3));
    assert_eq!(stats.overall, OverallStatus::Fail);
}

// ─── Loading ─────────────────────────────────────────────────────────────────

#[test]
fn only_the_newest_ticket_is_applied() {
    let mut session = ReportSession::new(report());
    let first = session.select("A");
    let second = session.select("B");
    assert!(second.token > first.token);

    assert_eq!(session.complete(&first, Ok(bundle("A"))), LoadOutcome::Stale);
    assert!(session.is_loading());
    assert!(session.detail().is_none());

    assert_eq!(session.complete(&second, Ok(bundle("B"))), LoadOutcome::Applied);
    assert_eq!(session.detail().map(|d| d.name.as_str()), Some("B"));
    assert_eq!(session.state(), &LoadState::Loaded);

    // A repeated completion of an applied ticket is stale as well.
    assert_eq!(session.complete(&second, Ok(bundle("B"))), LoadOutcome::Stale);
}

#[test]
fn mismatched_bundle_yields_no_detail() {
    let mut session = ReportSession::new(report());
    let ticket = session.select("A");
    let outcome = session.complete(&ticket, Ok(bundle("C")));
    assert_eq!(
        outcome,
        LoadOutcome::Rejected(LoadError::NameMismatch {
            requested: "A".to_string(),
            found: "C".to_string()
        })
    );
    assert!(session.detail().is_none());
    assert!(matches!(session.state(), LoadState::Failed(_)));
    assert_eq!(session.selected(), Some("A"));
}

#[test]
fn failed_load_clears_loading() {
    let mut session = ReportSession::new(report());
    let ticket = session.select("B");
    session.complete(&ticket, Err(LoadError::Http { status: 404 }));
    assert!(!session.is_loading());
    assert_eq!(session.state(), &LoadState::Failed(LoadError::Http { status: 404 }));
}

#[test]
fn going_home_invalidates_in_flight_load() {
    let mut session = ReportSession::new(report());
    let ticket = session.select("A");
    session.go_home();
    assert_eq!(session.complete(&ticket, Ok(bundle("A"))), LoadOutcome::Stale);
    assert_eq!(session.selected(), None);
    assert!(session.detail().is_none());
    assert_eq!(session.state(), &LoadState::Idle);
}

// ─── Step tree ───────────────────────────────────────────────────────────────

#[test]
fn expand_then_collapse_restores_rows() {
    let mut session = ReportSession::new(report());
    let ticket = session.select("A");
    session.complete(&ticket, Ok(bundle("A")));

    let paths = |s: &ReportSession| s.rows().iter().map(|r| r.path.clone()).collect::<Vec<_>>();
    let before = paths(&session);
    assert_eq!(before, ["0", "1", "2", "3"]);

    assert!(session.toggle(NodeKind::Group, "0"));
    assert_eq!(paths(&session), ["0", "0.0", "1", "2", "3"]);
    assert!(!session.toggle(NodeKind::Group, "0"));
    assert_eq!(paths(&session), before);
}

// ─── Charts ──────────────────────────────────────────────────────────────────

#[test]
fn window_stats_follow_the_active_chart() {
    let mut session = ReportSession::new(report());
    let ticket = session.select("A");
    session.complete(&ticket, Ok(bundle("A")));
    assert_eq!(session.window_stats(), None);

    session.toggle(NodeKind::Chart, "1");
    assert!(session.mount_chart(0));
    assert!(!session.mount_chart(0));
    let stats = session.window_stats().unwrap();
    assert_eq!(stats.signal, "speed");
    assert_eq!(stats.count, 4);
    assert_eq!(stats.avg, 25.0);

    session.zoom(0, 0.5, 1.0);
    assert_eq!(
        session.chart_state(0).and_then(|c| c.window),
        Some(ViewWindow { min: 1.5, max: 3.0 })
    );
    let stats = session.window_stats().unwrap();
    assert_eq!((stats.min, stats.max, stats.count), (30.0, 40.0, 2));

    // Hiding the first signal moves statistics to the next visible one.
    session.toggle_signal(0, 0);
    assert_eq!(session.window_stats().unwrap().signal, "rpm");

    // The most recently opened chart becomes active.
    session.toggle(NodeKind::Chart, "2");
    session.mount_chart(1);
    assert_eq!(session.active_chart(), Some(1));
    assert_eq!(session.window_stats().unwrap().chart, "Voltage");

    session.toggle(NodeKind::Chart, "2");
    assert_eq!(session.active_chart(), Some(0));

    session.reset_zoom(0);
    assert_eq!(session.window_stats().unwrap().count, 4);
}

#[test]
fn collapsing_a_group_hands_stats_back_to_the_visible_chart() {
    let mut session = ReportSession::new(report());
    let ticket = session.select("A");
    let nested = TestDetail::from_value(serde_json::json!({
        "name": "A",
        "lines": [
            {"category": "CHART", "status": "PASS", "comment": "Speed", "chart_idx": 0},
            {"category": "GROUP", "title": "drive", "status": "PASS", "children": [
                {"category": "CHART", "status": "PASS", "comment": "Voltage", "chart_idx": 1}
            ]}
        ],
        "charts": [
            {"name": "Speed", "x": [0, 1], "y": [10, 20]},
            {"name": "Voltage", "x": [0, 1], "y": [12.0, 13.0]}
        ]
    }))
    .unwrap();
    session.complete(&ticket, Ok(nested));

    session.toggle(NodeKind::Chart, "0");
    session.mount_chart(0);
    session.toggle(NodeKind::Group, "1");
    session.toggle(NodeKind::Chart, "1.0");
    session.mount_chart(1);
    assert_eq!(session.active_chart(), Some(1));
    assert_eq!(session.window_stats().unwrap().chart, "Voltage");

    session.toggle(NodeKind::Group, "1");
    let paths: Vec<String> = session.rows().into_iter().map(|row| row.path).collect();
    assert_eq!(paths, ["0", "1"]);
    assert_eq!(session.active_chart(), Some(0));
    assert_eq!(session.window_stats().unwrap().chart, "Speed");

    // Reopening the group restores the nested chart, which is still open.
    session.toggle(NodeKind::Group, "1");
    assert_eq!(session.active_chart(), Some(1));
}

#[test]
fn cursor_readout_tracks_visibility() {
    let mut session = ReportSession::new(report());
    let ticket = session.select("A");
    session.complete(&ticket, Ok(bundle("A")));
    session.toggle(NodeKind::Chart, "1");
    session.mount_chart(0);

    session.set_cursor(0, 1.0);
    let chart = session.detail().unwrap().chart(0).unwrap().clone();
    let readout = session.chart_state(0).unwrap().readout(&chart);
    assert_eq!(readout.x, "3");
    assert_eq!(readout.values, ["40", "1000"]);

    session.toggle_signal(0, 1);
    let readout = session.chart_state(0).unwrap().readout(&chart);
    assert_eq!(readout.values, ["40", "--"]);

    session.clear_cursor(0);
    let readout = session.chart_state(0).unwrap().readout(&chart);
    assert_eq!(readout.values, ["--", "--"]);
}
