//! Everything the viewer mutates after start-up, owned by one value.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::chart::{window_stats, ChartDef, ChartInteraction, WindowStats};
use crate::detail::TestDetail;
use crate::error::LoadError;
use crate::filter::{report_stats, visible_tests, StatusCounts, StatusFilter};
use crate::report::Report;
use crate::step::{Step, StepKind};
use crate::tree::{default_expansion, visible_rows, ExpansionState, NodeKind, Row};

/// Issued by [`ReportSession::select`]; only the newest ticket's result is
/// applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub token: u64,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(LoadError),
}

/// What [`ReportSession::complete`] did with a result.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Applied,
    /// A newer selection (or going home) superseded the ticket.
    Stale,
    Rejected(LoadError),
}

#[derive(Debug, Clone)]
pub struct ReportSession {
    report: Report,
    filter: StatusFilter,
    selected: Option<String>,
    last_token: u64,
    pending: Option<LoadTicket>,
    state: LoadState,
    detail: Option<TestDetail>,
    expansion: ExpansionState,
    charts: HashMap<usize, ChartInteraction>,
    /// Open chart nodes as `(path, chart index)`, oldest first.
    open_charts: Vec<(String, usize)>,
}

impl ReportSession {
    pub fn new(report: Report) -> Self {
        Self {
            report,
            filter: StatusFilter::All,
            selected: None,
            last_token: 0,
            pending: None,
            state: LoadState::Idle,
            detail: None,
            expansion: ExpansionState::default(),
            charts: HashMap::new(),
            open_charts: Vec::new(),
        }
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn visible_tests(&self) -> Vec<&str> {
        visible_tests(&self.report, self.filter)
    }

    pub fn report_stats(&self) -> StatusCounts {
        report_stats(&self.report)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn detail(&self) -> Option<&TestDetail> {
        self.detail.as_ref()
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    fn clear_transient(&mut self) {
        self.detail = None;
        self.expansion.clear();
        self.charts.clear();
        self.open_charts.clear();
    }

    /// Start showing `name`. The caller loads the bundle and hands the result
    /// back through [`complete`](Self::complete) with the returned ticket.
    pub fn select(&mut self, name: &str) -> LoadTicket {
        self.last_token += 1;
        let ticket = LoadTicket {
            token: self.last_token,
            name: name.to_string(),
        };
        self.selected = Some(name.to_string());
        self.state = LoadState::Loading;
        self.clear_transient();
        self.pending = Some(ticket.clone());
        ticket
    }

    pub fn complete(
        &mut self,
        ticket: &LoadTicket,
        result: Result<TestDetail, LoadError>,
    ) -> LoadOutcome {
        if !self.is_current(ticket) {
            debug!(token = ticket.token, name = %ticket.name, "ignoring stale load");
            return LoadOutcome::Stale;
        }
        self.pending = None;

        match result.and_then(|detail| detail.verify_name(&ticket.name)) {
            Ok(detail) => {
                self.expansion = default_expansion(&detail);
                self.detail = Some(detail);
                self.state = LoadState::Loaded;
                LoadOutcome::Applied
            }
            Err(err) => {
                warn!(name = %ticket.name, error = %err, "test details could not be loaded");
                self.clear_transient();
                self.state = LoadState::Failed(err.clone());
                LoadOutcome::Rejected(err)
            }
        }
    }

    /// Whether `ticket` is still the load the session is waiting for.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.pending.as_ref() == Some(ticket)
    }

    /// Back to the summary view; any in-flight load becomes stale.
    pub fn go_home(&mut self) {
        self.selected = None;
        self.pending = None;
        self.state = LoadState::Idle;
        self.clear_transient();
    }

    pub fn rows(&self) -> Vec<Row<'_>> {
        match &self.detail {
            Some(detail) => visible_rows(detail, &self.expansion),
            None => Vec::new(),
        }
    }

    fn step_at(&self, path: &str) -> Option<&Step> {
        let detail = self.detail.as_ref()?;
        let mut indices = path.split('.').map(|part| part.parse::<usize>().ok());
        let mut step = detail.steps.get(indices.next()??)?;
        for index in indices {
            step = step.children().get(index?)?;
        }
        Some(step)
    }

    fn chart_index_at(&self, path: &str) -> Option<usize> {
        match self.step_at(path)?.kind {
            StepKind::Chart { index } => Some(index),
            _ => None,
        }
    }

    /// Flip a node; returns the new open flag. Opening a chart makes it the
    /// active chart.
    pub fn toggle(&mut self, kind: NodeKind, path: &str) -> bool {
        let open = self.expansion.toggle(kind, path);
        if kind == NodeKind::Chart {
            self.open_charts.retain(|(p, _)| p != path);
            if let Some(index) = self.chart_index_at(path).filter(|_| open) {
                self.open_charts.push((path.to_string(), index));
            }
        }
        open
    }

    /// Whether every group above `path` is open, i.e. the node has a row.
    fn is_shown(&self, path: &str) -> bool {
        path.match_indices('.')
            .all(|(end, _)| self.expansion.is_open(NodeKind::Group, &path[..end]))
    }

    /// Chart index of the most recently opened chart that is still open and
    /// not hidden inside a collapsed group.
    pub fn active_chart(&self) -> Option<usize> {
        self.open_charts
            .iter()
            .rev()
            .find(|(path, _)| self.is_shown(path))
            .map(|(_, index)| *index)
    }

    pub fn chart_state(&self, index: usize) -> Option<&ChartInteraction> {
        self.charts.get(&index)
    }

    fn with_chart<R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut ChartInteraction, &ChartDef) -> R,
    ) -> Option<R> {
        let chart = self.detail.as_ref()?.chart(index)?;
        Some(f(self.charts.entry(index).or_default(), chart))
    }

    /// Record the initial view window the first time a chart is drawn.
    pub fn mount_chart(&mut self, index: usize) -> bool {
        self.with_chart(index, |state, chart| state.ensure_window(chart))
            .unwrap_or(false)
    }

    pub fn toggle_signal(&mut self, index: usize, signal: usize) {
        self.with_chart(index, |state, _| state.toggle_signal(signal));
    }

    pub fn set_cursor(&mut self, index: usize, fraction: f64) {
        self.with_chart(index, |state, chart| state.set_cursor(chart, fraction));
    }

    pub fn clear_cursor(&mut self, index: usize) {
        self.with_chart(index, |state, _| state.clear_cursor());
    }

    pub fn zoom(&mut self, index: usize, from: f64, to: f64) -> bool {
        self.with_chart(index, |state, _| state.zoom(from, to))
            .unwrap_or(false)
    }

    pub fn reset_zoom(&mut self, index: usize) {
        self.with_chart(index, |state, chart| state.reset_zoom(chart));
    }

    /// Statistics over the active chart's view window.
    pub fn window_stats(&self) -> Option<WindowStats> {
        let index = self.active_chart()?;
        let chart = self.detail.as_ref()?.chart(index)?;
        window_stats(chart, self.charts.get(&index)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session() -> ReportSession {
        let report = Report::from_value(json!({
            "testNames": ["A", "B"],
            "reportData": {"A": {"name": "A", "status": "PASS"}, "B": {"name": "B", "status": "FAIL"}}
        }))
        .unwrap();
        ReportSession::new(report)
    }

    fn bundle(name: &str) -> TestDetail {
        TestDetail::from_value(json!({
            "name": name,
            "lines": [{"category": "CHART", "status": "PASS", "chart_idx": 0}],
            "charts": [{"name": "c", "x": [0, 1], "y": [1, 2]}]
        }))
        .unwrap()
    }

    #[test]
    fn select_resets_transient_state() {
        let mut session = session();
        let ticket = session.select("A");
        assert_eq!(session.complete(&ticket, Ok(bundle("A"))), LoadOutcome::Applied);
        session.toggle(NodeKind::Chart, "0");
        session.mount_chart(0);
        assert!(session.chart_state(0).is_some());

        session.select("B");
        assert!(session.is_loading());
        assert!(session.detail().is_none());
        assert!(session.expansion().is_empty());
        assert!(session.chart_state(0).is_none());
        assert_eq!(session.active_chart(), None);
    }

    #[test]
    fn closing_a_chart_drops_it_from_active() {
        let mut session = session();
        let ticket = session.select("A");
        session.complete(&ticket, Ok(bundle("A")));
        assert!(session.toggle(NodeKind::Chart, "0"));
        assert_eq!(session.active_chart(), Some(0));
        assert!(!session.toggle(NodeKind::Chart, "0"));
        assert_eq!(session.active_chart(), None);
    }

    #[test]
    fn chart_ops_without_detail_are_no_ops() {
        let mut session = session();
        assert!(!session.mount_chart(0));
        assert!(!session.zoom(0, 0.0, 0.5));
        assert!(session.chart_state(0).is_none());
    }
}
