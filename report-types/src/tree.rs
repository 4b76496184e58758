//! Flattened view model of a test's step tree.
//!
//! Rows are a pure function of the detail bundle and the set of open paths,
//! so collapsing a node never has to tear anything down.

use std::collections::BTreeSet;

use crate::detail::TestDetail;
use crate::step::{Step, StepKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Group,
    Diagnostic,
    Table,
    Chart,
    Text,
    Plain,
}

impl NodeKind {
    pub fn is_expandable(self) -> bool {
        !matches!(self, Self::Plain)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Diagnostic => "diagnostic",
            Self::Table => "table",
            Self::Chart => "chart",
            Self::Text => "text",
            Self::Plain => "plain",
        }
    }
}

impl Step {
    pub fn node_kind(&self) -> NodeKind {
        match self.kind {
            StepKind::Group { .. } => NodeKind::Group,
            StepKind::Diagnostic(_) => NodeKind::Diagnostic,
            StepKind::Table { .. } => NodeKind::Table,
            StepKind::Chart { .. } => NodeKind::Chart,
            StepKind::Text { .. } => NodeKind::Text,
            StepKind::Plain => NodeKind::Plain,
        }
    }
}

/// `"0"`, `"1"` for roots; `"0.0"`, `"0.1"` below them.
pub fn child_path(parent: Option<&str>, index: usize) -> String {
    match parent {
        Some(parent) => format!("{parent}.{index}"),
        None => index.to_string(),
    }
}

/// Open paths, tracked separately per node kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    open: BTreeSet<(NodeKind, String)>,
}

impl ExpansionState {
    pub fn is_open(&self, kind: NodeKind, path: &str) -> bool {
        self.open.contains(&(kind, path.to_string()))
    }

    /// Flip a node; returns the new open flag.
    pub fn toggle(&mut self, kind: NodeKind, path: &str) -> bool {
        let key = (kind, path.to_string());
        if self.open.remove(&key) {
            false
        } else {
            self.open.insert(key);
            true
        }
    }

    pub fn open(&mut self, kind: NodeKind, path: &str) {
        self.open.insert((kind, path.to_string()));
    }

    pub fn close(&mut self, kind: NodeKind, path: &str) {
        self.open.remove(&(kind, path.to_string()));
    }

    pub fn clear(&mut self) {
        self.open.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

/// One rendered line of the step tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    pub step: &'a Step,
    pub path: String,
    pub depth: usize,
    pub kind: NodeKind,
    pub open: bool,
}

/// Rows in display order. Table and chart steps whose index does not
/// resolve are left out.
pub fn visible_rows<'a>(detail: &'a TestDetail, expansion: &ExpansionState) -> Vec<Row<'a>> {
    fn walk<'a>(
        steps: &'a [Step],
        parent: Option<&str>,
        depth: usize,
        detail: &TestDetail,
        expansion: &ExpansionState,
        out: &mut Vec<Row<'a>>,
    ) {
        for (i, step) in steps.iter().enumerate() {
            let resolves = match step.kind {
                StepKind::Table { index } => detail.table(index).is_some(),
                StepKind::Chart { index } => detail.chart(index).is_some(),
                _ => true,
            };
            if !resolves {
                tracing::debug!(label = %step.label, "skipping step with unresolved index");
                continue;
            }

            let path = child_path(parent, i);
            let kind = step.node_kind();
            let open = kind.is_expandable() && expansion.is_open(kind, &path);
            out.push(Row {
                step,
                path: path.clone(),
                depth,
                kind,
                open,
            });
            if open && kind == NodeKind::Group {
                walk(step.children(), Some(&path), depth + 1, detail, expansion, out);
            }
        }
    }

    let mut rows = Vec::new();
    walk(&detail.steps, None, 0, detail, expansion, &mut rows);
    rows
}

/// Initial expansion for a freshly loaded bundle: tables flagged
/// `expanded` start open, wherever they sit in the tree.
pub fn default_expansion(detail: &TestDetail) -> ExpansionState {
    fn walk(steps: &[Step], parent: Option<&str>, detail: &TestDetail, state: &mut ExpansionState) {
        for (i, step) in steps.iter().enumerate() {
            let path = child_path(parent, i);
            match step.kind {
                StepKind::Table { index } if detail.table(index).is_some_and(|t| t.expanded) => {
                    state.open(NodeKind::Table, &path);
                }
                StepKind::Group { ref children } => walk(children, Some(&path), detail, state),
                _ => {}
            }
        }
    }

    let mut state = ExpansionState::default();
    walk(&detail.steps, None, detail, &mut state);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detail() -> TestDetail {
        TestDetail::from_value(json!({
            "name": "T",
            "lines": [
                {"category": "GROUP", "title": "setup", "status": "PASS", "children": [
                    {"category": "STEP", "status": "PASS", "comment": "a"},
                    {"category": "GROUP", "title": "inner", "status": "PASS", "children": [
                        {"category": "TABLE", "status": "PASS", "table_idx": 0}
                    ]}
                ]},
                {"category": "GROUP", "title": "setup", "status": "PASS", "children": [
                    {"category": "STEP", "status": "PASS", "comment": "a"}
                ]},
                {"category": "CHART", "status": "NONE", "chart_idx": 7},
                {"category": "STEP", "status": "INFO", "comment": "done"}
            ],
            "tables": [{"name": "Results", "data": [["1"]], "expanded": true}]
        }))
        .unwrap()
    }

    fn paths(rows: &[Row<'_>]) -> Vec<String> {
        rows.iter().map(|r| r.path.clone()).collect()
    }

    #[test]
    fn collapsed_tree_shows_roots_only() {
        let detail = detail();
        let rows = visible_rows(&detail, &ExpansionState::default());
        // The chart with an unresolved index is omitted.
        assert_eq!(paths(&rows), ["0", "1", "3"]);
        assert!(rows.iter().all(|r| r.depth == 0 && !r.open));
    }

    #[test]
    fn identical_siblings_expand_independently() {
        let detail = detail();
        let mut expansion = ExpansionState::default();
        expansion.toggle(NodeKind::Group, "1");
        let rows = visible_rows(&detail, &expansion);
        assert_eq!(paths(&rows), ["0", "1", "1.0", "3"]);
        assert_eq!(rows[2].depth, 1);
    }

    #[test]
    fn expand_then_collapse_is_idempotent() {
        let detail = detail();
        let mut expansion = ExpansionState::default();
        expansion.toggle(NodeKind::Group, "0");
        let before = paths(&visible_rows(&detail, &expansion));

        assert!(expansion.toggle(NodeKind::Group, "0.1"));
        assert_eq!(paths(&visible_rows(&detail, &expansion)), ["0", "0.0", "0.1", "0.1.0", "1", "3"]);
        assert!(!expansion.toggle(NodeKind::Group, "0.1"));
        assert_eq!(paths(&visible_rows(&detail, &expansion)), before);
    }

    #[test]
    fn kinds_are_tracked_separately() {
        let mut expansion = ExpansionState::default();
        expansion.open(NodeKind::Table, "2");
        assert!(expansion.is_open(NodeKind::Table, "2"));
        assert!(!expansion.is_open(NodeKind::Chart, "2"));
        expansion.close(NodeKind::Table, "2");
        assert!(expansion.is_empty());
    }

    #[test]
    fn flagged_tables_start_open() {
        let detail = detail();
        let expansion = default_expansion(&detail);
        assert!(expansion.is_open(NodeKind::Table, "0.1.0"));

        let mut expansion = expansion;
        expansion.open(NodeKind::Group, "0");
        expansion.open(NodeKind::Group, "0.1");
        let rows = visible_rows(&detail, &expansion);
        let table = rows.iter().find(|r| r.kind == NodeKind::Table).unwrap();
        assert!(table.open);
        assert_eq!(table.depth, 2);
    }
}
