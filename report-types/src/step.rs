use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::html::scalar_text;
use crate::report::null_as_default;
use crate::status::TestStatus;

/// A step record exactly as the generator writes it.
///
/// Only used while loading: [`Step::classify`] turns it into a [`Step`]
/// whose kind is decided once.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawStep {
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    pub status: TestStatus,
    pub timestamp: Option<String>,
    pub comment: Option<String>,
    pub title: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub children: Vec<RawStep>,
    pub table_idx: Option<usize>,
    pub chart_idx: Option<usize>,
    pub details: Option<String>,
    pub details_type: Option<String>,
    pub tx: Option<Value>,
    pub rx: Option<Value>,
    pub expected: Option<Value>,
}

impl RawStep {
    fn is(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub status: TestStatus,
    pub timestamp: String,
    /// Group title, or the step comment for everything else.
    pub label: String,
    /// Secondary comment shown under a group title.
    pub note: Option<String>,
    pub kind: StepKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepKind {
    Group { children: Vec<Step> },
    Diagnostic(DiagnosticExchange),
    Table { index: usize },
    Chart { index: usize },
    Text { details: String },
    Plain,
}

/// A diagnostic request/response pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosticExchange {
    /// Token captured from `send diagnostic request <token>`; `None` for a
    /// stand-alone DIAGNOSTIC record.
    pub request_name: Option<String>,
    pub request: DiagnosticSection,
    pub response: DiagnosticSection,
    pub expected: DiagnosticSection,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosticSection {
    pub raw: Option<String>,
    pub params: Vec<(String, String)>,
}

fn diagnostic_title() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^\s*send diagnostic request\s+(.+?)\s*$")
            .expect("diagnostic title pattern is valid")
    })
}

impl Step {
    pub fn classify(raw: RawStep) -> Self {
        let timestamp = raw.timestamp.clone().unwrap_or_default();

        if raw.is("GROUP") {
            let title = raw.title.clone().unwrap_or_default();
            let token = diagnostic_title()
                .captures(&title)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string());

            if let Some(token) = token {
                if let Some(first) = raw.children.first().filter(|c| c.is("DIAGNOSTIC")) {
                    let mut exchange = DiagnosticExchange::from_record(first);
                    exchange.request_name = Some(token);
                    let timestamp = if timestamp.is_empty() {
                        first.timestamp.clone().unwrap_or_default()
                    } else {
                        timestamp
                    };
                    return Self {
                        status: raw.status.worst(first.status),
                        timestamp,
                        label: title,
                        note: raw.comment,
                        kind: StepKind::Diagnostic(exchange),
                    };
                }
            }

            let label = if title.is_empty() {
                raw.comment.clone().unwrap_or_default()
            } else {
                title
            };
            let note = raw.comment.filter(|c| !c.is_empty() && *c != label);
            return Self {
                status: raw.status,
                timestamp,
                label,
                note,
                kind: StepKind::Group {
                    children: raw.children.into_iter().map(Self::classify).collect(),
                },
            };
        }

        let label = raw
            .comment
            .clone()
            .or_else(|| raw.title.clone())
            .unwrap_or_default();

        let kind = if raw.is("DIAGNOSTIC") {
            StepKind::Diagnostic(DiagnosticExchange::from_record(&raw))
        } else if let (true, Some(index)) = (raw.is("TABLE"), raw.table_idx) {
            StepKind::Table { index }
        } else if let (true, Some(index)) = (raw.is("CHART"), raw.chart_idx) {
            StepKind::Chart { index }
        } else if let Some(details) = text_details(&raw) {
            StepKind::Text { details }
        } else {
            StepKind::Plain
        };

        Self {
            status: raw.status,
            timestamp,
            label,
            note: None,
            kind,
        }
    }

    pub fn children(&self) -> &[Step] {
        match &self.kind {
            StepKind::Group { children } => children,
            _ => &[],
        }
    }
}

fn text_details(raw: &RawStep) -> Option<String> {
    let is_text = raw
        .details_type
        .as_deref()
        .map_or(true, |t| t.eq_ignore_ascii_case("text"));
    raw.details
        .as_ref()
        .filter(|d| is_text && !d.trim().is_empty())
        .cloned()
}

impl DiagnosticExchange {
    fn from_record(record: &RawStep) -> Self {
        Self {
            request_name: None,
            request: DiagnosticSection::from_value(record.tx.as_ref(), "raw"),
            response: DiagnosticSection::from_value(record.rx.as_ref(), "raw"),
            expected: DiagnosticSection::from_value(record.expected.as_ref(), "response"),
        }
    }
}

impl DiagnosticSection {
    fn from_value(value: Option<&Value>, payload_key: &str) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        let Value::Object(map) = value else {
            // Bare payload without a wrapping object.
            return Self {
                raw: format_payload(value),
                params: Vec::new(),
            };
        };

        let raw = map
            .get(payload_key)
            .or_else(|| map.get("raw"))
            .and_then(format_payload);

        let params = ["params", "decoded", "parameters"]
            .iter()
            .find_map(|key| map.get(*key))
            .map(decoded_params)
            .unwrap_or_default();

        Self { raw, params }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_none() && self.params.is_empty()
    }
}

/// Render a raw byte payload: hex strings pass through, integer arrays
/// become `0x..` bytes separated by spaces.
pub fn format_payload(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        Value::Array(items) => {
            let bytes: Vec<String> = items
                .iter()
                .map(|item| match item.as_u64() {
                    Some(byte) => format!("0x{byte:02x}"),
                    None => scalar_text(item),
                })
                .collect();
            (!bytes.is_empty()).then(|| bytes.join(" "))
        }
        Value::Number(n) => n.as_u64().map(|byte| format!("0x{byte:02x}")),
        other => Some(other.to_string()),
    }
}

fn decoded_params(value: &Value) -> Vec<(String, String)> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| (key.clone(), scalar_text(value)))
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| {
                let name = item.get("name").map(scalar_text)?;
                let value = item.get("value").map(scalar_text).unwrap_or_default();
                Some((name, value))
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Status of a test case derived from its lines when the bundle carries none.
///
/// Groups with a non-NONE status count along with their descendants; STEP,
/// TABLE and CHART records count on their own.
pub fn derive_case_status(lines: &[RawStep]) -> TestStatus {
    fn collect(entries: &[RawStep], out: &mut Vec<TestStatus>) {
        for entry in entries {
            if entry.is("GROUP") && entry.status != TestStatus::None {
                out.push(entry.status);
                collect(&entry.children, out);
            } else if entry.is("STEP") || entry.is("TABLE") || entry.is("CHART") {
                out.push(entry.status);
            }
        }
    }

    let mut statuses = Vec::new();
    collect(lines, &mut statuses);
    [TestStatus::Error, TestStatus::Fail, TestStatus::Pass]
        .into_iter()
        .find(|candidate| statuses.contains(candidate))
        .unwrap_or(TestStatus::None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawStep {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn diagnostic_group_becomes_single_exchange() {
        let step = Step::classify(raw(json!({
            "category": "GROUP",
            "title": "send diagnostic request ReadVIN",
            "timestamp": "10:00:01",
            "status": "PASS",
            "children": [{
                "category": "DIAGNOSTIC",
                "timestamp": "10:00:01",
                "tx": {"raw": "0x22 0xf1 0x90"},
                "rx": {"raw": [98, 241, 144, 87], "params": {"VIN": "WDB123"}},
                "expected": {"response": "positive"},
                "status": "PASS"
            }]
        })));

        let StepKind::Diagnostic(exchange) = &step.kind else {
            panic!("expected diagnostic, got {:?}", step.kind);
        };
        assert_eq!(exchange.request_name.as_deref(), Some("ReadVIN"));
        assert_eq!(exchange.request.raw.as_deref(), Some("0x22 0xf1 0x90"));
        assert_eq!(exchange.response.raw.as_deref(), Some("0x62 0xf1 0x90 0x57"));
        assert_eq!(exchange.response.params, vec![("VIN".to_string(), "WDB123".to_string())]);
        assert_eq!(exchange.expected.raw.as_deref(), Some("positive"));
        assert_eq!(step.status, TestStatus::Pass);
    }

    #[test]
    fn matching_title_without_diagnostic_child_stays_a_group() {
        let step = Step::classify(raw(json!({
            "category": "GROUP",
            "title": "Send Diagnostic Request 0x22",
            "children": [{"category": "STEP", "status": "PASS", "comment": "ok"}]
        })));
        assert!(matches!(step.kind, StepKind::Group { ref children } if children.len() == 1));
    }

    #[test]
    fn dispatch_by_category() {
        let table = Step::classify(raw(json!({"category": "TABLE", "table_idx": 2, "comment": "Table: DTCs"})));
        assert_eq!(table.kind, StepKind::Table { index: 2 });

        let chart = Step::classify(raw(json!({"category": "CHART", "chart_idx": 0})));
        assert_eq!(chart.kind, StepKind::Chart { index: 0 });

        let text = Step::classify(raw(json!({
            "category": "STEP", "status": "INFO", "comment": "log",
            "details": "line 1\nline 2", "details_type": "text"
        })));
        assert_eq!(text.kind, StepKind::Text { details: "line 1\nline 2".to_string() });

        let plain = Step::classify(raw(json!({"category": "STEP", "status": "PASS", "comment": "a(3) == 3"})));
        assert_eq!(plain.kind, StepKind::Plain);
        assert_eq!(plain.label, "a(3) == 3");

        let orphan_table = Step::classify(raw(json!({"category": "TABLE", "comment": "no index"})));
        assert_eq!(orphan_table.kind, StepKind::Plain);
    }

    #[test]
    fn case_status_follows_priority() {
        let lines: Vec<RawStep> = serde_json::from_value(json!([
            {"category": "STEP", "status": "PASS"},
            {"category": "GROUP", "status": "NONE", "children": [{"category": "STEP", "status": "ERROR"}]},
            {"category": "TABLE", "status": "FAIL"}
        ]))
        .unwrap();
        // The NONE group hides its ERROR child.
        assert_eq!(derive_case_status(&lines), TestStatus::Fail);

        let lines: Vec<RawStep> = serde_json::from_value(json!([
            {"category": "GROUP", "status": "FAIL", "children": [{"category": "STEP", "status": "ERROR"}]}
        ]))
        .unwrap();
        assert_eq!(derive_case_status(&lines), TestStatus::Error);

        assert_eq!(derive_case_status(&[]), TestStatus::None);
    }
}
