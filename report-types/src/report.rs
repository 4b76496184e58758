use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::ReportError;
use crate::status::TestStatus;

/// Top-level report object (`window.myreport`), loaded once per page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Report {
    #[serde(deserialize_with = "null_as_default")]
    pub project_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub test_suite_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub test_environment: Map<String, Value>,
    pub device_under_test: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub statistics: ReportStatistics,
    #[serde(deserialize_with = "null_as_default")]
    pub test_names: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub report_data: HashMap<String, TestSummary>,
    pub report_is_complete: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub framework: Framework,
}

/// Per-test summary kept in the top-level report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "RawSummary")]
pub struct TestSummary {
    pub name: String,
    pub status: TestStatus,
    pub goal: String,
    pub requirements: Vec<Value>,
    /// The generator wrote a status string other than PASS/FAIL/ERROR/INFO/NONE.
    /// Such tests display as NONE but are left out of the `none` count.
    #[serde(skip)]
    pub unrecognized_status: bool,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawSummary {
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(deserialize_with = "null_as_default")]
    status: String,
    #[serde(deserialize_with = "null_as_default")]
    goal: String,
    #[serde(deserialize_with = "null_as_default")]
    requirements: Vec<Value>,
}

impl From<RawSummary> for TestSummary {
    fn from(raw: RawSummary) -> Self {
        let status = TestStatus::parse(&raw.status);
        let literal = raw.status.trim();
        Self {
            name: raw.name,
            status,
            goal: raw.goal,
            requirements: raw.requirements,
            unrecognized_status: status == TestStatus::None
                && !literal.is_empty()
                && !literal.eq_ignore_ascii_case("NONE"),
        }
    }
}

/// Display strings written by the report generator. Counts are recomputed
/// by [`crate::filter::report_stats`]; only the timing fields are used as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportStatistics {
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(deserialize_with = "null_as_default")]
    pub overall: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Framework {
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    pub stub_mode_active: Value,
    pub config: Value,
}

impl Report {
    pub fn from_value(value: Value) -> Result<Self, ReportError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parse either bare JSON or `window.myreport = {...};` script text.
    pub fn from_script(text: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(script_payload(text))?)
    }

    pub fn summary(&self, name: &str) -> Option<&TestSummary> {
        self.report_data.get(name)
    }

    /// Summary status of a test; tests missing from `reportData` are `NONE`.
    pub fn status_of(&self, name: &str) -> TestStatus {
        self.summary(name).map(|s| s.status).unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        if self.project_name.is_empty() {
            "Test Report"
        } else {
            &self.project_name
        }
    }
}

/// Strip a `window.<global> = ... ;` wrapper, leaving the JSON body.
pub fn script_payload(text: &str) -> &str {
    let trimmed = text.trim();
    let body = if trimmed.starts_with('{') || trimmed.starts_with('[') {
        trimmed
    } else {
        match trimmed.split_once('=') {
            Some((_, rest)) => rest.trim(),
            None => trimmed,
        }
    };
    body.trim_end_matches(';').trim_end()
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
