use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chart::ChartDef;
use crate::error::LoadError;
use crate::report::{null_as_default, script_payload};
use crate::status::TestStatus;
use crate::step::{derive_case_status, RawStep, Step};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableDef {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<Vec<Value>>,
    pub column_header: Option<Vec<Value>>,
    pub row_header: Option<Vec<Value>>,
    /// Table starts open when the bundle is loaded.
    pub expanded: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub comment: String,
    pub status: TestStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawDetail {
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    goal: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    requirements: Vec<Value>,
    status: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    lines: Vec<RawStep>,
    #[serde(deserialize_with = "null_as_default")]
    tables: Vec<TableDef>,
    #[serde(deserialize_with = "null_as_default")]
    charts: Vec<Value>,
    project: Option<String>,
    index: Option<u64>,
    dut: Value,
    condition: Option<String>,
    condition_comment: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    conditions: Vec<ConditionRecord>,
}

/// One test's detail bundle (`window.reportData`), with steps already
/// classified.
#[derive(Debug, Clone, PartialEq)]
pub struct TestDetail {
    pub name: String,
    pub goal: Option<String>,
    pub requirements: Vec<Value>,
    pub status: TestStatus,
    pub steps: Vec<Step>,
    pub tables: Vec<TableDef>,
    pub charts: Vec<ChartDef>,
    pub project: Option<String>,
    pub index: Option<u64>,
    pub dut: Value,
    pub condition: Option<String>,
    pub condition_comment: Option<String>,
    pub conditions: Vec<ConditionRecord>,
}

impl TestDetail {
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        let raw: RawDetail = serde_json::from_value(value)?;
        Ok(Self::from_raw(raw))
    }

    /// Parse bare JSON or `window.reportData = {...};` script text.
    pub fn from_script(text: &str) -> Result<Self, LoadError> {
        let raw: RawDetail = serde_json::from_str(script_payload(text))?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawDetail) -> Self {
        let status = raw
            .status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(TestStatus::parse)
            .unwrap_or_else(|| derive_case_status(&raw.lines));

        Self {
            name: raw.name,
            goal: raw.goal.filter(|g| !g.trim().is_empty()),
            requirements: raw.requirements,
            status,
            steps: raw.lines.into_iter().map(Step::classify).collect(),
            tables: raw.tables,
            charts: raw.charts.iter().map(ChartDef::from_value).collect(),
            project: raw.project,
            index: raw.index,
            dut: raw.dut,
            condition: raw.condition.filter(|c| !c.is_empty()),
            condition_comment: raw.condition_comment.filter(|c| !c.is_empty()),
            conditions: raw.conditions,
        }
    }

    pub fn table(&self, index: usize) -> Option<&TableDef> {
        self.tables.get(index)
    }

    pub fn chart(&self, index: usize) -> Option<&ChartDef> {
        self.charts.get(index)
    }

    /// Accept this bundle only if it belongs to the requested test.
    pub fn verify_name(self, requested: &str) -> Result<Self, LoadError> {
        if self.name == requested {
            Ok(self)
        } else {
            Err(LoadError::NameMismatch {
                requested: requested.to_string(),
                found: self.name,
            })
        }
    }
}
