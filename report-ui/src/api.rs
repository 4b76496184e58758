use std::sync::OnceLock;

use gloo_net::http::Request;
use report_types::{LoadError, TestDetail, TestStatus, ViewerConfig};
use serde::Deserialize;

use crate::interop::{encode_path_segment, read_global_json};

/// Page global that may override [`ViewerConfig`] defaults.
const CONFIG_GLOBAL: &str = "reportViewerConfig";

fn resolve_viewer_config() -> ViewerConfig {
    let Some(text) = read_global_json(CONFIG_GLOBAL) else {
        return ViewerConfig::default();
    };
    match serde_json::from_str(&text) {
        Ok(config) => config,
        Err(e) => {
            dioxus_logger::tracing::warn!("Ignoring malformed window.{CONFIG_GLOBAL}: {}", e);
            ViewerConfig::default()
        }
    }
}

/// Lazy-static equivalent for WASM - resolved at first use
static VIEWER_CONFIG: OnceLock<ViewerConfig> = OnceLock::new();

pub fn viewer_config() -> &'static ViewerConfig {
    VIEWER_CONFIG.get_or_init(resolve_viewer_config)
}

pub fn bundle_url(test_name: &str) -> String {
    viewer_config().bundle_url(&encode_path_segment(test_name))
}

/// GET a detail bundle and parse it; the body may be bare JSON or a
/// `window.reportData = ...;` script.
pub async fn fetch_bundle(url: &str) -> Result<TestDetail, LoadError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(LoadError::Http {
            status: response.status(),
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;
    TestDetail::from_script(&text)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TestCaseEntry {
    Name(String),
    Case {
        name: String,
        #[serde(default)]
        status: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub name: String,
    pub status: Option<TestStatus>,
}

impl From<TestCaseEntry> for TestCase {
    fn from(entry: TestCaseEntry) -> Self {
        match entry {
            TestCaseEntry::Name(name) => Self { name, status: None },
            TestCaseEntry::Case { name, status } => Self {
                name,
                status: status.as_deref().map(TestStatus::parse),
            },
        }
    }
}

pub async fn fetch_test_cases() -> Result<Vec<TestCase>, String> {
    let url = viewer_config().test_cases_url();

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {e}"))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    let entries: Vec<TestCaseEntry> = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse JSON: {e}"))?;

    Ok(entries.into_iter().map(TestCase::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_entries_accept_strings_and_objects() {
        let entries: Vec<TestCaseEntry> =
            serde_json::from_str(r#"["Door_Lock", {"name": "Wiper", "status": "fail"}, {"name": "Horn"}]"#)
                .unwrap();
        let cases: Vec<TestCase> = entries.into_iter().map(TestCase::from).collect();
        assert_eq!(
            cases,
            vec![
                TestCase { name: "Door_Lock".to_string(), status: None },
                TestCase { name: "Wiper".to_string(), status: Some(TestStatus::Fail) },
                TestCase { name: "Horn".to_string(), status: None },
            ]
        );
    }
}
