use serde::{Deserialize, Serialize};

/// How detail bundles are fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Inject a `<script>` tag and read the global it defines. Works from
    /// `file://`.
    #[default]
    Script,
    /// HTTP GET and parse the body.
    Fetch,
}

/// Viewer settings, optionally supplied by the page as
/// `window.reportViewerConfig`. Every field falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub bundle_root: String,
    pub bundle_dir: String,
    pub bundle_file: String,
    pub bundle_global: String,
    pub report_global: String,
    pub api_base: String,
    pub transport: Transport,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            bundle_root: "tests".to_string(),
            bundle_dir: "testResults".to_string(),
            bundle_file: "reportData.js".to_string(),
            bundle_global: "reportData".to_string(),
            report_global: "myreport".to_string(),
            api_base: String::new(),
            transport: Transport::Script,
        }
    }
}

impl ViewerConfig {
    /// `<bundle_root>/<name>/<bundle_dir>/<bundle_file>`; `encoded_name` must
    /// already be URL-path-encoded.
    pub fn bundle_url(&self, encoded_name: &str) -> String {
        [
            self.bundle_root.trim_end_matches('/'),
            encoded_name,
            self.bundle_dir.trim_matches('/'),
            self.bundle_file.trim_start_matches('/'),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("/")
    }

    pub fn test_cases_url(&self) -> String {
        format!("{}/api/test-cases", self.api_base.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bundle_url() {
        let config = ViewerConfig::default();
        assert_eq!(config.bundle_url("Door_Lock"), "tests/Door_Lock/testResults/reportData.js");
        assert_eq!(config.test_cases_url(), "/api/test-cases");
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config: ViewerConfig = serde_json::from_str(
            r#"{"bundle_root": "../results/", "transport": "fetch", "api_base": "http://localhost:8080/"}"#,
        )
        .unwrap();
        assert_eq!(config.transport, Transport::Fetch);
        assert_eq!(config.bundle_global, "reportData");
        assert_eq!(config.bundle_url("A%20B"), "../results/A%20B/testResults/reportData.js");
        assert_eq!(config.test_cases_url(), "http://localhost:8080/api/test-cases");
    }
}
