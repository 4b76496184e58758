/// Why a per-test detail bundle could not be shown.
///
/// Every variant is recoverable: the detail pane shows a "could not be
/// loaded" state and the rest of the report keeps working.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("HTTP error: {status}")]
    Http { status: u16 },

    #[error("Failed to parse bundle: {0}")]
    Parse(String),

    #[error("Bundle did not define `window.{0}`")]
    MissingGlobal(String),

    #[error("Bundle name mismatch: requested `{requested}`, found `{found}`")]
    NameMismatch { requested: String, found: String },
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Errors reading the top-level report object.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to parse report: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Page does not define `window.{0}`")]
    MissingGlobal(String),
}
