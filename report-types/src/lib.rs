//! Report data model and view logic for the test report viewer
//!
//! Everything in this crate is free of browser APIs:
//! - the Dioxus front end (`report-ui`) wraps these types in signals
//! - native unit and integration tests drive them directly
//!
//! Payloads arrive as JSON, either bare or wrapped in a
//! `window.<global> = {...};` script assignment.

pub mod chart;
pub mod config;
pub mod detail;
pub mod error;
pub mod filter;
pub mod html;
pub mod report;
pub mod session;
pub mod status;
pub mod step;
pub mod tree;

pub use chart::{ChartDef, ChartInteraction, ViewWindow, WindowStats, XMode};
pub use config::{Transport, ViewerConfig};
pub use detail::{TableDef, TestDetail};
pub use error::{LoadError, ReportError};
pub use filter::{StatusCounts, StatusFilter};
pub use report::{Report, TestSummary};
pub use session::{LoadOutcome, LoadState, LoadTicket, ReportSession};
pub use status::{OverallStatus, TestStatus};
pub use step::{DiagnosticExchange, DiagnosticSection, Step, StepKind};
pub use tree::{ExpansionState, NodeKind, Row};
