pub mod chart;
pub mod nav;
pub mod steps;
pub mod summary;
pub mod tables;
pub mod test_cases;

pub use chart::ChartPanel;
pub use nav::{Sidebar, StatsBar};
pub use steps::DetailPanel;
pub use summary::SummaryPanel;
pub use tables::{HtmlBlock, TableBody};
pub use test_cases::TestCasesPanel;
