use std::fmt;
use std::str::FromStr;

use crate::report::Report;
use crate::status::{OverallStatus, TestStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pass,
    Fail,
    Error,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [Self::All, Self::Pass, Self::Fail, Self::Error];

    pub fn matches(self, status: TestStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pass => status == TestStatus::Pass,
            Self::Fail => status == TestStatus::Fail,
            Self::Error => status == TestStatus::Error,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown status filter: {0}")]
pub struct UnknownFilter(pub String);

impl FromStr for StatusFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "pass" => Ok(Self::Pass),
            "fail" => Ok(Self::Fail),
            "error" => Ok(Self::Error),
            _ => Err(UnknownFilter(s.to_string())),
        }
    }
}

/// Test names matching `filter`, in `testNames` order.
pub fn visible_tests(report: &Report, filter: StatusFilter) -> Vec<&str> {
    report
        .test_names
        .iter()
        .filter(|name| filter.matches(report.status_of(name)))
        .map(String::as_str)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCounts {
    pub pass: usize,
    pub fail: usize,
    pub error: usize,
    pub none: usize,
    pub all: usize,
    pub overall: OverallStatus,
}

impl StatusCounts {
    /// Integer share of `all`, floored; 0 for an empty report.
    pub fn percent(&self, count: usize) -> usize {
        if self.all == 0 {
            0
        } else {
            count * 100 / self.all
        }
    }
}

/// Counts over the full, unfiltered test list.
pub fn report_stats(report: &Report) -> StatusCounts {
    let mut counts = StatusCounts {
        pass: 0,
        fail: 0,
        error: 0,
        none: 0,
        all: report.test_names.len(),
        overall: OverallStatus::None,
    };
    for name in &report.test_names {
        // INFO and unrecognised statuses only count toward `all`
        if report.summary(name).is_some_and(|s| s.unrecognized_status) {
            continue;
        }
        match report.status_of(name) {
            TestStatus::Pass => counts.pass += 1,
            TestStatus::Fail => counts.fail += 1,
            TestStatus::Error => counts.error += 1,
            TestStatus::None => counts.none += 1,
            TestStatus::Info => {}
        }
    }

    let runnable = counts.pass + counts.fail + counts.error;
    counts.overall = if counts.error > 0 {
        OverallStatus::Error
    } else if counts.fail > 0 {
        OverallStatus::Fail
    } else if counts.pass > 0 && counts.pass == runnable {
        OverallStatus::Pass
    } else if counts.none == counts.all {
        OverallStatus::None
    } else {
        OverallStatus::Partial
    };
    counts
}
