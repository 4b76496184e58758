use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Status of a test case or a single step.
///
/// Parsing is case-insensitive; anything unrecognised (including a missing
/// value) is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TestStatus {
    Pass,
    Fail,
    Error,
    Info,
    #[default]
    None,
}

impl TestStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PASS" => Self::Pass,
            "FAIL" => Self::Fail,
            "ERROR" => Self::Error,
            "INFO" => Self::Info,
            _ => Self::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Error => "ERROR",
            Self::Info => "INFO",
            Self::None => "NONE",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Pass => "status status--pass",
            Self::Fail => "status status--fail",
            Self::Error => "status status--error",
            Self::Info => "status status--info",
            Self::None => "status status--none",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::Error => 3,
            Self::Fail => 2,
            Self::Pass => 1,
            Self::Info | Self::None => 0,
        }
    }

    /// The more severe of two statuses (ERROR > FAIL > PASS > INFO/NONE).
    pub fn worst(self, other: Self) -> Self {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TestStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TestStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse).unwrap_or_default())
    }
}

/// Aggregate status of a whole report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverallStatus {
    Pass,
    Fail,
    Error,
    None,
    Partial,
}

impl OverallStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Error => "ERROR",
            Self::None => "NONE",
            Self::Partial => "PARTIAL",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Pass => "status status--pass",
            Self::Fail => "status status--fail",
            Self::Error => "status status--error",
            Self::None => "status status--none",
            Self::Partial => "status status--partial",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
