//! The six cron fields and their value ranges

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::CronError;

/// Inclusive value range of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRange {
    pub min: u32,
    pub max: u32,
}

impl FieldRange {
    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Position of a token in a six-field expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CronField {
    #[serde(rename = "sec")]
    Second,
    #[serde(rename = "min")]
    Minute,
    #[serde(rename = "hou")]
    Hour,
    #[serde(rename = "dom")]
    DayOfMonth,
    #[serde(rename = "mon")]
    Month,
    #[serde(rename = "dow")]
    DayOfWeek,
}

impl CronField {
    /// All fields in expression order
    pub const ALL: [CronField; 6] = [
        CronField::Second,
        CronField::Minute,
        CronField::Hour,
        CronField::DayOfMonth,
        CronField::Month,
        CronField::DayOfWeek,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::Second => 0,
            Self::Minute => 1,
            Self::Hour => 2,
            Self::DayOfMonth => 3,
            Self::Month => 4,
            Self::DayOfWeek => 5,
        }
    }

    pub fn range(self) -> FieldRange {
        let (min, max) = match self {
            Self::Second => (0, 59),
            Self::Minute => (0, 59),
            Self::Hour => (0, 23),
            Self::DayOfMonth => (1, 31),
            Self::Month => (1, 12),
            Self::DayOfWeek => (0, 6),
        };
        FieldRange { min, max }
    }

    /// Short key used in forms and on the command line
    pub fn key(self) -> &'static str {
        match self {
            Self::Second => "sec",
            Self::Minute => "min",
            Self::Hour => "hou",
            Self::DayOfMonth => "dom",
            Self::Month => "mon",
            Self::DayOfWeek => "dow",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Second => "Seconds",
            Self::Minute => "Minutes",
            Self::Hour => "Hours",
            Self::DayOfMonth => "Day of Month",
            Self::Month => "Month",
            Self::DayOfWeek => "Day of Week",
        }
    }

    /// Value a form slot falls back to when the expression is short
    pub fn default_token(self) -> &'static str {
        match self {
            Self::Second | Self::Minute | Self::Hour => "0",
            Self::DayOfMonth | Self::Month | Self::DayOfWeek => "*",
        }
    }
}

impl fmt::Display for CronField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for CronField {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CronField::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| CronError::UnknownField(s.to_string()))
    }
}
