use serde::Serialize;
use std::str::FromStr;

use super::MonitorStatus;
use crate::error::SyncError;

/// Cachet component status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum ComponentStatus {
    Unknown,
    Operational,
    PerformanceIssues,
    /// Shown for monitors UptimeRobot reports as "seems down"
    PartialOutage,
    MajorOutage,
}

impl ComponentStatus {
    pub fn code(&self) -> u8 {
        match self {
            ComponentStatus::Unknown => 0,
            ComponentStatus::Operational => 1,
            ComponentStatus::PerformanceIssues => 2,
            ComponentStatus::PartialOutage => 3,
            ComponentStatus::MajorOutage => 4,
        }
    }
}

impl From<ComponentStatus> for u8 {
    fn from(status: ComponentStatus) -> Self {
        status.code()
    }
}

impl TryFrom<i64> for ComponentStatus {
    type Error = SyncError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ComponentStatus::Unknown),
            1 => Ok(ComponentStatus::Operational),
            2 => Ok(ComponentStatus::PerformanceIssues),
            3 => Ok(ComponentStatus::PartialOutage),
            4 => Ok(ComponentStatus::MajorOutage),
            other => Err(SyncError::InvalidStatus(other.to_string())),
        }
    }
}

impl FromStr for ComponentStatus {
    type Err = SyncError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let code: i64 = raw
            .trim()
            .parse()
            .map_err(|_| SyncError::InvalidStatus(raw.to_string()))?;
        Self::try_from(code)
    }
}

impl std::fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ComponentStatus::Unknown => "unknown",
            ComponentStatus::Operational => "operational",
            ComponentStatus::PerformanceIssues => "performance issues",
            ComponentStatus::PartialOutage => "partial outage",
            ComponentStatus::MajorOutage => "major outage",
        };
        write!(f, "{} ({})", name, self.code())
    }
}

/// Map an UptimeRobot status to the Cachet status it should produce.
///
/// Paused and unrecognized monitors have no mapping; the component is left
/// untouched and not even read.
pub fn map_status(status: MonitorStatus) -> Option<ComponentStatus> {
    match status {
        MonitorStatus::NotCheckedYet | MonitorStatus::Up => Some(ComponentStatus::Operational),
        MonitorStatus::SeemsDown => Some(ComponentStatus::PartialOutage),
        MonitorStatus::Down => Some(ComponentStatus::MajorOutage),
        MonitorStatus::Paused | MonitorStatus::Unknown(_) => None,
    }
}
