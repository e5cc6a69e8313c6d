use serde::{Deserialize, Serialize};

/// UptimeRobot monitor status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum MonitorStatus {
    Paused,
    NotCheckedYet,
    Up,
    SeemsDown,
    Down,
    /// Any code UptimeRobot may add later
    Unknown(i64),
}

impl From<i64> for MonitorStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => MonitorStatus::Paused,
            1 => MonitorStatus::NotCheckedYet,
            2 => MonitorStatus::Up,
            8 => MonitorStatus::SeemsDown,
            9 => MonitorStatus::Down,
            other => MonitorStatus::Unknown(other),
        }
    }
}

impl From<MonitorStatus> for i64 {
    fn from(status: MonitorStatus) -> Self {
        match status {
            MonitorStatus::Paused => 0,
            MonitorStatus::NotCheckedYet => 1,
            MonitorStatus::Up => 2,
            MonitorStatus::SeemsDown => 8,
            MonitorStatus::Down => 9,
            MonitorStatus::Unknown(code) => code,
        }
    }
}

impl std::fmt::Display for MonitorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonitorStatus::Paused => write!(f, "paused"),
            MonitorStatus::NotCheckedYet => write!(f, "not checked yet"),
            MonitorStatus::Up => write!(f, "up"),
            MonitorStatus::SeemsDown => write!(f, "seems down"),
            MonitorStatus::Down => write!(f, "down"),
            MonitorStatus::Unknown(code) => write!(f, "unknown ({})", code),
        }
    }
}

/// A single response-time measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponseTimeSample {
    /// Unix epoch seconds
    #[serde(rename = "datetime")]
    pub timestamp: i64,
    /// Latency in milliseconds
    pub value: f64,
}

/// Snapshot of one UptimeRobot monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monitor {
    pub id: u64,
    pub friendly_name: String,
    /// Join key against the configured routes
    pub url: String,
    pub status: MonitorStatus,
    /// Unordered; absent unless requested
    #[serde(default)]
    pub response_times: Vec<ResponseTimeSample>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_uptime_robot_monitor() {
        let raw = json!({
            "id": 777,
            "friendly_name": "Example",
            "url": "https://example.com",
            "type": 1,
            "status": 9,
            "response_times": [
                {"datetime": 200, "value": 7},
                {"datetime": 100, "value": 5}
            ]
        });

        let monitor: Monitor = serde_json::from_value(raw).unwrap();
        assert_eq!(monitor.id, 777);
        assert_eq!(monitor.status, MonitorStatus::Down);
        assert_eq!(monitor.response_times.len(), 2);
        assert_eq!(monitor.response_times[0].timestamp, 200);
        assert_eq!(monitor.response_times[0].value, 7.0);
    }

    #[test]
    fn response_times_default_to_empty() {
        let raw = json!({
            "id": 1,
            "friendly_name": "No samples",
            "url": "https://example.org",
            "status": 2
        });

        let monitor: Monitor = serde_json::from_value(raw).unwrap();
        assert!(monitor.response_times.is_empty());
    }

    #[test]
    fn unrecognized_codes_are_kept() {
        assert_eq!(MonitorStatus::from(5), MonitorStatus::Unknown(5));
        assert_eq!(i64::from(MonitorStatus::Unknown(5)), 5);
        assert_eq!(i64::from(MonitorStatus::SeemsDown), 8);
    }

    #[test]
    fn out_of_range_codes_still_decode() {
        let raw = json!([
            {"id": 1, "friendly_name": "Odd", "url": "https://odd.example.com", "status": 300},
            {"id": 2, "friendly_name": "Negative", "url": "https://neg.example.com", "status": -1},
            {"id": 3, "friendly_name": "Down", "url": "https://example.com", "status": 9}
        ]);

        let monitors: Vec<Monitor> = serde_json::from_value(raw).unwrap();
        assert_eq!(monitors[0].status, MonitorStatus::Unknown(300));
        assert_eq!(monitors[1].status, MonitorStatus::Unknown(-1));
        assert_eq!(monitors[2].status, MonitorStatus::Down);
    }
}
