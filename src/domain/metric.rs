use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use super::ResponseTimeSample;

/// Format Cachet uses for `created_at` when asked for `Time-Zone: Etc/UTC`
pub const CACHET_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A point stored in a Cachet metric
#[derive(Debug, Clone, PartialEq)]
pub struct MetricPoint {
    pub value: f64,
    pub created_at: DateTime<Utc>,
}

impl MetricPoint {
    /// Stand-in for an empty metric: nothing from before today gets pushed.
    pub fn start_of_day(now: DateTime<Utc>) -> Self {
        let midnight = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive))
            .unwrap_or(now);

        Self {
            value: 0.0,
            created_at: midnight,
        }
    }

    /// Exclusive lower bound for samples still to push
    pub fn cutoff(&self) -> i64 {
        self.created_at.timestamp()
    }
}

/// Parse a Cachet `created_at` value as UTC.
pub fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, CACHET_DATE_FORMAT) {
        return Some(Utc.from_utc_datetime(&naive));
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Pick the point with the greatest `created_at`; page order is not trusted.
pub fn latest_point<I>(points: I) -> Option<MetricPoint>
where
    I: IntoIterator<Item = MetricPoint>,
{
    points.into_iter().max_by_key(|p| p.created_at)
}

/// Samples strictly newer than `cutoff`, oldest first.
pub fn samples_after(samples: &[ResponseTimeSample], cutoff: i64) -> Vec<ResponseTimeSample> {
    let mut fresh: Vec<ResponseTimeSample> = samples
        .iter()
        .filter(|s| s.timestamp > cutoff)
        .copied()
        .collect();
    fresh.sort_by_key(|s| s.timestamp);
    fresh
}
