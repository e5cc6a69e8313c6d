use async_trait::async_trait;

use crate::domain::{ComponentStatus, MetricPoint, Monitor};
use crate::error::Result;

/// Source of monitor snapshots (UptimeRobot)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MonitoringSource: Send + Sync {
    /// Fetch every monitor on the account in one request.
    ///
    /// A logical rejection (`stat != "ok"`) is returned as
    /// [`SyncError::ProviderRejected`](crate::error::SyncError::ProviderRejected),
    /// distinct from transport failures.
    async fn fetch_all(&self, include_response_times: bool) -> Result<Vec<Monitor>>;
}

/// Status page holding components and metrics (Cachet)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusSink: Send + Sync {
    async fn current_status(&self, component_id: u64) -> Result<ComponentStatus>;

    /// Unconditional write; callers compare against `current_status` first.
    async fn set_status(&self, component_id: u64, target: ComponentStatus) -> Result<()>;

    /// Newest stored point, or a start-of-day stand-in when the metric is empty.
    async fn latest_metric_point(&self, metric_id: u64) -> Result<MetricPoint>;

    async fn append_metric_point(&self, metric_id: u64, value: f64, timestamp: i64) -> Result<()>;
}
