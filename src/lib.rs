pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod sync;

pub use adapters::{CachetClient, UptimeRobotClient};
pub use config::{AppConfig, MonitorRoute, ProviderConfig};
pub use domain::{map_status, ComponentStatus, MetricPoint, Monitor, MonitorStatus, ResponseTimeSample};
pub use error::{Result, SyncError};
pub use sync::{MonitoringSource, Reconciler, RunReport, StatusSink};
