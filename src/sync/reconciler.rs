use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, info_span, Instrument};

use super::{MonitoringSource, StatusSink};
use crate::adapters::{CachetClient, UptimeRobotClient};
use crate::config::{AppConfig, MonitorRoute};
use crate::domain::{map_status, samples_after, ComponentStatus, Monitor, MonitorStatus};
use crate::error::{Result, SyncError};

/// A configured route together with the status page it writes to
#[derive(Clone)]
pub struct RouteBinding {
    pub route: MonitorRoute,
    pub sink: Arc<dyn StatusSink>,
}

/// What happened to a component during one run
#[derive(Debug, Clone, PartialEq)]
pub enum StatusChange {
    /// Route has no component id
    NotConfigured,
    /// Paused or unrecognized monitor; component left alone
    NoMapping(MonitorStatus),
    Unchanged(ComponentStatus),
    Updated {
        from: ComponentStatus,
        to: ComponentStatus,
    },
    /// Dry run: the write that would have been issued
    WouldUpdate {
        from: ComponentStatus,
        to: ComponentStatus,
    },
}

/// Result of syncing one monitor
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorOutcome {
    pub monitor_id: u64,
    pub name: String,
    pub status: StatusChange,
    /// Points pushed (or, in a dry run, that would have been pushed)
    pub points_appended: usize,
}

/// A monitor whose sync failed; the rest of the run carried on
#[derive(Debug)]
pub struct MonitorFailure {
    pub monitor_id: u64,
    pub name: String,
    pub error: SyncError,
}

/// Summary of a completed run
#[derive(Debug, Default)]
pub struct RunReport {
    pub fetched: usize,
    /// Monitors with no configured route
    pub skipped: usize,
    pub synced: Vec<MonitorOutcome>,
    pub failures: Vec<MonitorFailure>,
    pub dry_run: bool,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Pulls monitors from the source and pushes status and response times to
/// each monitor's status page, one monitor at a time.
pub struct Reconciler {
    source: Arc<dyn MonitoringSource>,
    routes: HashMap<String, RouteBinding>,
    dry_run: bool,
}

impl Reconciler {
    pub fn new(source: Arc<dyn MonitoringSource>) -> Self {
        Self {
            source,
            routes: HashMap::new(),
            dry_run: false,
        }
    }

    /// Log intended writes instead of issuing them
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    pub fn with_route(mut self, route: MonitorRoute, sink: Arc<dyn StatusSink>) -> Self {
        self.routes
            .insert(route.url.clone(), RouteBinding { route, sink });
        self
    }

    /// Wire real HTTP clients for every configured route.
    ///
    /// Routes pointing at the same Cachet instance with the same key share a client.
    pub fn from_config(config: &AppConfig, timeout: Duration) -> Result<Self> {
        let source = UptimeRobotClient::new(&config.uptime_robot, timeout)?;
        let mut reconciler = Self::new(Arc::new(source));
        let mut clients: HashMap<(String, String), Arc<dyn StatusSink>> = HashMap::new();

        for route in config.routes() {
            let key = (route.cachet_url.clone(), route.cachet_api_key.clone());
            let sink = match clients.entry(key) {
                Entry::Occupied(entry) => Arc::clone(entry.get()),
                Entry::Vacant(entry) => {
                    let client: Arc<dyn StatusSink> = Arc::new(CachetClient::new(
                        &route.cachet_url,
                        &route.cachet_api_key,
                        timeout,
                    )?);
                    Arc::clone(entry.insert(client))
                }
            };
            reconciler = reconciler.with_route(route, sink);
        }

        Ok(reconciler)
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    fn lookup(&self, monitor_url: &str) -> Option<&RouteBinding> {
        self.routes.get(monitor_url)
    }

    /// Run one reconciliation pass.
    ///
    /// Only a failed monitor fetch aborts the run; per-monitor errors are
    /// logged and collected in the report.
    pub async fn run(&self) -> Result<RunReport> {
        let monitors = match self.source.fetch_all(true).await {
            Ok(monitors) => monitors,
            Err(e @ SyncError::ProviderRejected { .. }) => {
                error!("No data was returned from UptimeRobot: {}", e);
                return Err(e);
            }
            Err(e) => {
                error!("Failed to fetch monitors from UptimeRobot: {}", e);
                return Err(e);
            }
        };

        let mut report = RunReport {
            fetched: monitors.len(),
            dry_run: self.dry_run,
            ..Default::default()
        };

        for monitor in &monitors {
            let Some(binding) = self.lookup(&monitor.url) else {
                report.skipped += 1;
                continue;
            };

            let span = info_span!(
                "monitor",
                name = %monitor.friendly_name,
                url = %monitor.url,
                id = monitor.id
            );
            match self.sync_monitor(monitor, binding).instrument(span).await {
                Ok(outcome) => report.synced.push(outcome),
                Err(e) => {
                    error!(
                        "Failed to sync monitor {} ({}): {}",
                        monitor.friendly_name, monitor.url, e
                    );
                    report.failures.push(MonitorFailure {
                        monitor_id: monitor.id,
                        name: monitor.friendly_name.clone(),
                        error: e,
                    });
                }
            }
        }

        info!(
            "Run complete: {} fetched, {} synced, {} failed, {} untracked",
            report.fetched,
            report.synced.len(),
            report.failures.len(),
            report.skipped
        );
        Ok(report)
    }

    async fn sync_monitor(&self, monitor: &Monitor, binding: &RouteBinding) -> Result<MonitorOutcome> {
        info!(
            "Updating monitor {}. URL: {}. ID: {}",
            monitor.friendly_name, monitor.url, monitor.id
        );

        let sink = binding.sink.as_ref();

        // Status goes first; a failure here skips the metric for this monitor.
        let status = match binding.route.component_id {
            Some(component_id) => self.sync_component(sink, component_id, monitor.status).await?,
            None => StatusChange::NotConfigured,
        };

        let points_appended = match binding.route.metric_id {
            Some(metric_id) => self.sync_metric(sink, metric_id, monitor).await?,
            None => 0,
        };

        Ok(MonitorOutcome {
            monitor_id: monitor.id,
            name: monitor.friendly_name.clone(),
            status,
            points_appended,
        })
    }

    async fn sync_component(
        &self,
        sink: &dyn StatusSink,
        component_id: u64,
        monitor_status: MonitorStatus,
    ) -> Result<StatusChange> {
        let Some(target) = map_status(monitor_status) else {
            info!(
                "Monitor status {} has no Cachet mapping; component {} left unchanged",
                monitor_status, component_id
            );
            return Ok(StatusChange::NoMapping(monitor_status));
        };

        let current = sink.current_status(component_id).await?;
        if current == target {
            info!(
                "Component {} already {}; skipping update",
                component_id, current
            );
            return Ok(StatusChange::Unchanged(current));
        }

        if self.dry_run {
            info!(
                "[dry run] would set component {} from {} to {}",
                component_id, current, target
            );
            return Ok(StatusChange::WouldUpdate {
                from: current,
                to: target,
            });
        }

        sink.set_status(component_id, target).await?;
        info!(
            "Component {} updated from {} to {}",
            component_id, current, target
        );
        Ok(StatusChange::Updated {
            from: current,
            to: target,
        })
    }

    async fn sync_metric(&self, sink: &dyn StatusSink, metric_id: u64, monitor: &Monitor) -> Result<usize> {
        let latest = sink.latest_metric_point(metric_id).await?;

        info!("Number of response times: {}", monitor.response_times.len());
        info!(
            "Latest metric point: value={} created_at={}",
            latest.value, latest.created_at
        );

        let fresh = samples_after(&monitor.response_times, latest.cutoff());
        info!("Number of new response times: {}", fresh.len());

        if fresh.is_empty() {
            return Ok(0);
        }

        if self.dry_run {
            info!(
                "[dry run] would append {} point(s) to metric {}",
                fresh.len(),
                metric_id
            );
            return Ok(fresh.len());
        }

        for sample in &fresh {
            sink.append_metric_point(metric_id, sample.value, sample.timestamp)
                .await?;
            info!(
                "Metric {} point created: value={} timestamp={}",
                metric_id, sample.value, sample.timestamp
            );
        }

        Ok(fresh.len())
    }
}
