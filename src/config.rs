use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;
use url::Url;

use crate::error::{Result, SyncError};

pub const DEFAULT_UPTIME_ROBOT_URL: &str = "https://api.uptimerobot.com/v2/getMonitors";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub uptime_robot: ProviderConfig,
    #[serde(default)]
    pub monitors: Vec<MonitorRoute>,
}

/// UptimeRobot account settings
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Main API key (read-only keys work too)
    pub api_key: String,
    /// getMonitors endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Days used for `custom_uptime_ratios`
    #[serde(default = "default_uptime_ratio_days")]
    pub custom_uptime_ratios: u32,
}

fn default_api_url() -> String {
    DEFAULT_UPTIME_ROBOT_URL.to_string()
}

fn default_uptime_ratio_days() -> u32 {
    30
}

/// Where one UptimeRobot monitor is reported in Cachet
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MonitorRoute {
    /// Monitor URL as configured in UptimeRobot
    pub url: String,
    /// Cachet base URL (e.g., "https://status.example.com")
    pub cachet_url: String,
    pub cachet_api_key: String,
    /// Cachet metric fed with response times
    #[serde(default)]
    pub metric_id: Option<u64>,
    /// Cachet component fed with the monitor status
    #[serde(default)]
    pub component_id: Option<u64>,
}

impl MonitorRoute {
    pub fn has_effect(&self) -> bool {
        self.metric_id.is_some() || self.component_id.is_some()
    }
}

impl AppConfig {
    /// Load configuration from a file, with `UPTIME_CACHET_*` environment overrides
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let builder = Config::builder()
            .set_default("uptime_robot.api_url", DEFAULT_UPTIME_ROBOT_URL)?
            .set_default("uptime_robot.custom_uptime_ratios", 30)?
            .add_source(File::from(path).required(true))
            // UPTIME_CACHET_UPTIME_ROBOT__API_KEY, etc.
            .add_source(
                Environment::with_prefix("UPTIME_CACHET")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.uptime_robot.api_key.trim().is_empty() {
            errors.push("uptime_robot.api_key must not be empty".to_string());
        }

        if Url::parse(&self.uptime_robot.api_url).is_err() {
            errors.push(format!(
                "uptime_robot.api_url is not a valid URL: {}",
                self.uptime_robot.api_url
            ));
        }

        if self.monitors.is_empty() {
            errors.push("no [[monitors]] entries configured".to_string());
        }

        let mut seen = std::collections::HashSet::new();
        for route in &self.monitors {
            if route.url.trim().is_empty() {
                errors.push("monitor entry with empty url".to_string());
                continue;
            }
            if !seen.insert(route.url.as_str()) {
                errors.push(format!("duplicate monitor url: {}", route.url));
            }
            if route.cachet_api_key.trim().is_empty() {
                errors.push(format!("{}: cachet_api_key must not be empty", route.url));
            }
            match Url::parse(&route.cachet_url) {
                Ok(u) if matches!(u.scheme(), "http" | "https") => {}
                _ => errors.push(format!(
                    "{}: cachet_url is not an http(s) URL: {}",
                    route.url, route.cachet_url
                )),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SyncError::InvalidConfig(errors.join("; ")))
        }
    }

    /// Validated routes with normalized Cachet base URLs
    pub fn routes(&self) -> impl Iterator<Item = MonitorRoute> + '_ {
        self.monitors.iter().map(|route| {
            if !route.has_effect() {
                warn!(
                    "Monitor {} has neither metric_id nor component_id; nothing will be synced",
                    route.url
                );
            }
            let mut route = route.clone();
            route.cachet_url = route.cachet_url.trim_end_matches('/').to_string();
            route
        })
    }
}
