//! UptimeRobot v2 `getMonitors` client

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::domain::Monitor;
use crate::error::{Result, SyncError};
use crate::sync::MonitoringSource;

const USER_AGENT: &str = "uptime-cachet/0.1";

/// Read-only UptimeRobot client
#[derive(Clone)]
pub struct UptimeRobotClient {
    http: Client,
    api_url: String,
    api_key: String,
    custom_uptime_ratios: u32,
}

impl UptimeRobotClient {
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                SyncError::InvalidConfig(format!("failed to build UptimeRobot HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            custom_uptime_ratios: config.custom_uptime_ratios,
        })
    }

    /// POST getMonitors and return the monitors if `stat == "ok"`.
    pub async fn get_monitors(&self, response_times: bool, logs: bool) -> Result<Vec<Monitor>> {
        let form = [
            ("api_key", self.api_key.clone()),
            ("format", "json".to_string()),
            ("response_times", flag(response_times).to_string()),
            ("logs", flag(logs).to_string()),
            ("custom_uptime_ratios", self.custom_uptime_ratios.to_string()),
        ];

        debug!("Fetching monitors from {}", self.api_url);

        let resp = self
            .http
            .post(&self.api_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| SyncError::transport(&Method::POST, &self.api_url, e))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| SyncError::transport(&Method::POST, &self.api_url, e))?;

        if !status.is_success() {
            return Err(SyncError::Api {
                method: Method::POST.to_string(),
                url: self.api_url.clone(),
                status: status.as_u16(),
                body: text,
            });
        }

        let payload: Value = serde_json::from_str(&text)
            .map_err(|e| SyncError::decode(&self.api_url, format!("invalid JSON: {}", e)))?;

        parse_monitors(&self.api_url, payload)
    }
}

fn flag(enabled: bool) -> u8 {
    u8::from(enabled)
}

/// Interpret a getMonitors payload; anything but `stat == "ok"` is a rejection.
fn parse_monitors(url: &str, payload: Value) -> Result<Vec<Monitor>> {
    let stat = payload.get("stat").and_then(Value::as_str);
    if stat != Some("ok") {
        return Err(SyncError::ProviderRejected {
            stat: stat.unwrap_or("<missing>").to_string(),
            payload,
        });
    }

    match payload.get("monitors") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(monitors) => serde_json::from_value(monitors.clone())
            .map_err(|e| SyncError::decode(url, format!("unexpected monitor shape: {}", e))),
    }
}

#[async_trait]
impl MonitoringSource for UptimeRobotClient {
    async fn fetch_all(&self, include_response_times: bool) -> Result<Vec<Monitor>> {
        self.get_monitors(include_response_times, false).await
    }
}
