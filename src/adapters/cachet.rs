//! Cachet v1 REST client (components and metric points)

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, Method};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::domain::{latest_point, parse_created_at, ComponentStatus, MetricPoint};
use crate::error::{Result, SyncError};
use crate::sync::StatusSink;

const USER_AGENT: &str = "uptime-cachet/0.1";
const CACHET_TIME_ZONE: &str = "Etc/UTC";

/// One page of `GET /metrics/{id}/points`
#[derive(Debug, Clone)]
pub struct PointsPage {
    pub points: Vec<MetricPoint>,
    pub total_pages: u64,
}

/// Client for a single Cachet instance
#[derive(Clone)]
pub struct CachetClient {
    http: Client,
    base_url: String,
}

impl CachetClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-cachet-token"),
            HeaderValue::from_str(api_key).map_err(|e| {
                SyncError::InvalidConfig(format!("invalid Cachet API key header: {}", e))
            })?,
        );
        headers.insert(
            HeaderName::from_static("time-zone"),
            HeaderValue::from_static(CACHET_TIME_ZONE),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                SyncError::InvalidConfig(format!("failed to build Cachet HTTP client: {}", e))
            })?;

        Ok(Self { http, base_url })
    }

    async fn request_json(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method.clone(), &url);

        if let Some(body) = body {
            req = req.json(&body);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| SyncError::transport(&method, &url, e))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| SyncError::transport(&method, &url, e))?;

        if !status.is_success() {
            return Err(SyncError::Api {
                method: method.to_string(),
                url,
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text)
            .map_err(|e| SyncError::decode(&url, format!("invalid JSON: {}", e)))
    }

    /// Fetch one page of points; `None` requests the default (first) page.
    pub async fn get_points_page(&self, metric_id: u64, page: Option<u64>) -> Result<PointsPage> {
        let path = match page {
            Some(page) => format!("/api/v1/metrics/{}/points?page={}", metric_id, page),
            None => format!("/api/v1/metrics/{}/points", metric_id),
        };
        let payload = self.request_json(Method::GET, &path, None).await?;
        parse_points_page(&format!("{}{}", self.base_url, path), &payload)
    }
}

/// Cachet sends numbers either raw or as strings depending on version.
fn numberish(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_component_status(url: &str, payload: &Value) -> Result<ComponentStatus> {
    let status = payload
        .get("data")
        .and_then(|d| d.get("status"))
        .ok_or_else(|| SyncError::decode(url, "missing data.status"))?;

    match status {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| SyncError::InvalidStatus(n.to_string()))
            .and_then(ComponentStatus::try_from),
        Value::String(s) => s.parse(),
        other => Err(SyncError::InvalidStatus(other.to_string())),
    }
}

fn parse_points_page(url: &str, payload: &Value) -> Result<PointsPage> {
    let total_pages = payload
        .pointer("/meta/pagination/total_pages")
        .and_then(numberish)
        .ok_or_else(|| SyncError::decode(url, "missing meta.pagination.total_pages"))?
        as u64;

    let points = match payload.get("data") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| parse_point(url, item))
            .collect::<Result<Vec<_>>>()?,
        Some(_) => return Err(SyncError::decode(url, "data is not an array")),
    };

    Ok(PointsPage {
        points,
        total_pages,
    })
}

fn parse_point(url: &str, item: &Value) -> Result<MetricPoint> {
    let value = item
        .get("value")
        .and_then(numberish)
        .ok_or_else(|| SyncError::decode(url, format!("point without numeric value: {}", item)))?;
    let created_at = item
        .get("created_at")
        .and_then(Value::as_str)
        .and_then(parse_created_at)
        .ok_or_else(|| SyncError::decode(url, format!("point with bad created_at: {}", item)))?;

    Ok(MetricPoint { value, created_at })
}

#[async_trait]
impl StatusSink for CachetClient {
    async fn current_status(&self, component_id: u64) -> Result<ComponentStatus> {
        let path = format!("/api/v1/components/{}", component_id);
        let payload = self.request_json(Method::GET, &path, None).await?;
        parse_component_status(&format!("{}{}", self.base_url, path), &payload)
    }

    async fn set_status(&self, component_id: u64, target: ComponentStatus) -> Result<()> {
        let path = format!("/api/v1/components/{}", component_id);
        self.request_json(Method::PUT, &path, Some(json!({ "status": target })))
            .await?;
        Ok(())
    }

    async fn latest_metric_point(&self, metric_id: u64) -> Result<MetricPoint> {
        let first = self.get_points_page(metric_id, None).await?;

        // Newest points sit on the last page.
        let last = if first.total_pages > 1 {
            self.get_points_page(metric_id, Some(first.total_pages)).await?
        } else {
            first
        };
        debug!(
            "Metric {} has {} page(s), {} point(s) on the last one",
            metric_id,
            last.total_pages,
            last.points.len()
        );

        Ok(latest_point(last.points).unwrap_or_else(|| MetricPoint::start_of_day(Utc::now())))
    }

    async fn append_metric_point(&self, metric_id: u64, value: f64, timestamp: i64) -> Result<()> {
        let path = format!("/api/v1/metrics/{}/points", metric_id);
        let body = json!({ "value": value, "timestamp": timestamp });
        let created = self.request_json(Method::POST, &path, Some(body)).await?;
        debug!("Metric point created: {}", created);
        Ok(())
    }
}
