use serde_json::json;
use std::time::Duration;
use uptime_cachet::{MonitorStatus, MonitoringSource, ProviderConfig, SyncError, UptimeRobotClient};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(api_url: String) -> UptimeRobotClient {
    let config = ProviderConfig {
        api_key: "u123-abc".to_string(),
        api_url,
        custom_uptime_ratios: 30,
    };
    UptimeRobotClient::new(&config, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn posts_form_and_returns_monitors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/getMonitors"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(header("Cache-Control", "no-cache"))
        .and(body_string_contains("api_key=u123-abc"))
        .and(body_string_contains("format=json"))
        .and(body_string_contains("response_times=1"))
        .and(body_string_contains("logs=0"))
        .and(body_string_contains("custom_uptime_ratios=30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stat": "ok",
            "monitors": [
                {
                    "id": 1,
                    "friendly_name": "Example",
                    "url": "http://example.com",
                    "status": 9,
                    "response_times": [{"datetime": 100, "value": 5}, {"datetime": 200, "value": 7}]
                },
                {"id": 2, "friendly_name": "Paused", "url": "http://paused.example.com", "status": 0}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let monitors = client(format!("{}/v2/getMonitors", server.uri()))
        .fetch_all(true)
        .await
        .unwrap();

    assert_eq!(monitors.len(), 2);
    assert_eq!(monitors[0].status, MonitorStatus::Down);
    assert_eq!(monitors[0].response_times.len(), 2);
    assert_eq!(monitors[1].status, MonitorStatus::Paused);
    assert!(monitors[1].response_times.is_empty());
}

#[tokio::test]
async fn stat_fail_is_a_logical_rejection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stat": "fail",
            "error": {"type": "invalid_parameter", "parameter_name": "api_key"}
        })))
        .mount(&server)
        .await;

    let err = client(format!("{}/v2/getMonitors", server.uri()))
        .fetch_all(true)
        .await
        .unwrap_err();

    assert!(!err.is_transport());
    match err {
        SyncError::ProviderRejected { stat, payload } => {
            assert_eq!(stat, "fail");
            assert_eq!(payload["error"]["parameter_name"], "api_key");
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn http_error_is_a_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client(format!("{}/v2/getMonitors", server.uri()))
        .fetch_all(true)
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(err, SyncError::Api { status: 503, .. }));
}

#[tokio::test]
async fn unreachable_provider_is_a_transport_failure() {
    // Grab a free port and release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/v2/getMonitors", listener.local_addr().unwrap());
    drop(listener);

    let err = client(url).fetch_all(true).await.unwrap_err();
    assert!(matches!(err, SyncError::Transport { .. }));
}
