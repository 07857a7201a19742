//! WeatherAPI.com client and view controller against a mock HTTP server.

use std::{
    io,
    net::TcpListener,
    sync::Arc,
    time::Duration,
};

use parking_lot::Mutex;

use weather_core::{
    ControllerSettings, ForecastProvider, ForecastResult, NoGeolocation, ViewController,
    WeatherApiProvider, WeatherError,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const FIXTURE: &str = include_str!("fixtures/forecast.json");

fn sample_body() -> serde_json::Value {
    serde_json::from_str(FIXTURE).unwrap()
}

fn body_named(name: &str) -> serde_json::Value {
    let mut body = sample_body();
    body["location"]["name"] = name.into();
    body
}

fn provider(server: &MockServer, key: &str) -> WeatherApiProvider {
    WeatherApiProvider::new(key.to_string(), server.uri())
}

#[tokio::test]
async fn sends_expected_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("key", "TEST_KEY"))
        .and(query_param("q", "18.52,73.85"))
        .and(query_param("days", "5"))
        .and(query_param("aqi", "no"))
        .and(query_param("alerts", "no"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .expect(1)
        .mount(&server)
        .await;

    provider(&server, "TEST_KEY").fetch("18.52,73.85", 5).await.unwrap();
}

#[tokio::test]
async fn success_is_structural_pass_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .mount(&server)
        .await;

    let forecast = provider(&server, "KEY").fetch("Pune", 5).await.unwrap();

    let expected: ForecastResult = serde_json::from_str(FIXTURE).unwrap();
    assert_eq!(forecast, expected);
    assert_eq!(serde_json::to_value(&forecast).unwrap(), sample_body());
}

#[tokio::test]
async fn non_success_status_is_not_found() {
    for status in [400, 401, 403, 500] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast.json"))
            .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({
                "error": { "code": 1006, "message": "No matching location found." }
            })))
            .mount(&server)
            .await;

        let err = provider(&server, "KEY").fetch("Atlantis", 5).await.unwrap_err();
        match err {
            WeatherError::NotFound { query, status: got } => {
                assert_eq!(query, "Atlantis");
                assert_eq!(got, status);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}

/// Collects formatted log output for assertions.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn rejected_request_logs_status_and_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let err = provider(&server, "KEY").fetch("Atlantis", 5).await.unwrap_err();
    assert!(matches!(err, WeatherError::NotFound { status: 404, .. }));

    let out = logs.contents();
    assert!(out.contains("WARN"), "{out}");
    assert!(out.contains("status=404"), "{out}");
    assert!(out.contains("Not Found"), "{out}");
    assert!(out.contains("forecast request rejected"), "{out}");
}

#[tokio::test]
async fn empty_key_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .expect(0)
        .mount(&server)
        .await;

    let ctl = ViewController::new(Box::new(provider(&server, "")), ControllerSettings::default());
    let err = ctl.search("Pune").await.unwrap_err();

    assert!(matches!(err, WeatherError::Configuration));
    assert!(!err.is_recoverable());
    assert!(ctl.error().unwrap().contains("Missing API key"));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    // Bind then release a port so nothing is listening on it.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = WeatherApiProvider::new("KEY".into(), uri);
    let err = client.fetch("Pune", 5).await.unwrap_err();
    assert!(matches!(err, WeatherError::Transport(_)));
}

#[tokio::test]
async fn malformed_body_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = provider(&server, "KEY").fetch("Pune", 5).await.unwrap_err();
    assert!(matches!(err, WeatherError::Transport(_)));
}

#[tokio::test]
async fn initial_resolution_without_geolocation_queries_default_city() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("q", "Pune"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
        .expect(1)
        .mount(&server)
        .await;

    let ctl = ViewController::new(Box::new(provider(&server, "KEY")), ControllerSettings::default());
    ctl.resolve_initial(&NoGeolocation).await.unwrap();
    assert_eq!(ctl.current().unwrap().location_name, "Pune");
}

#[tokio::test]
async fn failed_search_leaves_previous_forecast_visible() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("q", "Oslo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body_named("Oslo")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("q", "Atlantis"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let ctl = ViewController::new(Box::new(provider(&server, "KEY")), ControllerSettings::default());
    ctl.search("Oslo").await.unwrap();
    ctl.search("Atlantis").await.unwrap_err();

    let state = ctl.state();
    assert_eq!(state.forecast.unwrap().location.name, "Oslo");
    assert!(state.error.unwrap().contains("Atlantis"));
}

#[tokio::test]
async fn overlapping_searches_resolve_last_response_wins() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("q", "Slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(body_named("Slow"))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("q", "Fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body_named("Fast")))
        .mount(&server)
        .await;

    let ctl = ViewController::new(Box::new(provider(&server, "KEY")), ControllerSettings::default());

    // "Slow" is issued first but its response lands last.
    let (slow, fast) = tokio::join!(ctl.search("Slow"), ctl.search("Fast"));
    slow.unwrap();
    fast.unwrap();

    assert_eq!(ctl.current().unwrap().location_name, "Slow");
}
