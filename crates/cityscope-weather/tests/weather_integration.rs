//! Integration tests for the weather provider against a mock API.

use cityscope_weather::{UnitSystem, WeatherProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CURRENT_PATH: &str = "/data/2.5/weather";
const FORECAST_PATH: &str = "/data/2.5/forecast";
const API_KEY: &str = "test-key";

fn current_body(temp: f64) -> serde_json::Value {
    serde_json::json!({
        "main": { "temp": temp, "humidity": 65, "pressure": 1011.0 },
        "weather": [{ "description": "scattered clouds" }],
        "wind": { "speed": 3.2 }
    })
}

fn forecast_body(slots: usize) -> serde_json::Value {
    let list: Vec<serde_json::Value> = (0..slots)
        .map(|i| {
            serde_json::json!({
                "dt": 1_700_000_000 + (i as i64) * 10_800,
                "main": { "temp_min": 5.0 + i as f64, "temp_max": 9.0 + i as f64 },
                "weather": [{ "description": "light rain" }],
                "pop": 0.2
            })
        })
        .collect();
    serde_json::json!({ "list": list })
}

fn provider(server: &MockServer) -> WeatherProvider {
    WeatherProvider::new(&server.uri(), API_KEY).unwrap()
}

#[tokio::test]
async fn test_fetch_weather_returns_both_halves() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CURRENT_PATH))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", API_KEY))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body(18.4)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(query_param("q", "Paris"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(40)))
        .mount(&server)
        .await;

    let (current, forecast) = provider(&server)
        .fetch_weather("Paris", UnitSystem::Metric)
        .await;

    let snapshot = current.unwrap();
    assert!((snapshot.temperature - 18.4).abs() < f64::EPSILON);
    assert_eq!(snapshot.description, "scattered clouds");

    let series = forecast.unwrap();
    assert_eq!(series.entries.len(), 40);
    assert_eq!(series.display_entries().len(), 5);
}

#[tokio::test]
async fn test_fetch_sends_imperial_unit_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CURRENT_PATH))
        .and(query_param("units", "imperial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body(65.1)))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = provider(&server)
        .fetch_current("Boston", UnitSystem::Imperial)
        .await
        .unwrap();
    assert!((snapshot.temperature - 65.1).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_forecast_failure_does_not_poison_current() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CURRENT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body(12.0)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (current, forecast) = provider(&server)
        .fetch_weather("Lyon", UnitSystem::Metric)
        .await;

    assert!(current.is_ok());
    assert!(forecast.is_err());
}

#[tokio::test]
async fn test_current_failure_does_not_poison_forecast() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CURRENT_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(3)))
        .mount(&server)
        .await;

    let (current, forecast) = provider(&server)
        .fetch_weather("Atlantis", UnitSystem::Metric)
        .await;

    assert!(current.is_err());
    assert_eq!(forecast.unwrap().entries.len(), 3);
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CURRENT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let result = provider(&server)
        .fetch_current("Paris", UnitSystem::Metric)
        .await;
    assert!(matches!(
        result,
        Err(cityscope_weather::WeatherError::Parse(_))
    ));
}
