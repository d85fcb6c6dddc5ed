//! Forecast client tests against mock Nominatim and Met Office servers.

use metchat::{
    AppError, ForecastClient, MetOfficeClient,
    utils::toml_config::WeatherConfig,
    weather::NominatimGeocoder,
};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::io;
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-hub-key";

fn client_for(server: &MockServer, api_key: Option<&str>) -> MetOfficeClient {
    let config = WeatherConfig {
        forecast_url: format!("{}/forecast", server.uri()),
        geocode_url: format!("{}/search", server.uri()),
        ..WeatherConfig::default()
    };
    MetOfficeClient::from_config(&config, api_key.map(str::to_string)).unwrap()
}

fn london_place() -> Value {
    json!([{ "lat": "51.5074", "lon": "-0.1278", "display_name": "London, Greater London, England" }])
}

fn point_forecast(forecast: Value) -> Value {
    json!({
        "featureCollection": {
            "features": [{
                "properties": {
                    "timeSeries": [
                        { "forecastPeriod": "2024-05-01T12:00Z", "forecast": forecast },
                        { "forecastPeriod": "2024-05-01T15:00Z", "forecast": {
                            "weatherType": 1,
                            "temperature": { "value": 18.0 },
                            "precipitationProbability": { "value": 5.0 }
                        }}
                    ]
                }
            }]
        }
    })
}

async fn mount_geocode(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_forecast(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_lookup_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "London,UK"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .and(query_param("countrycodes", "gb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_place()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(header("Ocp-Apim-Subscription-Key", API_KEY))
        .and(query_param("lat", "51.5074"))
        .and(query_param("lon", "-0.1278"))
        .respond_with(ResponseTemplate::new(200).set_body_json(point_forecast(json!({
            "weatherType": 12,
            "temperature": { "value": 12.5 },
            "precipitationProbability": { "value": 80.0 }
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let report = client_for(&server, Some(API_KEY))
        .current_weather("London")
        .await
        .unwrap();

    assert_eq!(report.city, "London");
    assert_eq!(report.description, "light rain");
    assert_eq!(report.temperature_celsius, 12.5);
    assert_eq!(report.precipitation_probability, 80.0);
    assert_eq!(report.period_label, "2024-05-01T12:00Z");
}

#[tokio::test]
async fn test_missing_key_skips_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server, None)
        .current_weather("London")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Unauthorized(_)));
    assert_eq!(err.message(), "Met Office API key is missing");
}

#[tokio::test]
async fn test_empty_key_counts_as_missing() {
    let server = MockServer::start().await;

    let err = client_for(&server, Some(""))
        .current_weather("London")
        .await
        .unwrap_err();

    assert_eq!(err.message(), "Met Office API key is missing");
}

#[tokio::test]
async fn test_unknown_city() {
    let server = MockServer::start().await;
    mount_geocode(&server, json!([])).await;

    let err = client_for(&server, Some(API_KEY))
        .current_weather("Atlantis")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.message(), "Could not find 'Atlantis' in the UK");
}

/// Collects formatted log output for assertions.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_unknown_city_is_logged_as_failure() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let server = MockServer::start().await;
    mount_geocode(&server, json!([])).await;

    let err = client_for(&server, Some(API_KEY))
        .current_weather("Atlantis")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    let output = logs.contents();
    assert!(output.contains("Weather lookup failed"));
    assert!(output.contains("Atlantis"));
}

#[tokio::test]
async fn test_geocoder_failure_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server, Some(API_KEY))
        .current_weather("Bath")
        .await
        .unwrap_err();

    assert_eq!(err.message(), "Could not find 'Bath' in the UK");
}

#[tokio::test]
async fn test_geocoder_bad_coordinates_is_not_found() {
    let server = MockServer::start().await;
    mount_geocode(&server, json!([{ "lat": "north", "lon": "west" }])).await;

    let err = client_for(&server, Some(API_KEY))
        .current_weather("Bath")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_forecast_unauthorized() {
    let server = MockServer::start().await;
    mount_geocode(&server, london_place()).await;
    mount_forecast(&server, ResponseTemplate::new(401)).await;

    let err = client_for(&server, Some("wrong-key"))
        .current_weather("London")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Unauthorized(_)));
    assert_eq!(err.message(), "Invalid Met Office API key");
}

#[tokio::test]
async fn test_forecast_not_found() {
    let server = MockServer::start().await;
    mount_geocode(&server, london_place()).await;
    mount_forecast(&server, ResponseTemplate::new(404)).await;

    let err = client_for(&server, Some(API_KEY))
        .current_weather("London")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.message(), "Forecast not available for 'London'");
}

#[tokio::test]
async fn test_forecast_server_error() {
    let server = MockServer::start().await;
    mount_geocode(&server, london_place()).await;
    mount_forecast(&server, ResponseTemplate::new(500)).await;

    let err = client_for(&server, Some(API_KEY))
        .current_weather("London")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Upstream(_)));
    assert_eq!(err.message(), "API error: 500");
}

#[tokio::test]
async fn test_forecast_without_features() {
    let server = MockServer::start().await;
    mount_geocode(&server, london_place()).await;
    mount_forecast(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "featureCollection": { "features": [] } })),
    )
    .await;

    let err = client_for(&server, Some(API_KEY))
        .current_weather("London")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Parse(_)));
    assert_eq!(err.message(), "No forecast data available");
}

#[tokio::test]
async fn test_forecast_missing_temperature() {
    let server = MockServer::start().await;
    mount_geocode(&server, london_place()).await;
    mount_forecast(
        &server,
        ResponseTemplate::new(200).set_body_json(point_forecast(json!({ "weatherType": 7 }))),
    )
    .await;

    let err = client_for(&server, Some(API_KEY))
        .current_weather("London")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Parse(_)));
}

#[tokio::test]
async fn test_forecast_without_precipitation_defaults_to_zero() {
    let server = MockServer::start().await;
    mount_geocode(&server, london_place()).await;
    mount_forecast(
        &server,
        ResponseTemplate::new(200).set_body_json(point_forecast(json!({
            "weatherType": "99",
            "temperature": { "value": 3.0 }
        }))),
    )
    .await;

    let report = client_for(&server, Some(API_KEY))
        .current_weather("London")
        .await
        .unwrap();

    assert_eq!(report.description, "unknown weather");
    assert_eq!(report.precipitation_probability, 0.0);
}

#[tokio::test]
async fn test_geocoder_used_directly() {
    let server = MockServer::start().await;
    mount_geocode(&server, london_place()).await;

    let geocoder = NominatimGeocoder::new(reqwest::Client::new(), format!("{}/search", server.uri()));
    let coords = geocoder.resolve("London").await.unwrap();

    assert_eq!(coords.latitude, 51.5074);
    assert_eq!(coords.longitude, -0.1278);
}
