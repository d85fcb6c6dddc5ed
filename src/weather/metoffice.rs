use crate::types::{AppError, Result, WeatherReport};
use crate::utils::toml_config::WeatherConfig;
use crate::weather::codes;
use crate::weather::geocode::{Coordinates, NominatimGeocoder};
use crate::weather::ForecastClient;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub const METOFFICE_POINT_URL: &str =
    "https://api-metoffice.apiconnect.ibmcloud.com/metoffice/production/v0/forecasts/point";

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Met Office DataHub point forecasts, located through Nominatim.
#[derive(Debug, Clone)]
pub struct MetOfficeClient {
    client: Client,
    geocoder: NominatimGeocoder,
    forecast_url: String,
    api_key: Option<String>,
}

impl MetOfficeClient {
    pub fn new(
        client: Client,
        geocoder: NominatimGeocoder,
        forecast_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            geocoder,
            forecast_url: forecast_url.into(),
            api_key,
        }
    }

    /// Build a client from the `[weather]` config section. The key is passed
    /// separately because it comes from the environment.
    pub fn from_config(config: &WeatherConfig, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        let geocoder = NominatimGeocoder::new(client.clone(), config.geocode_url.clone());

        Ok(Self::new(
            client,
            geocoder,
            config.forecast_url.clone(),
            api_key.filter(|k| !k.is_empty()),
        ))
    }

    async fn lookup(&self, api_key: &str, city: &str) -> Result<WeatherReport> {
        let coords = self.geocoder.resolve(city).await?;
        self.fetch_point_forecast(api_key, city, coords).await
    }

    async fn fetch_point_forecast(
        &self,
        api_key: &str,
        city: &str,
        coords: Coordinates,
    ) -> Result<WeatherReport> {
        let response = self
            .client
            .get(&self.forecast_url)
            .header(SUBSCRIPTION_KEY_HEADER, api_key)
            .query(&[("lat", coords.latitude), ("lon", coords.longitude)])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Error: {}", e)))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED => {
                return Err(AppError::Unauthorized(
                    "Invalid Met Office API key".to_string(),
                ));
            }
            StatusCode::NOT_FOUND => {
                return Err(AppError::NotFound(format!(
                    "Forecast not available for '{}'",
                    city
                )));
            }
            status => {
                return Err(AppError::Upstream(format!(
                    "API error: {}",
                    status.as_u16()
                )));
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Upstream(format!("Error: {}", e)))?;

        parse_point_forecast(city, &body)
    }
}

#[async_trait]
impl ForecastClient for MetOfficeClient {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Unauthorized("Met Office API key is missing".to_string()))?;

        let report = self.lookup(api_key, city).await;

        match &report {
            Ok(r) => tracing::info!(city = %city, weather = %r.description, "Weather lookup succeeded"),
            Err(e) => tracing::warn!(city = %city, error = %e, "Weather lookup failed"),
        }
        report
    }
}

// ============= Point forecast response =============

#[derive(Debug, Default, Deserialize)]
struct PointForecastResponse {
    #[serde(rename = "featureCollection", default)]
    feature_collection: FeatureCollection,
}

#[derive(Debug, Default, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Default, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: FeatureProperties,
}

#[derive(Debug, Default, Deserialize)]
struct FeatureProperties {
    #[serde(rename = "timeSeries", default)]
    time_series: Vec<TimeSeriesEntry>,
}

#[derive(Debug, Deserialize)]
struct TimeSeriesEntry {
    #[serde(default)]
    forecast: Option<Forecast>,
    #[serde(rename = "forecastPeriod", default)]
    forecast_period: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Forecast {
    #[serde(rename = "weatherType", default)]
    weather_type: Option<Value>,
    #[serde(default)]
    temperature: Option<Measurement>,
    #[serde(rename = "precipitationProbability", default)]
    precipitation_probability: Option<Measurement>,
}

#[derive(Debug, Deserialize)]
struct Measurement {
    #[serde(default)]
    value: Option<f64>,
}

/// Turn a point forecast body into a report for the first forecast period.
fn parse_point_forecast(city: &str, body: &str) -> Result<WeatherReport> {
    let parsed: PointForecastResponse = serde_json::from_str(body)
        .map_err(|e| AppError::Parse(format!("Invalid forecast response: {}", e)))?;

    let feature = parsed
        .feature_collection
        .features
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Parse("No forecast data available".to_string()))?;

    let entry = feature
        .properties
        .time_series
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Parse("No time series data".to_string()))?;

    let forecast = entry
        .forecast
        .ok_or_else(|| AppError::Parse("Forecast block missing from time series".to_string()))?;

    let weather_type = forecast
        .weather_type
        .ok_or_else(|| AppError::Parse("Forecast is missing weatherType".to_string()))?;

    let temperature_celsius = forecast
        .temperature
        .and_then(|t| t.value)
        .ok_or_else(|| AppError::Parse("Forecast is missing temperature".to_string()))?;

    let precipitation_probability = forecast
        .precipitation_probability
        .and_then(|p| p.value)
        .unwrap_or(0.0);

    let period_label = match entry.forecast_period {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    Ok(WeatherReport {
        city: city.to_string(),
        description: codes::describe_value(&weather_type).to_string(),
        temperature_celsius,
        precipitation_probability,
        period_label,
    })
}
