//! Weather lookup for UK locations.
//!
//! Lookups follow one protocol: the city name is resolved to coordinates with
//! Nominatim (restricted to Great Britain), then the Met Office DataHub point
//! forecast is queried for those coordinates and the first forecast period is
//! turned into a [`WeatherReport`](crate::types::WeatherReport).
//!
//! - [`codes`] - provider weather codes to descriptions
//! - [`intent`] - detects weather questions in chat messages
//! - [`geocode`] - city name to coordinates
//! - [`metoffice`] - point forecast client

pub mod codes;
pub mod geocode;
pub mod intent;
pub mod metoffice;

pub use geocode::{Coordinates, NominatimGeocoder};
pub use intent::{WeatherIntent, extract_weather_intent};
pub use metoffice::MetOfficeClient;

use crate::types::{Result, WeatherReport};
use async_trait::async_trait;

/// Source of current conditions for a city.
///
/// Implementations make a single attempt per upstream call and surface the
/// first failure.
#[async_trait]
pub trait ForecastClient: Send + Sync {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport>;
}
