//! Forward geocoding: UK place name to coordinates.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use crate::types::{AppError, Result};
use reqwest::Client;
use serde::Deserialize;

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

/// Resolves city names within Great Britain.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

impl NominatimGeocoder {
    /// `client` should carry a descriptive User-Agent; Nominatim rejects anonymous clients.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Every failure, including transport errors, is reported as `NotFound`.
    pub async fn resolve(&self, city: &str) -> Result<Coordinates> {
        let not_found = || AppError::NotFound(format!("Could not find '{}' in the UK", city));
        let query = format!("{},UK", city);

        let response = match self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query.as_str()),
                ("format", "json"),
                ("limit", "1"),
                ("countrycodes", "gb"),
            ])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Geocode request failed: {}", e);
                return Err(not_found());
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Geocode returned status {}", response.status());
            return Err(not_found());
        }

        let places: Vec<NominatimPlace> = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!("Geocode parse error: {}", e);
                return Err(not_found());
            }
        };

        let place = places.into_iter().next().ok_or_else(not_found)?;
        let latitude = place.lat.parse::<f64>().map_err(|_| not_found())?;
        let longitude = place.lon.parse::<f64>().map_err(|_| not_found())?;

        tracing::debug!("Geocoded '{}' to ({}, {})", city, latitude, longitude);
        Ok(Coordinates {
            latitude,
            longitude,
        })
    }
}
