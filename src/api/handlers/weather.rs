use crate::{
    AppState,
    types::{AppError, Result, WeatherRequest, WeatherResponse},
};
use axum::{Json, extract::State, extract::rejection::JsonRejection};

/// Current conditions for a UK city
///
/// Unknown cities and locations without forecast data return 400; key,
/// upstream and parse failures return 500.
pub async fn weather(
    State(state): State<AppState>,
    payload: std::result::Result<Json<WeatherRequest>, JsonRejection>,
) -> Result<Json<WeatherResponse>> {
    let Json(payload) = payload.map_err(super::invalid_body)?;

    let city = payload.city.trim();
    if city.is_empty() {
        return Err(AppError::InvalidRequest("City is required".to_string()));
    }

    let report = state.weather.current_weather(city).await?;
    Ok(Json(report.into()))
}
