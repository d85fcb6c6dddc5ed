use crate::AppState;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(crate::api::handlers::status::status))
        .route("/chat", post(crate::api::handlers::chat::chat))
        .route("/weather", post(crate::api::handlers::weather::weather))
}

/// Routes plus CORS and request tracing, bound to `state`.
pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    create_router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// An empty origin list allows any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
