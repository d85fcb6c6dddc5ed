//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer, built on the Axum web framework.
//!
//! # API Endpoints
//!
//! - `GET /` - Status message
//! - `POST /chat` - `{message, session_id?}` to `{response, session_id?}`
//! - `POST /weather` - `{city}` to `{weather, temperature, precipitation, timestamp}`
//!
//! Every failure is returned as `{"error": "..."}` with status 400 (bad input,
//! unknown city) or 500 (anything upstream).

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
