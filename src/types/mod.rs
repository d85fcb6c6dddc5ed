use serde::{Deserialize, Serialize};

// ============= API Request/Response Types =============

/// Body of `POST /chat`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    /// Conversation key; requests without one share the default conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Body of `POST /weather`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WeatherRequest {
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub weather: String,
    pub temperature: f64,
    pub precipitation: f64,
    pub timestamp: String,
}

impl From<WeatherReport> for WeatherResponse {
    fn from(report: WeatherReport) -> Self {
        Self {
            weather: report.description,
            temperature: report.temperature_celsius,
            precipitation: report.precipitation_probability,
            timestamp: report.period_label,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
}

// ============= Conversation Types =============

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

// ============= Weather Types =============

/// Current conditions for a city, built fresh from the forecast provider on every lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub description: String,
    pub temperature_celsius: f64,
    /// Chance of precipitation in percent.
    pub precipitation_probability: f64,
    /// Provider label for the forecast period (usually a timestamp).
    pub period_label: String,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The user-facing text, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            AppError::InvalidRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::Upstream(msg)
            | AppError::Parse(msg)
            | AppError::Internal(msg) => msg,
        }
    }

    pub fn status_code(&self) -> axum::http::StatusCode {
        match self {
            AppError::InvalidRequest(_) | AppError::NotFound(_) => {
                axum::http::StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_)
            | AppError::Upstream(_)
            | AppError::Parse(_)
            | AppError::Internal(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": self.message()
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
