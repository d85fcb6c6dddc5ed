//! TOML-based configuration for the relay
//!
//! Settings come from a TOML file (`metchat.toml` by default). Every section
//! is optional, and a missing file means "use the defaults". Secrets are never
//! written in the file: it names the environment variables that hold them.
//!
//! A few deployment settings can be overridden from the environment:
//! `PORT` and `ALLOWED_ORIGINS` (comma separated).

use crate::llm::openai::{DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::llm::prompt::DEFAULT_SYSTEM_PROMPT;
use crate::memory::{DEFAULT_HISTORY_LIMIT, DEFAULT_MAX_SESSIONS, MAX_HISTORY_LIMIT};
use crate::weather::geocode::NOMINATIM_URL;
use crate::weather::metoffice::METOFFICE_POINT_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure loaded from metchat.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub conversation: ConversationConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Origins allowed to call the API from a browser. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            cors_origins: Vec::new(),
        }
    }
}

// ============= Completion Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Environment variable containing the completion API key
    #[serde(default = "default_llm_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Replaces the built-in system prompt
    pub system_prompt: Option<String>,
}

fn default_llm_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_llm_key_env(),
            api_base: default_api_base(),
            model: default_model(),
            system_prompt: None,
        }
    }
}

impl LlmConfig {
    pub fn system_prompt(&self) -> &str {
        self.system_prompt.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }
}

// ============= Weather Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Environment variable containing the Met Office DataHub key
    #[serde(default = "default_weather_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    #[serde(default = "default_geocode_url")]
    pub geocode_url: String,

    /// Sent with every upstream request; Nominatim requires one.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_weather_key_env() -> String {
    "METOFFICE_HUB_KEY".to_string()
}

fn default_forecast_url() -> String {
    METOFFICE_POINT_URL.to_string()
}

fn default_geocode_url() -> String {
    NOMINATIM_URL.to_string()
}

fn default_user_agent() -> String {
    format!("WeatherBot/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_weather_key_env(),
            forecast_url: default_forecast_url(),
            geocode_url: default_geocode_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ============= Conversation Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Turns kept per session
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Live sessions kept before the least recently used is dropped
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_max_sessions() -> usize {
    DEFAULT_MAX_SESSIONS
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            max_sessions: default_max_sessions(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Configuration warnings that don't prevent operation but may indicate issues
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub kind: ConfigWarningKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarningKind {
    MissingWeatherKey,
    PermissiveCors,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),

    #[error("Invalid value '{1}' for environment variable '{0}'")]
    InvalidEnvVar(String, String),
}

impl From<ConfigError> for crate::types::AppError {
    fn from(err: ConfigError) -> Self {
        crate::types::AppError::Internal(err.to_string())
    }
}

impl RelayConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config: RelayConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise start from the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::FileNotFound(path)) => {
                tracing::debug!("No config file at {:?}, using defaults", path);
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Apply `PORT` and `ALLOWED_ORIGINS` from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable source
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnvVar("PORT".to_string(), port.clone()))?;
        }

        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }

        Ok(())
    }

    /// Validate the configuration for internal consistency and env var availability
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be non-zero".to_string(),
            ));
        }

        if self.conversation.history_limit == 0 {
            return Err(ConfigError::ValidationError(
                "conversation.history_limit must be at least 1".to_string(),
            ));
        }

        if self.conversation.history_limit > MAX_HISTORY_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "conversation.history_limit must be at most {}",
                MAX_HISTORY_LIMIT
            )));
        }

        if self.conversation.max_sessions == 0 {
            return Err(ConfigError::ValidationError(
                "conversation.max_sessions must be at least 1".to_string(),
            ));
        }

        for (name, url) in [
            ("llm.api_base", &self.llm.api_base),
            ("weather.forecast_url", &self.weather.forecast_url),
            ("weather.geocode_url", &self.weather.geocode_url),
        ] {
            if url.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{} must not be empty",
                    name
                )));
            }
        }

        self.validate_env_var(&self.llm.api_key_env)?;

        Ok(())
    }

    /// Validate configuration and report non-fatal issues
    pub fn validate_with_warnings(&self) -> Result<Vec<ConfigWarning>, ConfigError> {
        self.validate()?;

        let mut warnings = Vec::new();

        if self.weather_api_key().is_none() {
            warnings.push(ConfigWarning {
                kind: ConfigWarningKind::MissingWeatherKey,
                message: format!(
                    "Environment variable '{}' is not set; weather lookups will fail",
                    self.weather.api_key_env
                ),
            });
        }

        if self.server.cors_origins.is_empty() {
            warnings.push(ConfigWarning {
                kind: ConfigWarningKind::PermissiveCors,
                message: "No CORS origins configured; any origin may call the API".to_string(),
            });
        }

        Ok(warnings)
    }

    fn validate_env_var(&self, name: &str) -> Result<(), ConfigError> {
        self.resolve_env(name)
            .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))?;
        Ok(())
    }

    /// Get a resolved value from an env var reference. Empty values count as unset.
    pub fn resolve_env(&self, env_name: &str) -> Option<String> {
        std::env::var(env_name).ok().filter(|v| !v.trim().is_empty())
    }

    /// Get the completion API key from the environment
    pub fn llm_api_key(&self) -> Result<String, ConfigError> {
        self.resolve_env(&self.llm.api_key_env)
            .ok_or_else(|| ConfigError::MissingEnvVar(self.llm.api_key_env.clone()))
    }

    /// Get the Met Office key, if set
    pub fn weather_api_key(&self) -> Option<String> {
        self.resolve_env(&self.weather.api_key_env)
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
