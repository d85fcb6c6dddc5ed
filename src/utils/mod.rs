//! Configuration utilities.

/// TOML configuration file and environment overrides.
pub mod toml_config;
