use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project config directory, relative to the working directory
pub const CONFIG_DIR: &str = ".support-rag";

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "SUPPORT_RAG_";

/// Shared fallback for both API keys
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid chunking configuration: {0}")]
    InvalidChunking(String),

    #[error("Invalid top_k: {0}. Must be at least 1")]
    InvalidTopK(usize),

    #[error("Invalid similarity_threshold: {0}. Must be within [-1, 1]")]
    InvalidThreshold(f32),

    #[error("Invalid embedding dimension: {0}. Must be at least 1")]
    InvalidDimension(usize),

    #[error("Invalid temperature: {0}. Must be greater than 0 and at most 2")]
    InvalidTemperature(f32),

    #[error("Invalid max_tokens: {0}. Must be at least 1")]
    InvalidMaxTokens(u32),

    #[error("{0} model name cannot be empty")]
    EmptyModel(&'static str),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Invalid max_retries: {0}. Cannot be 0")]
    InvalidMaxRetries(u32),

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must be less than max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .support-rag/config.yaml (project config)
    /// 3. .support-rag/local.yaml (local overrides, optional)
    /// 4. Environment variables (SUPPORT_RAG_* prefix, `__` nests)
    pub fn load() -> Result<Config> {
        let config_dir = Path::new(CONFIG_DIR);
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(config_dir.join("config.yaml")))
            .merge(Yaml::file(config_dir.join("local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::finish(figment)
    }

    /// Load defaults, then the given file, then environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::finish(figment).with_context(|| format!("Failed to load config from {}", path.display()))
    }

    fn finish(figment: Figment) -> Result<Config> {
        let mut config: Config = figment
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::resolve_api_keys(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Fill unset API keys from `OPENAI_API_KEY`
    fn resolve_api_keys(config: &mut Config) {
        let fallback = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());

        if config.embedding.api_key.is_none() {
            config.embedding.api_key.clone_from(&fallback);
        }
        if config.generation.api_key.is_none() {
            config.generation.api_key = fallback;
        }
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        config
            .chunking
            .validate()
            .map_err(ConfigError::InvalidChunking)?;

        // Validate retrieval defaults
        if config.retrieval.top_k == 0 {
            return Err(ConfigError::InvalidTopK(config.retrieval.top_k));
        }

        let threshold = config.retrieval.similarity_threshold;
        if !(-1.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidThreshold(threshold));
        }

        // Validate external models
        if config.embedding.dimension == 0 {
            return Err(ConfigError::InvalidDimension(config.embedding.dimension));
        }

        if config.embedding.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel("Embedding"));
        }

        if config.generation.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel("Generation"));
        }

        let temperature = config.generation.temperature;
        if !(temperature > 0.0 && temperature <= 2.0) {
            return Err(ConfigError::InvalidTemperature(temperature));
        }

        if config.generation.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens(config.generation.max_tokens));
        }

        // Validate logging config
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        // Validate retry config
        if config.retry.max_retries == 0 {
            return Err(ConfigError::InvalidMaxRetries(config.retry.max_retries));
        }

        if config.retry.initial_backoff_ms >= config.retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ));
        }

        Ok(())
    }
}
