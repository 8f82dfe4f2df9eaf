// ABOUTME: Environment-based engine configuration
// ABOUTME: Typed settings for the generation client and planner timing with env overrides
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Environment-based configuration for the engine
//!
//! Every field has a sensible default so the engine works out of the box;
//! deployments override through `REPFORGE_*` environment variables.

use crate::constants::{generation, planner};
use crate::errors::AppResult;
use std::env;
use std::time::Duration;
use tracing::warn;

/// Configuration for the external generation service client
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Base URL of the Gemini-style API
    pub endpoint: String,
    /// API key; when absent the client fails fast and callers fall back
    pub api_key: Option<String>,
    /// Model identifier appended to the endpoint path
    pub model: String,
    /// Bounded wait for a generation request
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: generation::DEFAULT_ENDPOINT.to_owned(),
            api_key: None,
            model: generation::DEFAULT_MODEL.to_owned(),
            timeout: Duration::from_secs(generation::DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Generation service settings
    pub generation: GenerationConfig,
    /// Delay before the post-week reminder event fires
    pub reminder_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            reminder_delay: Duration::from_secs(planner::NEXT_WEEK_REMINDER_SECS),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// Recognized variables:
    /// - `REPFORGE_GENERATION_ENDPOINT`
    /// - `REPFORGE_GENERATION_API_KEY`
    /// - `REPFORGE_GENERATION_MODEL`
    /// - `REPFORGE_GENERATION_TIMEOUT_SECS`
    /// - `REPFORGE_REMINDER_DELAY_SECS`
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::ErrorCode::ConfigError`] when a numeric
    /// variable is present but unparsable.
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let endpoint = env_or(
            "REPFORGE_GENERATION_ENDPOINT",
            &defaults.generation.endpoint,
        );
        let api_key = env::var("REPFORGE_GENERATION_API_KEY").ok();
        let model = env_or("REPFORGE_GENERATION_MODEL", &defaults.generation.model);
        let timeout = duration_env_or(
            "REPFORGE_GENERATION_TIMEOUT_SECS",
            defaults.generation.timeout,
        )?;
        let reminder_delay =
            duration_env_or("REPFORGE_REMINDER_DELAY_SECS", defaults.reminder_delay)?;

        if api_key.is_none() {
            warn!("REPFORGE_GENERATION_API_KEY unset; workout generation will use the rule-based catalog");
        }

        Ok(Self {
            generation: GenerationConfig {
                endpoint,
                api_key,
                model,
                timeout,
            },
            reminder_delay,
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_owned())
}

fn duration_env_or(name: &str, default: Duration) -> AppResult<Duration> {
    match env::var(name) {
        Ok(raw) => raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
            crate::errors::AppError::config(format!("{name} must be an integer: {e}"))
        }),
        Err(_) => Ok(default),
    }
}
