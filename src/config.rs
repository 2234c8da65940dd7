use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::api::ParticipantRole;

/// Environment variable prefix, e.g. `LIEDETECT_API__BASE_URL`
const ENV_PREFIX: &str = "LIEDETECT";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub api: ApiConfig,
    pub session: SessionDefaults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the analysis service, without trailing slash
    pub base_url: String,
    /// Per-request timeout applied by the HTTP client
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionDefaults {
    pub default_role: ParticipantRole,
}

impl Config {
    /// Load configuration from built-in defaults, an optional file at `path`
    /// and `LIEDETECT_*` environment overrides, in that order.
    pub fn load(path: &str) -> Result<Self> {
        Self::load_with_env(path, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
    }

    fn load_with_env(path: &str, env: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "liedetect-client")?
            .set_default("service.http.bind", "127.0.0.1")?
            .set_default("service.http.port", 8088_i64)?
            .set_default("api.base_url", "http://127.0.0.1:5000")?
            .set_default("api.timeout_secs", 120_i64)?
            .set_default("session.default_role", "answerer")?
            .add_source(config::File::with_name(path).required(false))
            .add_source(env)
            .build()
            .with_context(|| format!("Failed to build configuration from {}", path))?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }
}
