// rest_api/src/config.rs

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use lib::config::{load_app_config, AppConfig};

/// Represents the configuration for the REST API server itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestApiConfig {
    pub host: String,
    pub port: u16,
    pub submission_delay: Duration,
    pub auxiliary_routes: bool,
}

impl From<AppConfig> for RestApiConfig {
    fn from(config: AppConfig) -> Self {
        RestApiConfig {
            submission_delay: config.submission.delay(),
            host: config.server.host,
            port: config.server.port,
            auxiliary_routes: config.features.auxiliary_routes,
        }
    }
}

impl RestApiConfig {
    /// Command line values win over the file and the environment.
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for RestApiConfig {
    fn default() -> Self {
        RestApiConfig::from(AppConfig::default())
    }
}

/// Loads the REST API configuration from defaults, an optional config file
/// and `LIFEFLOW__*` environment variables.
pub fn load_rest_api_config(config_path: Option<&Path>) -> Result<RestApiConfig> {
    let app_config = load_app_config(config_path).context("Failed to load LifeFlow configuration")?;
    Ok(RestApiConfig::from(app_config))
}
