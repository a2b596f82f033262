// lib/src/config/config_structs.rs

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::config_defaults::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    #[serde(default = "default_submission_delay_ms")]
    pub delay_ms: u64,
}

impl SubmissionConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        SubmissionConfig {
            delay_ms: default_submission_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Mounts the auxiliary route table next to the API routes.
    #[serde(default = "default_auxiliary_routes")]
    pub auxiliary_routes: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        FeatureFlags {
            auxiliary_routes: default_auxiliary_routes(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub features: FeatureFlags,
}
