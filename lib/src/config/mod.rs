// lib/src/config/mod.rs

//! Layered configuration: built-in defaults, then an optional config file,
//! then `LIFEFLOW__SECTION__KEY` environment variables.

pub mod config_defaults;
pub mod config_structs;

use std::path::{Path, PathBuf};

use config::{Config, Environment, File as ConfigFile};
use tracing::{debug, info};

pub use config_defaults::*;
pub use config_structs::{AppConfig, FeatureFlags, ServerConfig, SubmissionConfig};

use crate::errors::{LifeFlowError, Result};

/// Loads configuration. An explicit `config_path` must exist; without one,
/// `lifeflow.{yaml,toml,json}` in the working directory is used when present.
pub fn load_app_config(config_path: Option<&Path>) -> Result<AppConfig> {
    // A missing .env file is the normal case.
    if dotenv::dotenv().is_ok() {
        debug!("Loaded environment overrides from .env");
    }

    let mut builder = Config::builder()
        .set_default("server.host", DEFAULT_REST_API_HOST)?
        .set_default("server.port", i64::from(DEFAULT_REST_API_PORT))?
        .set_default("submission.delay_ms", DEFAULT_SUBMISSION_DELAY_MS as i64)?
        .set_default("features.auxiliary_routes", false)?;

    match config_path {
        Some(path) => {
            if !path.exists() {
                return Err(LifeFlowError::ConfigurationError(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            info!("Loading configuration from {}", path.display());
            builder = builder.add_source(ConfigFile::from(PathBuf::from(path)));
        }
        None => {
            builder = builder.add_source(ConfigFile::with_name(DEFAULT_CONFIG_FILE_STEM).required(false));
        }
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;
    debug!(?app_config, "Resolved configuration");
    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn should_use_defaults_for_empty_structs() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8082);
        assert_eq!(config.submission.delay_ms, 1000);
        assert!(!config.features.auxiliary_routes);
    }

    #[test]
    fn should_load_values_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "server:\n  port: 9090\nsubmission:\n  delay_ms: 250\nfeatures:\n  auxiliary_routes: true"
        )
        .unwrap();

        let config = load_app_config(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.submission.delay().as_millis(), 250);
        assert!(config.features.auxiliary_routes);
    }

    #[test]
    fn should_reject_missing_explicit_file() {
        let err = load_app_config(Some(Path::new("/nonexistent/lifeflow.yaml"))).unwrap_err();
        assert!(matches!(err, LifeFlowError::ConfigurationError(_)));
    }
}
