// lib/src/config/config_defaults.rs

pub const DEFAULT_REST_API_HOST: &str = "127.0.0.1";
pub const DEFAULT_REST_API_PORT: u16 = 8082;
/// Stand-in for a network round trip on every form submission.
pub const DEFAULT_SUBMISSION_DELAY_MS: u64 = 1000;
pub const DEFAULT_CONFIG_FILE_STEM: &str = "lifeflow";
pub const ENV_PREFIX: &str = "LIFEFLOW";

pub fn default_host() -> String {
    DEFAULT_REST_API_HOST.to_string()
}

pub fn default_port() -> u16 {
    DEFAULT_REST_API_PORT
}

pub fn default_submission_delay_ms() -> u64 {
    DEFAULT_SUBMISSION_DELAY_MS
}

pub fn default_auxiliary_routes() -> bool {
    false
}
