//! Request form configuration
//! Limits applied while reading request bodies ahead of validation

use std::env;
use thiserror::Error;
use tracing::info;

/// Default request body limit (1 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
const MIN_MAX_BODY_BYTES: usize = 1024;
const MAX_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Form extraction configuration
///
/// Insert it into request extensions (e.g. with `axum::Extension`) to
/// override the defaults used by `ValidatedForm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormConfig {
    pub max_body_bytes: usize,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl FormConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var("FORM_MAX_BODY_BYTES").ok();
        let config = Self::from_raw(raw.as_deref())?;

        info!(
            max_body_bytes = config.max_body_bytes,
            "Form configuration loaded"
        );

        Ok(config)
    }

    fn from_raw(max_body_bytes: Option<&str>) -> Result<Self, ConfigError> {
        let max_body_bytes = match max_body_bytes {
            None => DEFAULT_MAX_BODY_BYTES,
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                ConfigError::InvalidConfig(format!("Invalid body limit: {} ({})", raw, e))
            })?,
        };

        if !(MIN_MAX_BODY_BYTES..=MAX_MAX_BODY_BYTES).contains(&max_body_bytes) {
            return Err(ConfigError::InvalidConfig(format!(
                "Body limit must be between {} and {} bytes",
                MIN_MAX_BODY_BYTES, MAX_MAX_BODY_BYTES
            )));
        }

        Ok(Self { max_body_bytes })
    }
}
