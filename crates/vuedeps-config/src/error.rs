//! Error types for configuration discovery and loading.

use std::path::PathBuf;

use thiserror::Error;
use vuedeps_analysis::RuntimeError;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("invalid config value for '{field}': {hint}")]
    InvalidValue { field: String, hint: String },

    #[error("invalid tsconfig {path}: {message}")]
    TsConfig { path: PathBuf, message: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },
}

impl ConfigError {
    pub(crate) fn tsconfig(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::TsConfig {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        let field = err
            .path
            .first()
            .cloned()
            .unwrap_or_else(|| "configuration".to_string());
        Self::InvalidValue {
            field,
            hint: err.to_string(),
        }
    }
}
