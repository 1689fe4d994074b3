//! Error handling for the vuedeps CLI.
//!
//! Commands return [`CliError`]; `main` turns it into a miette report.

use std::path::PathBuf;

use miette::Report;
use thiserror::Error;
use vuedeps_config::ConfigError;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Project directory or file not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Directory traversal failed
    #[error("Failed to enumerate files: {0}")]
    Walk(#[from] ignore::Error),

    #[error("{0}")]
    Custom(String),
}

impl From<vuedeps_graph::Error> for CliError {
    fn from(err: vuedeps_graph::Error) -> Self {
        match err {
            vuedeps_graph::Error::Serialization(e) => Self::Json(e),
        }
    }
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Adds context to errors on their way to [`CliError`].
pub trait ResultExt<T> {
    /// Report a missing file as [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{msg}: {err}"))
        })
    }
}

/// Convert a [`CliError`] into a miette report.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => miette::miette!(
            help = "Check vuedeps.toml, the \"vuedeps\" field of package.json and tsconfig.json",
            "Configuration error: {e}"
        ),
        CliError::FileNotFound(path) => miette::miette!(
            help = "Pass an existing project directory as ROOT",
            "File not found: {}",
            path.display()
        ),
        other => miette::miette!("{other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts() {
        let err: CliError = ConfigError::NotFound(PathBuf::from("vuedeps.toml")).into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("vuedeps.toml"));
    }

    #[test]
    fn with_path_maps_not_found() {
        let result: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let err = result.with_path("/project/graph.json").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(p) if p == PathBuf::from("/project/graph.json")));
    }

    #[test]
    fn with_path_keeps_other_errors() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(matches!(result.with_path("/x").unwrap_err(), CliError::Io(_)));
    }

    #[test]
    fn context_prefixes_message() {
        let result: std::result::Result<(), CliError> =
            Err(CliError::InvalidArgument("bad".into()));
        let err = result.context("Failed to write DOT file").unwrap_err();
        assert_eq!(err.to_string(), "Failed to write DOT file: Invalid argument: bad");
    }

    #[test]
    fn miette_report_keeps_message() {
        let report = cli_error_to_miette(CliError::FileNotFound(PathBuf::from("/nope")));
        assert!(report.to_string().contains("/nope"));
    }
}
