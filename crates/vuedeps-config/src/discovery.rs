//! Config file discovery.
//!
//! Finds `vuedeps.toml` or a `vuedeps` field in `package.json` under the
//! analyzed directory and turns it into a JSON value for layering.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;
use vuedeps_analysis::{NativeRuntime, Runtime};

use crate::error::{ConfigError, Result};

/// Name of the dedicated config file.
pub const CONFIG_FILE: &str = "vuedeps.toml";

/// Field holding vuedeps settings inside `package.json`.
pub const PACKAGE_JSON_FIELD: &str = "vuedeps";

/// Searches a directory for vuedeps configuration.
///
/// # Example
///
/// ```no_run
/// use vuedeps_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// if let Some(path) = discovery.find() {
///     let value = discovery.load_value(&path).unwrap();
///     println!("{value}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigDiscovery {
    root: PathBuf,
    runtime: Arc<dyn Runtime>,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_runtime(root, Arc::new(NativeRuntime))
    }

    pub fn with_runtime(root: impl AsRef<Path>, runtime: Arc<dyn Runtime>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            runtime,
        }
    }

    /// Find a config file in the root directory.
    ///
    /// Searches in this order:
    /// 1. `vuedeps.toml`
    /// 2. `package.json` with a non-null `vuedeps` field
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE);
        if self.runtime.is_file(&toml_path) {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        let content = self.runtime.read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        parsed
            .get(PACKAGE_JSON_FIELD)
            .is_some_and(|field| !field.is_null())
            .then_some(pkg_path)
    }

    /// Load a config file as a JSON object.
    ///
    /// `package.json` contributes its `vuedeps` field; other `.json` files
    /// and `.toml` files contribute their whole content.
    pub fn load_value(&self, path: &Path) -> Result<Value> {
        let content = self
            .runtime
            .read_to_string(path)
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let value = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => parse_toml(&content)?,
            Some("json") if path.file_name().is_some_and(|name| name == "package.json") => {
                package_json_field(&content)?
            }
            Some("json") => parse_json(&content, "json")?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        if !value.is_object() {
            return Err(ConfigError::InvalidValue {
                field: path.display().to_string(),
                hint: "configuration must be a table of settings".to_string(),
            });
        }
        debug!(config = %path.display(), "loaded config file");
        Ok(value)
    }
}

fn parse_toml(content: &str) -> Result<Value> {
    let toml_val: toml::Value = toml::from_str(content).map_err(|e| ConfigError::InvalidValue {
        field: "toml".to_string(),
        hint: format!("Invalid TOML syntax: {e}"),
    })?;
    serde_json::to_value(toml_val).map_err(|e| ConfigError::InvalidValue {
        field: "toml".to_string(),
        hint: format!("TOML to JSON conversion failed: {e}"),
    })
}

fn parse_json(content: &str, field: &str) -> Result<Value> {
    serde_json::from_str(content).map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        hint: format!("Invalid JSON: {e}"),
    })
}

fn package_json_field(content: &str) -> Result<Value> {
    let mut parsed = parse_json(content, "package.json")?;
    match parsed.get_mut(PACKAGE_JSON_FIELD).map(Value::take) {
        Some(Value::Null) | None => Err(ConfigError::InvalidValue {
            field: PACKAGE_JSON_FIELD.to_string(),
            hint: "Add a 'vuedeps' field to your package.json".to_string(),
        }),
        Some(value) => Ok(value),
    }
}
