//! Layered configuration loading.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use figment::{
    Figment,
    providers::{Env, Serialized},
    value::{Uncased, UncasedStr},
};
use serde_json::Value;
use tracing::debug;
use vuedeps_analysis::{NativeRuntime, Runtime};

use crate::config::{ConfigOverrides, VuedepsConfig};
use crate::discovery::ConfigDiscovery;
use crate::error::{ConfigError, Result};
use crate::tsconfig::{find_tsconfig, load_tsconfig};

/// Prefix of environment variables read as configuration.
pub const ENV_PREFIX: &str = "VUEDEPS_";

/// Loads [`VuedepsConfig`] for a directory.
///
/// Priority, lowest first: defaults, tsconfig/jsconfig `compilerOptions`,
/// the config file, `VUEDEPS_*` environment variables, overrides.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    dir: PathBuf,
    config_file: Option<PathBuf>,
    overrides: ConfigOverrides,
    read_env: bool,
    runtime: Arc<dyn Runtime>,
}

impl ConfigLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            config_file: None,
            overrides: ConfigOverrides::default(),
            read_env: true,
            runtime: Arc::new(NativeRuntime),
        }
    }

    /// Use this file instead of discovering one; relative to the directory.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_env(mut self, read_env: bool) -> Self {
        self.read_env = read_env;
        self
    }

    pub fn with_runtime(mut self, runtime: Arc<dyn Runtime>) -> Self {
        self.runtime = runtime;
        self
    }

    /// Load and merge every layer.
    pub fn load(&self) -> Result<VuedepsConfig> {
        let file_layer = self.file_layer()?;

        // Everything above the tsconfig layer; decides where tsconfig lives.
        let mut upper = Figment::new();
        if let Some(value) = &file_layer {
            upper = upper.merge(Serialized::defaults(value));
        }
        if self.read_env {
            upper = upper.merge(env_provider());
        }
        upper = upper.merge(Serialized::defaults(&self.overrides));

        let root = upper
            .extract_inner::<PathBuf>("root")
            .unwrap_or_else(|_| crate::config::default_root());
        let root_dir = path_clean::clean(self.dir.join(root));
        let tsconfig_layer = self.tsconfig_layer(&upper, &root_dir)?;

        let mut figment = Figment::from(Serialized::defaults(VuedepsConfig::default()))
            .merge(Serialized::defaults(tsconfig_layer))
            .merge(upper);
        if !self.overrides.ignore.is_empty() {
            figment = figment.admerge(Serialized::default("ignore", &self.overrides.ignore));
        }

        let mut config: VuedepsConfig = figment.extract()?;
        order_by_specificity(&mut config);
        debug!(root = %root_dir.display(), aliases = config.paths.len(), "configuration loaded");
        Ok(config)
    }

    fn file_layer(&self) -> Result<Option<Value>> {
        let discovery = ConfigDiscovery::with_runtime(&self.dir, Arc::clone(&self.runtime));
        let path = match &self.config_file {
            Some(path) => {
                let path = self.dir.join(path);
                if !self.runtime.is_file(&path) {
                    return Err(ConfigError::NotFound(path));
                }
                path
            }
            None => match discovery.find() {
                Some(path) => path,
                None => return Ok(None),
            },
        };
        discovery.load_value(&path).map(Some)
    }

    fn tsconfig_layer(&self, upper: &Figment, root_dir: &Path) -> Result<ConfigOverrides> {
        let path = match upper.extract_inner::<PathBuf>("tsconfig") {
            Ok(explicit) => {
                let path = root_dir.join(explicit);
                if !self.runtime.is_file(&path) {
                    return Err(ConfigError::NotFound(path));
                }
                path
            }
            Err(_) => match find_tsconfig(root_dir, self.runtime.as_ref()) {
                Some(path) => path,
                None => return Ok(ConfigOverrides::default()),
            },
        };

        let ts = load_tsconfig(&path, root_dir, self.runtime.as_ref())?;
        Ok(ConfigOverrides {
            base_url: ts.base_url,
            paths: ts.paths,
            ..Default::default()
        })
    }
}

/// `VUEDEPS_BASE_URL` style variables mapped onto camelCase keys.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).map(env_key)
}

fn env_key(key: &UncasedStr) -> Uncased<'_> {
    if key == "base_url" {
        "baseUrl".into()
    } else if key == "resolve_node_modules" {
        "resolveNodeModules".into()
    } else {
        key.as_str().into()
    }
}

/// Longest literal prefix first, as TypeScript picks among matching patterns.
fn order_by_specificity(config: &mut VuedepsConfig) {
    config
        .paths
        .sort_by(|a, _, b, _| prefix_len(b).cmp(&prefix_len(a)).then_with(|| a.cmp(b)));
}

fn prefix_len(pattern: &str) -> usize {
    pattern.find('*').unwrap_or(pattern.len())
}
