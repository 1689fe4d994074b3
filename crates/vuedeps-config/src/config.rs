//! The vuedeps configuration model.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use vuedeps_analysis::ResolverConfig;

/// Globs excluded from file enumeration unless configured otherwise.
pub const DEFAULT_IGNORE: &[&str] = &["**/node_modules/**", "**/dist/**", "**/.git/**"];

/// File extensions enumerated unless configured otherwise.
pub const DEFAULT_EXTENSIONS: &[&str] = &["vue", "ts", "tsx", "js", "jsx"];

/// Fully loaded vuedeps configuration.
///
/// Loaded from `vuedeps.toml` or the `vuedeps` field of `package.json`,
/// layered over `compilerOptions` from `tsconfig.json`/`jsconfig.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VuedepsConfig {
    /// Project root; relative values are taken from the analyzed directory
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Base directory for non-relative specifiers, relative to `root`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<PathBuf>,

    /// Alias patterns to target patterns (`"@/*" = ["src/*"]`)
    #[serde(default)]
    pub paths: IndexMap<String, Vec<String>>,

    /// Resolve bare specifiers through `node_modules`
    #[serde(default = "default_resolve_node_modules")]
    pub resolve_node_modules: bool,

    /// Globs excluded from file enumeration
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,

    /// Extensions of files to analyze, without the dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Explicit tsconfig/jsconfig path; discovered under `root` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsconfig: Option<PathBuf>,
}

pub(crate) fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_resolve_node_modules() -> bool {
    true
}

pub(crate) fn default_ignore() -> Vec<String> {
    DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

impl Default for VuedepsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            base_url: None,
            paths: IndexMap::new(),
            resolve_node_modules: true,
            ignore: default_ignore(),
            extensions: default_extensions(),
            tsconfig: None,
        }
    }
}

impl VuedepsConfig {
    /// `root` resolved against `dir` when relative.
    pub fn root_dir(&self, dir: &Path) -> PathBuf {
        path_clean::clean(dir.join(&self.root))
    }

    /// Whether `path` has one of the configured extensions.
    pub fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.trim_start_matches('.') == ext))
    }

    /// Resolver settings for a project analyzed from `dir`.
    pub fn to_resolver_config(&self, dir: &Path) -> ResolverConfig {
        ResolverConfig {
            root: self.root_dir(dir),
            base_url: self.base_url.clone(),
            paths: self.paths.clone(),
            resolve_node_modules: self.resolve_node_modules,
        }
    }
}

/// A partial configuration layer; unset fields leave lower layers intact.
///
/// Used for CLI flags and for the values taken from tsconfig.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolve_node_modules: Option<bool>,

    /// Globs added to the configured ignore list
    #[serde(skip)]
    pub ignore: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsconfig: Option<PathBuf>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
