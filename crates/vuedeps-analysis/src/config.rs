//! Resolver configuration and result types.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Configuration for module resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Project root; alias targets and display paths are relative to it
    pub root: PathBuf,
    /// Directory for non-relative specifiers; relative values are taken
    /// from `root`. Defaults to `root`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<PathBuf>,
    /// Alias patterns (`@/*`) to target patterns (`src/*`), in declared order
    #[serde(default)]
    pub paths: IndexMap<String, Vec<String>>,
    /// Whether bare specifiers are looked up in `node_modules`
    #[serde(default = "default_true")]
    pub resolve_node_modules: bool,
}

fn default_true() -> bool {
    true
}

impl ResolverConfig {
    /// Create a configuration rooted at `root` with default settings.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            base_url: None,
            paths: IndexMap::new(),
            resolve_node_modules: true,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<PathBuf>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add one alias pattern with its targets.
    pub fn with_alias<I, S>(mut self, pattern: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths
            .insert(pattern.into(), targets.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_node_modules(mut self, enabled: bool) -> Self {
        self.resolve_node_modules = enabled;
        self
    }

    /// Absolute, normalized project root.
    ///
    /// A relative `root` is taken from the current directory.
    pub fn root_dir(&self) -> PathBuf {
        let root = std::path::absolute(&self.root).unwrap_or_else(|_| self.root.clone());
        path_clean::clean(root)
    }

    /// Absolute, normalized base directory for non-relative specifiers.
    pub fn base_dir(&self) -> PathBuf {
        match &self.base_url {
            Some(base) if base.is_absolute() => path_clean::clean(base),
            Some(base) => path_clean::clean(self.root_dir().join(base)),
            None => self.root_dir(),
        }
    }

    /// Literal prefixes of the alias patterns (`@/*` gives `@/`).
    pub fn alias_prefixes(&self) -> Vec<String> {
        self.paths
            .keys()
            .map(|pattern| pattern.trim_end_matches('*').to_string())
            .filter(|prefix| !prefix.is_empty())
            .collect()
    }
}

/// Outcome of resolving one specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveResult {
    /// Absolute path of the resolved file
    Resolved(PathBuf),
    /// Human-readable reason the specifier did not resolve
    Failed(String),
}

impl ResolveResult {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }

    pub fn resolved_path(&self) -> Option<&Path> {
        match self {
            Self::Resolved(path) => Some(path),
            Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Resolved(_) => None,
            Self::Failed(reason) => Some(reason),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}
