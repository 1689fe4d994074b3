//! Module path resolution.
//!
//! Implements the subset of Node.js/TypeScript resolution the graph needs:
//! relative and absolute paths, tsconfig-style aliases, `node_modules`
//! lookup, extension/index probing and the `package.json` `main` field.
//! Conditional exports and the `exports`/`imports` maps are not supported.

mod aliases;
mod extensions;
mod packages;

pub use aliases::{alias_triggers, expand_alias};
pub use extensions::{EXTENSIONS, append_extension, probe, try_index_files};
pub use packages::{is_in_node_modules, node_modules_candidates, package_main};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::{ResolveResult, ResolverConfig};
use crate::runtime::{NativeRuntime, Runtime};

/// Resolves import specifiers to absolute file paths.
///
/// Resolution only reads the filesystem; nothing is cached, so repeated
/// calls re-probe.
#[derive(Debug, Clone)]
pub struct PathResolver {
    config: ResolverConfig,
    root: PathBuf,
    base_dir: PathBuf,
    triggers: Vec<char>,
    runtime: Arc<dyn Runtime>,
}

impl PathResolver {
    /// Create a resolver over the native filesystem.
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_runtime(config, Arc::new(NativeRuntime))
    }

    pub fn with_runtime(config: ResolverConfig, runtime: Arc<dyn Runtime>) -> Self {
        Self {
            root: config.root_dir(),
            base_dir: config.base_dir(),
            triggers: alias_triggers(&config.paths),
            config,
            runtime,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve `specifier` as imported from `from`.
    ///
    /// Order: empty check, absolute path, aliases, `node_modules`, then
    /// relative to the importer (for `.` specifiers) or to `baseUrl`.
    pub fn resolve(&self, specifier: &str, from: &Path) -> ResolveResult {
        let result = self.resolve_inner(specifier, from);
        match &result {
            ResolveResult::Resolved(path) => {
                trace!(specifier, from = %from.display(), resolved = %path.display(), "resolved");
            }
            ResolveResult::Failed(reason) => {
                debug!(specifier, from = %from.display(), reason = %reason, "unresolved import");
            }
        }
        result
    }

    fn resolve_inner(&self, specifier: &str, from: &Path) -> ResolveResult {
        if specifier.is_empty() {
            return ResolveResult::failed("Invalid path");
        }

        let spec_path = Path::new(specifier);
        if spec_path.is_absolute() {
            let candidate = path_clean::clean(spec_path);
            return match self.probe(&candidate) {
                Some(found) => ResolveResult::Resolved(found),
                None => not_found(specifier, &candidate),
            };
        }

        let mut alias_attempted = false;
        if specifier.starts_with(self.triggers.as_slice()) {
            if let Some(candidates) = expand_alias(specifier, &self.config.paths, &self.root) {
                alias_attempted = true;
                if let Some(found) = candidates.iter().find_map(|c| self.probe(c)) {
                    return ResolveResult::Resolved(found);
                }
                trace!(specifier, "alias targets did not resolve, falling back");
            }
        }

        if !specifier.starts_with('.') {
            if self.config.resolve_node_modules {
                if let Some(found) = self.resolve_package(specifier, from) {
                    return ResolveResult::Resolved(found);
                }
            } else if !alias_attempted {
                return ResolveResult::Failed(format!(
                    "node_modules resolution is disabled: cannot resolve '{specifier}'"
                ));
            }
        }

        let base = if specifier.starts_with('.') {
            self.importer_dir(from)
        } else {
            self.base_dir.clone()
        };
        let candidate = path_clean::clean(base.join(specifier));
        match self.probe(&candidate) {
            Some(found) => ResolveResult::Resolved(found),
            None => not_found(specifier, &candidate),
        }
    }

    fn resolve_package(&self, specifier: &str, from: &Path) -> Option<PathBuf> {
        let from_dir = self.importer_dir(from);
        node_modules_candidates(specifier, &from_dir, &self.root)
            .into_iter()
            .find_map(|candidate| self.probe(&path_clean::clean(candidate)))
    }

    /// Directory of the importing file; a relative `from` is taken from the root.
    fn importer_dir(&self, from: &Path) -> PathBuf {
        let from = if from.is_absolute() {
            path_clean::clean(from)
        } else {
            path_clean::clean(self.root.join(from))
        };
        match from.parent() {
            Some(dir) => dir.to_path_buf(),
            None => self.root.clone(),
        }
    }

    /// Extension/index probing, then the `main` field under `node_modules`.
    fn probe(&self, base: &Path) -> Option<PathBuf> {
        let runtime = self.runtime.as_ref();
        if let Some(found) = probe(base, runtime) {
            return Some(found);
        }
        if is_in_node_modules(base) && runtime.is_dir(base) {
            let main = package_main(base, runtime)?;
            return probe(&main, runtime);
        }
        None
    }
}

fn not_found(specifier: &str, candidate: &Path) -> ResolveResult {
    ResolveResult::Failed(format!(
        "Module not found: '{specifier}' ({}) does not exist",
        candidate.display()
    ))
}
