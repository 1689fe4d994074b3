//! `node_modules` lookup and `package.json` main-field fallback.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use tracing::trace;

use crate::runtime::Runtime;

/// Whether any component of `path` is `node_modules`.
pub fn is_in_node_modules(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(name) if name == OsStr::new("node_modules")))
}

/// `node_modules/<specifier>` candidates: the root's first, then each
/// directory from the importer's upward, stopping at the root.
pub fn node_modules_candidates(specifier: &str, from_dir: &Path, root: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![root.join("node_modules").join(specifier)];

    for dir in from_dir.ancestors() {
        if dir == root {
            break;
        }
        if !dir.starts_with(root) {
            break;
        }
        candidates.push(dir.join("node_modules").join(specifier));
    }

    candidates
}

/// The `main` entry of `<package_dir>/package.json`, joined to the package.
///
/// Unreadable or unparseable metadata counts as "no main".
pub fn package_main(package_dir: &Path, runtime: &dyn Runtime) -> Option<PathBuf> {
    let manifest = package_dir.join("package.json");
    let content = runtime.read_to_string(&manifest).ok()?;
    let json: serde_json::Value = serde_json::from_str(&content).ok()?;
    let main = json.get("main")?.as_str()?.trim();
    if main.is_empty() {
        return None;
    }
    trace!(package = %package_dir.display(), main, "using package main");
    Some(path_clean::clean(package_dir.join(main)))
}
