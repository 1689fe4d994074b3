//! `tsconfig.json` / `jsconfig.json` support.
//!
//! Reads `compilerOptions.baseUrl` and `compilerOptions.paths` as JSONC,
//! following `extends` chains. A child's options replace its parent's
//! option by option.

use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use tracing::{debug, warn};
use vuedeps_analysis::Runtime;

use crate::error::{ConfigError, Result};

/// File names probed under the project root, in order.
pub const TSCONFIG_NAMES: &[&str] = &["tsconfig.json", "jsconfig.json"];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCompilerOptions {
    base_url: Option<String>,
    paths: Option<IndexMap<String, Vec<String>>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTsConfig {
    extends: Option<String>,
    #[serde(default)]
    compiler_options: RawCompilerOptions,
}

/// Module resolution options taken from a tsconfig chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TsConfigPaths {
    /// Absolute `baseUrl`
    pub base_url: Option<PathBuf>,
    /// Patterns with targets relative to the project root (absolute when
    /// they point outside it)
    pub paths: IndexMap<String, Vec<String>>,
}

/// Options of one chain level, with paths still relative to `paths_dir`.
#[derive(Debug, Default)]
struct Resolved {
    base_url: Option<PathBuf>,
    paths: Option<IndexMap<String, Vec<String>>>,
    paths_dir: PathBuf,
}

/// Parse tsconfig text, allowing comments and trailing commas.
fn parse_jsonc(path: &Path, content: &str) -> Result<RawTsConfig> {
    json5::from_str(content).map_err(|e| ConfigError::tsconfig(path, e.to_string()))
}

/// First of [`TSCONFIG_NAMES`] present under `root`.
pub fn find_tsconfig(root: &Path, runtime: &dyn Runtime) -> Option<PathBuf> {
    TSCONFIG_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|path| runtime.is_file(path))
}

/// Load `path` and its `extends` chain, rebasing paths onto `root`.
pub fn load_tsconfig(path: &Path, root: &Path, runtime: &dyn Runtime) -> Result<TsConfigPaths> {
    let mut visited = IndexSet::new();
    let resolved = resolve_chain(&path_clean::clean(path), root, runtime, &mut visited)?;

    let anchor = resolved.base_url.clone().unwrap_or(resolved.paths_dir);
    let paths = resolved
        .paths
        .unwrap_or_default()
        .into_iter()
        .map(|(pattern, targets)| {
            let targets = targets
                .iter()
                .map(|target| rebase(&anchor.join(target), root))
                .collect();
            (pattern, targets)
        })
        .collect();

    debug!(tsconfig = %path.display(), levels = visited.len(), "loaded tsconfig");
    Ok(TsConfigPaths {
        base_url: resolved.base_url,
        paths,
    })
}

fn resolve_chain(
    path: &Path,
    root: &Path,
    runtime: &dyn Runtime,
    visited: &mut IndexSet<PathBuf>,
) -> Result<Resolved> {
    if !visited.insert(path.to_path_buf()) {
        return Err(ConfigError::tsconfig(path, "circular extends chain"));
    }

    let content = runtime
        .read_to_string(path)
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let raw = parse_jsonc(path, &content)?;
    let dir = path.parent().unwrap_or(root).to_path_buf();

    let parent = match raw.extends.as_deref() {
        Some(extends) => match locate_extends(extends, &dir, root, runtime) {
            Some(parent_path) => resolve_chain(&parent_path, root, runtime, visited)?,
            None => {
                warn!(tsconfig = %path.display(), extends, "extended tsconfig not found, ignoring");
                Resolved::default()
            }
        },
        None => Resolved::default(),
    };

    let options = raw.compiler_options;
    let base_url = options
        .base_url
        .map(|base| path_clean::clean(dir.join(base)))
        .or(parent.base_url);
    let (paths, paths_dir) = match options.paths {
        Some(paths) => (Some(paths), dir),
        None => (parent.paths, parent.paths_dir),
    };

    Ok(Resolved {
        base_url,
        paths,
        paths_dir,
    })
}

/// Path of an `extends` target: relative to the extending file, absolute,
/// or a package under the root's `node_modules`.
fn locate_extends(extends: &str, dir: &Path, root: &Path, runtime: &dyn Runtime) -> Option<PathBuf> {
    let base = if extends.starts_with('.') || Path::new(extends).is_absolute() {
        dir.join(extends)
    } else {
        root.join("node_modules").join(extends)
    };
    let base = path_clean::clean(base);

    let mut candidates = vec![base.clone()];
    if base.extension().is_none_or(|ext| ext != "json") {
        let mut with_ext = base.clone().into_os_string();
        with_ext.push(".json");
        candidates.push(PathBuf::from(with_ext));
    }
    candidates.push(base.join("tsconfig.json"));

    candidates.into_iter().find(|candidate| runtime.is_file(candidate))
}

/// `path` relative to `root` with forward slashes, or absolute outside it.
fn rebase(path: &Path, root: &Path) -> String {
    let path = path_clean::clean(path);
    match path.strip_prefix(root) {
        Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Ok(relative) => relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vuedeps_analysis::runtime::memory::MemoryRuntime;

    fn load(runtime: &MemoryRuntime, path: &str) -> Result<TsConfigPaths> {
        load_tsconfig(Path::new(path), Path::new("/p"), runtime)
    }

    #[test]
    fn reads_jsonc_with_comments() {
        let runtime = MemoryRuntime::new().with_file(
            "/p/tsconfig.json",
            r#"{
                // Vite default
                "compilerOptions": {
                    "baseUrl": ".",
                    "paths": { "@/*": ["./src/*"], },
                },
            }"#,
        );
        let config = load(&runtime, "/p/tsconfig.json").unwrap();
        assert_eq!(config.base_url, Some(PathBuf::from("/p")));
        assert_eq!(config.paths["@/*"], vec!["src/*".to_string()]);
    }

    #[test]
    fn paths_are_relative_to_base_url() {
        let runtime = MemoryRuntime::new().with_file(
            "/p/tsconfig.json",
            r##"{ "compilerOptions": { "baseUrl": "src", "paths": { "~/*": ["*"], "#lib": ["../lib/index.ts"] } } }"##,
        );
        let config = load(&runtime, "/p/tsconfig.json").unwrap();
        assert_eq!(config.base_url, Some(PathBuf::from("/p/src")));
        assert_eq!(config.paths["~/*"], vec!["src/*".to_string()]);
        assert_eq!(config.paths["#lib"], vec!["lib/index.ts".to_string()]);
        let order: Vec<&str> = config.paths.keys().map(String::as_str).collect();
        assert_eq!(order, ["~/*", "#lib"]);
    }

    #[test]
    fn child_overrides_parent_per_option() {
        let runtime = MemoryRuntime::new()
            .with_file(
                "/p/config/base.json",
                r#"{ "compilerOptions": { "baseUrl": "..", "paths": { "@/*": ["src/*"] } } }"#,
            )
            .with_file(
                "/p/tsconfig.json",
                r##"{ "extends": "./config/base", "compilerOptions": { "paths": { "#/*": ["types/*"] } } }"##,
            );
        let config = load(&runtime, "/p/tsconfig.json").unwrap();
        assert_eq!(config.base_url, Some(PathBuf::from("/p")));
        assert_eq!(config.paths.len(), 1);
        assert_eq!(config.paths["#/*"], vec!["types/*".to_string()]);
    }

    #[test]
    fn inherited_paths_without_base_url_use_parent_dir() {
        let runtime = MemoryRuntime::new()
            .with_file(
                "/p/config/base.json",
                r#"{ "compilerOptions": { "paths": { "@/*": ["../src/*"] } } }"#,
            )
            .with_file("/p/tsconfig.json", r#"{ "extends": "./config/base.json" }"#);
        let config = load(&runtime, "/p/tsconfig.json").unwrap();
        assert_eq!(config.base_url, None);
        assert_eq!(config.paths["@/*"], vec!["src/*".to_string()]);
    }

    #[test]
    fn package_extends_resolved_from_node_modules() {
        let runtime = MemoryRuntime::new()
            .with_file(
                "/p/node_modules/@vue/tsconfig/tsconfig.json",
                r#"{ "compilerOptions": { "baseUrl": "." } }"#,
            )
            .with_file("/p/tsconfig.json", r#"{ "extends": "@vue/tsconfig" }"#);
        let config = load(&runtime, "/p/tsconfig.json").unwrap();
        assert_eq!(config.base_url, Some(PathBuf::from("/p/node_modules/@vue/tsconfig")));
    }

    #[test]
    fn missing_extends_is_ignored() {
        let runtime = MemoryRuntime::new().with_file(
            "/p/tsconfig.json",
            r#"{ "extends": "@vue/tsconfig/tsconfig.dom.json", "compilerOptions": { "paths": { "@/*": ["./src/*"] } } }"#,
        );
        let config = load(&runtime, "/p/tsconfig.json").unwrap();
        assert_eq!(config.paths["@/*"], vec!["src/*".to_string()]);
    }

    #[test]
    fn circular_extends_is_an_error() {
        let runtime = MemoryRuntime::new()
            .with_file("/p/a.json", r#"{ "extends": "./b.json" }"#)
            .with_file("/p/b.json", r#"{ "extends": "./a.json" }"#);
        let err = load(&runtime, "/p/a.json").unwrap_err();
        assert!(matches!(err, ConfigError::TsConfig { .. }));
        assert!(err.to_string().contains("circular"));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let runtime = MemoryRuntime::new().with_file("/p/tsconfig.json", "{ compilerOptions: ");
        assert!(matches!(
            load(&runtime, "/p/tsconfig.json"),
            Err(ConfigError::TsConfig { .. })
        ));
    }

    #[test]
    fn targets_outside_root_stay_absolute() {
        let runtime = MemoryRuntime::new().with_file(
            "/p/tsconfig.json",
            r#"{ "compilerOptions": { "paths": { "shared/*": ["../shared/*"] } } }"#,
        );
        let config = load(&runtime, "/p/tsconfig.json").unwrap();
        assert_eq!(config.paths["shared/*"], vec!["/shared/*".to_string()]);
    }

    #[test]
    fn finds_tsconfig_before_jsconfig() {
        let runtime = MemoryRuntime::new()
            .with_file("/p/jsconfig.json", "{}")
            .with_file("/p/tsconfig.json", "{}");
        assert_eq!(
            find_tsconfig(Path::new("/p"), &runtime),
            Some(PathBuf::from("/p/tsconfig.json"))
        );
        let runtime = MemoryRuntime::new().with_file("/p/jsconfig.json", "{}");
        assert_eq!(
            find_tsconfig(Path::new("/p"), &runtime),
            Some(PathBuf::from("/p/jsconfig.json"))
        );
        assert_eq!(find_tsconfig(Path::new("/p"), &MemoryRuntime::new()), None);
    }
}
