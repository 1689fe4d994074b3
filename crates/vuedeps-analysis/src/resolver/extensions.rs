//! Extension and index-file probing.

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::runtime::Runtime;

/// Probed extensions, in priority order.
pub const EXTENSIONS: &[&str] = &[".vue", ".ts", ".tsx", ".js", ".jsx", ".json"];

/// `path` with `ext` appended to the full file name (`a.config` + `.ts`).
pub fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(ext);
    PathBuf::from(name)
}

/// First `index.<ext>` file inside `dir`.
pub fn try_index_files(dir: &Path, runtime: &dyn Runtime) -> Option<PathBuf> {
    EXTENSIONS.iter().find_map(|ext| {
        let index = dir.join(format!("index{ext}"));
        trace!(candidate = %index.display(), "probing index file");
        runtime.is_file(&index).then_some(index)
    })
}

/// Probe a candidate base path:
///
/// 1. the exact path, if it is a file
/// 2. `index.<ext>` inside it, if it is a directory
/// 3. the path with each extension appended
/// 4. `index.<ext>` inside any appended path that is a directory
pub fn probe(base: &Path, runtime: &dyn Runtime) -> Option<PathBuf> {
    trace!(candidate = %base.display(), "probing");

    if let Ok(metadata) = runtime.metadata(base) {
        if metadata.is_file {
            return Some(base.to_path_buf());
        }
        if metadata.is_dir {
            if let Some(index) = try_index_files(base, runtime) {
                return Some(index);
            }
        }
    }

    let appended: Vec<PathBuf> = EXTENSIONS
        .iter()
        .map(|ext| append_extension(base, ext))
        .collect();

    if let Some(found) = appended.iter().find(|path| runtime.is_file(path)) {
        return Some(found.clone());
    }

    appended
        .iter()
        .filter(|path| runtime.is_dir(path))
        .find_map(|dir| try_index_files(dir, runtime))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::memory::MemoryRuntime;

    #[test]
    fn exact_file_wins() {
        let runtime = MemoryRuntime::new()
            .with_file("/p/a.vue", "")
            .with_file("/p/a.vue.ts", "");
        assert_eq!(probe(Path::new("/p/a.vue"), &runtime), Some(PathBuf::from("/p/a.vue")));
    }

    #[test]
    fn extension_priority() {
        let runtime = MemoryRuntime::new()
            .with_file("/p/Button.ts", "")
            .with_file("/p/Button.vue", "");
        assert_eq!(probe(Path::new("/p/Button"), &runtime), Some(PathBuf::from("/p/Button.vue")));
    }

    #[test]
    fn extension_is_appended_not_replaced() {
        let runtime = MemoryRuntime::new().with_file("/p/vite.config.ts", "");
        assert_eq!(
            probe(Path::new("/p/vite.config"), &runtime),
            Some(PathBuf::from("/p/vite.config.ts"))
        );
    }

    #[test]
    fn directory_index_priority() {
        let runtime = MemoryRuntime::new()
            .with_file("/p/components/index.js", "")
            .with_file("/p/components/index.ts", "");
        assert_eq!(
            probe(Path::new("/p/components"), &runtime),
            Some(PathBuf::from("/p/components/index.ts"))
        );
    }

    #[test]
    fn directory_without_index_falls_back_to_extension() {
        let runtime = MemoryRuntime::new()
            .with_file("/p/store/README.md", "")
            .with_file("/p/store.js", "");
        assert_eq!(probe(Path::new("/p/store"), &runtime), Some(PathBuf::from("/p/store.js")));
    }

    #[test]
    fn appended_directory_gets_index_probe() {
        let runtime = MemoryRuntime::new().with_file("/p/lib.js/index.json", "");
        assert_eq!(
            probe(Path::new("/p/lib"), &runtime),
            Some(PathBuf::from("/p/lib.js/index.json"))
        );
    }

    #[test]
    fn nothing_found() {
        let runtime = MemoryRuntime::new();
        assert_eq!(probe(Path::new("/p/missing"), &runtime), None);
    }
}
