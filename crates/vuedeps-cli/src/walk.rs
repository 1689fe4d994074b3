//! Project file enumeration.

use std::path::{Path, PathBuf};

use ignore::{WalkBuilder, overrides::OverrideBuilder};
use tracing::{debug, trace};
use vuedeps_config::VuedepsConfig;

use crate::error::Result;

/// Files under `root` with a configured extension, minus ignored globs.
///
/// Hidden entries and `.gitignore`d paths are skipped as well. The result
/// is sorted so analysis order does not depend on directory iteration.
pub fn collect_files(root: &Path, config: &VuedepsConfig) -> Result<Vec<PathBuf>> {
    let mut overrides = OverrideBuilder::new(root);
    for glob in &config.ignore {
        overrides.add(&format!("!{glob}"))?;
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(true)
        .hidden(true)
        .require_git(false)
        .follow_links(false)
        .overrides(overrides.build()?)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.into_path();
        if config.accepts_extension(&path) {
            trace!(file = %path.display(), "found");
            files.push(path);
        }
    }

    files.sort();
    debug!(count = files.len(), root = %root.display(), "enumerated files");
    Ok(files)
}
