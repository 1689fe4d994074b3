//! Path alias handling for module resolution.
//!
//! Aliases are tsconfig-style patterns: `@/*` maps to targets such as
//! `src/*`, with `*` standing for the rest of the specifier. Targets are
//! relative to the project root.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

/// First characters that can start an aliased specifier.
pub fn alias_triggers(paths: &IndexMap<String, Vec<String>>) -> Vec<char> {
    let mut triggers: Vec<char> = paths
        .keys()
        .filter_map(|pattern| pattern.chars().next())
        .filter(|c| *c != '*')
        .collect();
    triggers.dedup();
    triggers
}

/// Match `specifier` against one pattern; returns the text `*` stands for.
fn match_pattern<'s>(pattern: &str, specifier: &'s str) -> Option<&'s str> {
    match pattern.split_once('*') {
        Some((prefix, suffix)) => {
            if specifier.len() >= prefix.len() + suffix.len()
                && specifier.starts_with(prefix)
                && specifier.ends_with(suffix)
            {
                Some(&specifier[prefix.len()..specifier.len() - suffix.len()])
            } else {
                None
            }
        }
        None => (pattern == specifier).then_some(""),
    }
}

/// Candidate paths for every pattern matching `specifier`.
///
/// Returns `None` when no pattern matches. Candidates follow the declared
/// pattern order, then the declared target order.
pub fn expand_alias(
    specifier: &str,
    paths: &IndexMap<String, Vec<String>>,
    root: &Path,
) -> Option<Vec<PathBuf>> {
    let mut matched = false;
    let mut candidates = Vec::new();

    for (pattern, targets) in paths {
        // A bare `*` catch-all would swallow every package import.
        if pattern == "*" {
            continue;
        }
        let Some(rest) = match_pattern(pattern, specifier) else {
            continue;
        };
        matched = true;
        for target in targets {
            let target = target.replacen('*', rest, 1);
            candidates.push(path_clean::clean(root.join(target)));
        }
    }

    matched.then_some(candidates)
}
