//! Export extraction.

use once_cell::sync::Lazy;
use regex::Regex;
use vuedeps_graph::ExportInfo;

static EXPORT_DEFAULT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)(?:^|[;{}])[ \t]*(?P<kw>export)\s+default\b").expect("export default pattern is valid")
});

static EXPORT_LIST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)(?:^|[;}])[ \t]*(?P<kw>export)\s*(?P<names>\{[^}]*\})")
        .expect("export list pattern is valid")
});

static EXPORT_DECL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?m)(?:^|[;}])[ \t]*(?P<kw>export)\s+(?:declare\s+)?",
        r"(?:async\s+function\s*\*?|function\s*\*?|const|let|var|(?:abstract\s+)?class)",
        r"\s*(?P<name>[A-Za-z_$][\w$]*)",
    ))
    .expect("export declaration pattern is valid")
});

/// A matched export, ordered by its offset.
enum Found {
    Default,
    Names(Vec<String>),
}

/// Extract exports in textual order.
///
/// `code` has comments blanked; `code_only` additionally has literals
/// blanked and is used to reject matches inside strings. Re-exports
/// (`export { x } from 'm'`) are named exports only; they never become
/// imports.
pub fn extract_exports(code: &str, code_only: &str) -> ExportInfo {
    let is_code = |kw: &regex::Match<'_>| code_only.get(kw.range()) == Some("export");

    let mut found: Vec<(usize, Found)> = Vec::new();

    for caps in EXPORT_DEFAULT_RE.captures_iter(code) {
        if let Some(kw) = caps.name("kw").filter(is_code) {
            found.push((kw.start(), Found::Default));
        }
    }
    for caps in EXPORT_LIST_RE.captures_iter(code) {
        if let (Some(kw), Some(names)) = (caps.name("kw").filter(is_code), caps.name("names")) {
            found.push((kw.start(), Found::Names(parse_export_list(names.as_str()))));
        }
    }
    for caps in EXPORT_DECL_RE.captures_iter(code) {
        if let (Some(kw), Some(name)) = (caps.name("kw").filter(is_code), caps.name("name")) {
            found.push((kw.start(), Found::Names(vec![name.as_str().to_string()])));
        }
    }

    found.sort_by_key(|(offset, _)| *offset);

    let mut info = ExportInfo::default();
    for (_, item) in found {
        match item {
            Found::Default => info.has_default = true,
            Found::Names(names) => {
                for name in names {
                    if name == "default" {
                        info.has_default = true;
                    } else {
                        info.named.push(name);
                    }
                }
            }
        }
    }
    info
}

/// Exported names of `{ a, b as c, type T }`.
fn parse_export_list(block: &str) -> Vec<String> {
    block
        .trim_start_matches('{')
        .trim_end_matches('}')
        .split(',')
        .filter_map(|entry| {
            let words: Vec<&str> = entry.split_whitespace().collect();
            match words.as_slice() {
                [] => None,
                ["type"] => Some("type".to_string()),
                ["type", "as", alias] => Some(alias.to_string()),
                ["type", ..] => None,
                [name] => Some(name.to_string()),
                [_, "as", alias] => Some(alias.to_string()),
                _ => None,
            }
        })
        .collect()
}
