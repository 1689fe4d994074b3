//! Static import extraction.
//!
//! Recognised forms: `import X from 'm'`, `import { a, b as c } from 'm'`,
//! `import X, { a } from 'm'` and `import 'm'`. Namespace imports, dynamic
//! `import()` and `import type` are not imports for the graph.

use once_cell::sync::Lazy;
use regex::Regex;
use vuedeps_graph::{ImportSpecifier, ImportStatement};

static IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"(?m)(?:^|[;}])[ \t]*(?P<kw>import)"#,
        r#"(?:\s+(?P<default>[A-Za-z_$][\w$]*)(?:\s*,\s*(?P<named_after>\{[^}]*\})\s*|\s+)from\s*"#,
        r#"|\s*(?P<named>\{[^}]*\})\s*from\s*"#,
        r#"|\s*)"#,
        r#"["'](?P<source>[^"'\r\n]+)["']"#,
    ))
    .expect("import pattern is valid")
});

/// Extract import statements in textual order.
///
/// `code` must have comments blanked; `code_only` is the same text with
/// literals also blanked and is used to reject matches inside strings.
pub fn extract_imports(code: &str, code_only: &str) -> Vec<ImportStatement> {
    IMPORT_RE
        .captures_iter(code)
        .filter(|caps| {
            caps.name("kw")
                .is_some_and(|kw| code_only.get(kw.range()) == Some("import"))
        })
        .filter_map(|caps| {
            let source = caps.name("source")?.as_str().to_string();
            let default = caps.name("default").map(|m| m.as_str().to_string());
            let named = caps
                .name("named")
                .or_else(|| caps.name("named_after"))
                .map(|m| parse_named_specifiers(m.as_str()))
                .unwrap_or_default();

            Some(ImportStatement {
                source,
                default,
                named,
            })
        })
        .collect()
}

/// Parse `{ a, b as c, type D }`; inline type-only specifiers are dropped.
fn parse_named_specifiers(block: &str) -> Vec<ImportSpecifier> {
    block
        .trim_start_matches('{')
        .trim_end_matches('}')
        .split(',')
        .filter_map(|entry| {
            let words: Vec<&str> = entry.split_whitespace().collect();
            match words.as_slice() {
                [] => None,
                // `type` as an ordinary binding name
                ["type"] => Some(ImportSpecifier::new("type", None)),
                ["type", "as", alias] => Some(ImportSpecifier::new("type", Some(alias.to_string()))),
                ["type", ..] => None,
                [name] => Some(ImportSpecifier::new(*name, None)),
                [name, "as", alias] => Some(ImportSpecifier::new(*name, Some(alias.to_string()))),
                _ => None,
            }
        })
        .collect()
}
