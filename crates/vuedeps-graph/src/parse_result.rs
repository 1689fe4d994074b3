//! Per-file parse output.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::kind::{FileKind, ScriptLang, ScriptType};

/// One `name` or `name as alias` entry of a named import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSpecifier {
    /// Name exported by the source module
    pub imported: String,
    /// Binding introduced in the importing module
    pub local: String,
}

impl ImportSpecifier {
    /// Create a specifier; `local` defaults to `imported` when unaliased.
    pub fn new(imported: impl Into<String>, local: Option<String>) -> Self {
        let imported = imported.into();
        let local = local.unwrap_or_else(|| imported.clone());
        Self { imported, local }
    }
}

/// One textual static import statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportStatement {
    /// Module specifier exactly as written
    pub source: String,
    /// Local name of the default import, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Named specifiers in textual order
    #[serde(default)]
    pub named: Vec<ImportSpecifier>,
}

impl ImportStatement {
    /// A side-effect-only import (`import 'm'`).
    pub fn side_effect(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            default: None,
            named: Vec::new(),
        }
    }

    /// Whether the statement binds nothing.
    pub fn is_side_effect(&self) -> bool {
        self.default.is_none() && self.named.is_empty()
    }

    /// All local bindings introduced by this statement.
    pub fn local_names(&self) -> impl Iterator<Item = &str> {
        self.default
            .as_deref()
            .into_iter()
            .chain(self.named.iter().map(|s| s.local.as_str()))
    }
}

/// Exports found in a file. Names keep textual order and are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportInfo {
    pub has_default: bool,
    pub named: Vec<String>,
}

impl ExportInfo {
    /// Exports assumed for a Vue component without any script block.
    pub fn implicit_component() -> Self {
        Self {
            has_default: true,
            named: Vec::new(),
        }
    }
}

/// Result of parsing one file.
///
/// A result with `error` set still carries the extension-derived `kind` and
/// `script_lang`; its imports and exports are empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// Absolute path of the parsed file
    pub file_path: PathBuf,
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// Only meaningful for Vue files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_type: Option<ScriptType>,
    pub script_lang: ScriptLang,
    pub imports: Vec<ImportStatement>,
    pub exports: ExportInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParseResult {
    /// An empty, successful result.
    pub fn new(file_path: impl Into<PathBuf>, kind: FileKind, script_lang: ScriptLang) -> Self {
        Self {
            file_path: file_path.into(),
            kind,
            script_type: None,
            script_lang,
            imports: Vec::new(),
            exports: ExportInfo::default(),
            error: None,
        }
    }

    /// A failed result keeping only extension-derived facts.
    pub fn failed(
        file_path: impl Into<PathBuf>,
        kind: FileKind,
        script_lang: ScriptLang,
        error: impl Into<String>,
    ) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(file_path, kind, script_lang)
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Raw import specifiers in textual order.
    pub fn import_sources(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(|i| i.source.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specifier_local_defaults_to_imported() {
        let spec = ImportSpecifier::new("ref", None);
        assert_eq!(spec.local, "ref");

        let spec = ImportSpecifier::new("ref", Some("vueRef".to_string()));
        assert_eq!(spec.imported, "ref");
        assert_eq!(spec.local, "vueRef");
    }

    #[test]
    fn failed_result_keeps_extension_facts() {
        let result = ParseResult::failed("/p/a.ts", FileKind::Script, ScriptLang::Ts, "boom");
        assert!(!result.is_ok());
        assert_eq!(result.script_lang, ScriptLang::Ts);
        assert!(result.imports.is_empty());
        assert!(!result.exports.has_default);
    }

    #[test]
    fn local_names_cover_default_and_named() {
        let stmt = ImportStatement {
            source: "vue".into(),
            default: Some("Vue".into()),
            named: vec![ImportSpecifier::new("ref", None)],
        };
        let names: Vec<_> = stmt.local_names().collect();
        assert_eq!(names, vec!["Vue", "ref"]);
        assert!(!stmt.is_side_effect());
        assert!(ImportStatement::side_effect("./style.css").is_side_effect());
    }
}
