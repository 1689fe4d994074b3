//! Graph nodes and edges.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::kind::{EdgeKind, FileKind, ScriptLang, ScriptType};
use crate::parse_result::{ExportInfo, ParseResult};

/// Raw and reverse dependency lists of a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDependencies {
    /// Unresolved specifiers, copied verbatim from the parse result
    pub imports: Vec<String>,
    /// Absolute paths of nodes with an import edge to this node
    pub imported_by: Vec<PathBuf>,
}

/// A successfully parsed file in the graph.
///
/// Identity is the absolute `id`; `relative_path` is for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    pub id: PathBuf,
    pub relative_path: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_type: Option<ScriptType>,
    pub script_lang: ScriptLang,
    pub dependencies: NodeDependencies,
    pub exports: ExportInfo,
}

impl DependencyNode {
    /// Build a node from a parse result. `imported_by` starts empty.
    pub fn from_parse_result(result: ParseResult, root: &Path) -> Self {
        let relative_path = relative_path(&result.file_path, root);
        let imports = result.imports.into_iter().map(|i| i.source).collect();

        Self {
            id: result.file_path,
            relative_path,
            kind: result.kind,
            script_type: result.script_type,
            script_lang: result.script_lang,
            dependencies: NodeDependencies {
                imports,
                imported_by: Vec::new(),
            },
            exports: result.exports,
        }
    }

    pub fn imports(&self) -> &[String] {
        &self.dependencies.imports
    }

    pub fn imported_by(&self) -> &[PathBuf] {
        &self.dependencies.imported_by
    }
}

/// Directed import edge. Equality and hashing are structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from: PathBuf,
    pub to: PathBuf,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

impl DependencyEdge {
    pub fn import(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind: EdgeKind::Import,
        }
    }
}

/// Forward-slash path of `path` relative to `root`.
///
/// Paths outside `root` are returned whole.
pub fn relative_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();

    if relative.is_absolute() {
        // Keep the leading separator that `components()` folds into RootDir.
        let joined = parts[1..].join("/");
        format!("/{joined}")
    } else {
        parts.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_result::ImportStatement;
    use std::collections::HashSet;

    #[test]
    fn relative_path_uses_forward_slashes() {
        let root = Path::new("/project");
        assert_eq!(
            relative_path(Path::new("/project/src/components/Header.vue"), root),
            "src/components/Header.vue"
        );
        assert_eq!(relative_path(Path::new("/other/x.ts"), root), "/other/x.ts");
    }

    #[test]
    fn node_copies_import_sources_verbatim() {
        let mut result = ParseResult::new("/p/src/App.vue", FileKind::Vue, ScriptLang::Ts);
        result.imports.push(ImportStatement::side_effect("./a.css"));
        result.imports.push(ImportStatement::side_effect("@/utils"));
        result.script_type = Some(ScriptType::Composition);

        let node = DependencyNode::from_parse_result(result, Path::new("/p"));
        assert_eq!(node.id, PathBuf::from("/p/src/App.vue"));
        assert_eq!(node.relative_path, "src/App.vue");
        assert_eq!(node.imports(), &["./a.css".to_string(), "@/utils".to_string()]);
        assert!(node.imported_by().is_empty());
        assert_eq!(node.script_type, Some(ScriptType::Composition));
    }

    #[test]
    fn edges_are_equal_by_value() {
        let a = DependencyEdge::import("/p/a.ts", "/p/b.ts");
        let b = DependencyEdge::import(PathBuf::from("/p/a.ts"), PathBuf::from("/p/b.ts"));
        let mut set = HashSet::new();
        assert!(set.insert(a));
        assert!(!set.insert(b));
    }

    #[test]
    fn node_serializes_camel_case() {
        let result = ParseResult::new("/p/a.ts", FileKind::Script, ScriptLang::Ts);
        let node = DependencyNode::from_parse_result(result, Path::new("/p"));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["relativePath"], "a.ts");
        assert_eq!(value["type"], "script");
        assert_eq!(value["scriptLang"], "ts");
        assert!(value["dependencies"]["importedBy"].is_array());
        assert_eq!(value["exports"]["hasDefault"], false);
        assert!(value.get("scriptType").is_none());
    }
}
