//! Closed classifications attached to parse results, nodes and edges.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// What sort of source file a node was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Vue single-file component (`.vue`)
    Vue,
    /// Plain JavaScript or TypeScript module
    Script,
    /// TypeScript declaration file (`.d.ts`)
    Definition,
}

impl FileKind {
    /// Classify a path by its extension.
    ///
    /// `.d.ts` (and `.d.mts`/`.d.cts`) win over the plain `.ts` rule.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if name.ends_with(".vue") {
            Self::Vue
        } else if name.ends_with(".d.ts") || name.ends_with(".d.mts") || name.ends_with(".d.cts")
        {
            Self::Definition
        } else {
            Self::Script
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vue => "vue",
            Self::Script => "script",
            Self::Definition => "definition",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authoring style of a Vue component's script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptType {
    Composition,
    Options,
    Mixed,
    Functional,
    Class,
    Unknown,
}

impl ScriptType {
    /// All variants, in reporting order.
    pub const ALL: [ScriptType; 6] = [
        Self::Composition,
        Self::Options,
        Self::Mixed,
        Self::Functional,
        Self::Class,
        Self::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Composition => "composition",
            Self::Options => "options",
            Self::Mixed => "mixed",
            Self::Functional => "functional",
            Self::Class => "class",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Script language of a file or Vue script block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptLang {
    Ts,
    Js,
    #[default]
    Unknown,
}

impl ScriptLang {
    /// Derive the language from a file extension alone.
    ///
    /// `.vue` files have no extension-derived language; their language comes
    /// from the `lang` attribute of the chosen script block.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("ts" | "tsx" | "mts" | "cts") => Self::Ts,
            Some("js" | "jsx" | "mjs" | "cjs") => Self::Js,
            _ => Self::Unknown,
        }
    }

    /// Normalize a Vue `<script lang="...">` attribute value.
    ///
    /// A missing attribute means JavaScript.
    pub fn from_lang_attr(lang: Option<&str>) -> Self {
        match lang.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
            None | Some("js" | "javascript") => Self::Js,
            Some("ts" | "typescript") => Self::Ts,
            Some(_) => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ts => "ts",
            Self::Js => "js",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ScriptLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a dependency edge. Only static imports are tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    #[default]
    Import,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Import => f.write_str("import"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_kind_from_extension() {
        assert_eq!(FileKind::from_path(Path::new("/a/App.vue")), FileKind::Vue);
        assert_eq!(FileKind::from_path(Path::new("/a/env.d.ts")), FileKind::Definition);
        assert_eq!(FileKind::from_path(Path::new("/a/main.ts")), FileKind::Script);
        assert_eq!(FileKind::from_path(Path::new("/a/main.jsx")), FileKind::Script);
    }

    #[test]
    fn script_lang_from_extension() {
        assert_eq!(ScriptLang::from_path(Path::new("a.tsx")), ScriptLang::Ts);
        assert_eq!(ScriptLang::from_path(Path::new("a.d.ts")), ScriptLang::Ts);
        assert_eq!(ScriptLang::from_path(Path::new("a.mjs")), ScriptLang::Js);
        assert_eq!(ScriptLang::from_path(Path::new("a.vue")), ScriptLang::Unknown);
    }

    #[test]
    fn script_lang_from_lang_attr() {
        assert_eq!(ScriptLang::from_lang_attr(None), ScriptLang::Js);
        assert_eq!(ScriptLang::from_lang_attr(Some("typescript")), ScriptLang::Ts);
        assert_eq!(ScriptLang::from_lang_attr(Some("TS")), ScriptLang::Ts);
        assert_eq!(ScriptLang::from_lang_attr(Some("javascript")), ScriptLang::Js);
        assert_eq!(ScriptLang::from_lang_attr(Some("coffee")), ScriptLang::Unknown);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&ScriptType::Composition).unwrap();
        assert_eq!(json, "\"composition\"");
        let json = serde_json::to_string(&FileKind::Definition).unwrap();
        assert_eq!(json, "\"definition\"");
        let json = serde_json::to_string(&EdgeKind::Import).unwrap();
        assert_eq!(json, "\"import\"");
    }
}
