//! Import/export parser.
//!
//! [`FileParser::parse`] reads one file and produces a [`ParseResult`]. It
//! never fails: unreadable or malformed files yield a result with `error`
//! set and only the facts derivable from the extension.

mod classify;
mod exports;
mod imports;
mod strip;

pub use classify::classify_script;
pub use exports::extract_exports;
pub use imports::extract_imports;
pub use strip::{strip_comments, strip_comments_and_literals};

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, trace};
use vuedeps_graph::{ExportInfo, FileKind, ParseResult, ScriptLang, ScriptType};

use crate::runtime::{NativeRuntime, Runtime};
use crate::sfc::{self, MAX_FILE_SIZE};

/// Imports and exports of one script body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptFacts {
    pub imports: Vec<vuedeps_graph::ImportStatement>,
    pub exports: ExportInfo,
}

/// Extract imports and exports from script source text.
pub fn scan_script(source: &str) -> ScriptFacts {
    let code = strip_comments(source);
    let code_only = strip_comments_and_literals(source);

    ScriptFacts {
        imports: extract_imports(&code, &code_only),
        exports: extract_exports(&code, &code_only),
    }
}

/// Parses files through a [`Runtime`].
#[derive(Debug, Clone)]
pub struct FileParser {
    runtime: Arc<dyn Runtime>,
}

impl Default for FileParser {
    fn default() -> Self {
        Self::new(Arc::new(NativeRuntime))
    }
}

impl FileParser {
    pub fn new(runtime: Arc<dyn Runtime>) -> Self {
        Self { runtime }
    }

    /// Parse one file, dispatching on its extension.
    pub fn parse(&self, path: &Path) -> ParseResult {
        let kind = FileKind::from_path(path);
        let ext_lang = ScriptLang::from_path(path);

        let content = match self.read(path) {
            Ok(content) => content,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "skipping unreadable file");
                return ParseResult::failed(path, kind, ext_lang, err);
            }
        };

        match kind {
            FileKind::Vue => parse_vue(path, &content),
            FileKind::Script | FileKind::Definition => {
                let facts = scan_script(&content);
                trace!(path = %path.display(), imports = facts.imports.len(), "parsed script");
                ParseResult {
                    imports: facts.imports,
                    exports: facts.exports,
                    ..ParseResult::new(path, kind, ext_lang)
                }
            }
        }
    }

    fn read(&self, path: &Path) -> Result<String, String> {
        let metadata = self.runtime.metadata(path).map_err(|e| e.to_string())?;
        if !metadata.is_file {
            return Err(format!("Not a file: {}", path.display()));
        }
        if metadata.size > MAX_FILE_SIZE as u64 {
            return Err(format!(
                "File too large: {} bytes (max: {MAX_FILE_SIZE} bytes)",
                metadata.size
            ));
        }
        self.runtime.read_to_string(path).map_err(|e| e.to_string())
    }
}

/// Parse a file with the native filesystem.
pub fn parse_file(path: &Path) -> ParseResult {
    FileParser::default().parse(path)
}

/// Parse Vue component source that has already been read.
pub fn parse_vue(path: &Path, content: &str) -> ParseResult {
    let descriptor = match sfc::split(content) {
        Ok(descriptor) => descriptor,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "malformed component");
            return ParseResult::failed(path, FileKind::Vue, ScriptLang::Unknown, err.to_string());
        }
    };

    let Some(block) = descriptor.primary_script() else {
        return ParseResult {
            script_type: Some(ScriptType::Unknown),
            exports: ExportInfo::implicit_component(),
            ..ParseResult::new(path, FileKind::Vue, ScriptLang::Unknown)
        };
    };

    let lang = ScriptLang::from_lang_attr(block.lang());
    let facts = scan_script(block.content);
    let script_type = classify_script(
        block.content,
        descriptor.script_setup.is_some(),
        &facts.imports,
    );
    trace!(path = %path.display(), %script_type, %lang, "parsed component");

    ParseResult {
        script_type: Some(script_type),
        imports: facts.imports,
        exports: facts.exports,
        ..ParseResult::new(path, FileKind::Vue, lang)
    }
}
