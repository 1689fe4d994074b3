//! # vuedeps-analysis
//!
//! Static dependency analysis for Vue, JavaScript and TypeScript projects.
//!
//! The engine never executes analyzed code. It is made of four parts:
//!
//! - [`parser`]: reads one file, extracts its static imports and exports and
//!   classifies a Vue component's script style and language
//! - [`resolver`]: resolves one import specifier to an absolute path
//! - [`analyzer`]: parses a file set, resolves every import and assembles
//!   the [`DependencyGraph`]
//! - cycle detection over the result, re-exported from `vuedeps-graph`
//!
//! All filesystem access goes through the [`Runtime`] trait.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//! use vuedeps_analysis::{DependencyAnalyzer, PathResolver, ResolverConfig, parse_file};
//!
//! let parsed = parse_file(Path::new("/project/src/App.vue"));
//! println!("{:?} {:?}", parsed.script_type, parsed.script_lang);
//!
//! let config = ResolverConfig::new("/project")
//!     .with_base_url("src")
//!     .with_alias("@/*", ["src/*"]);
//!
//! let resolver = PathResolver::new(config.clone());
//! let result = resolver.resolve("@/components/Button.vue", Path::new("/project/src/App.vue"));
//! println!("{:?}", result.resolved_path());
//!
//! let mut analyzer = DependencyAnalyzer::new(config);
//! analyzer.analyze(&[PathBuf::from("/project/src/App.vue")]);
//! for cycle in analyzer.find_cycles() {
//!     println!("{}", cycle.format_chain());
//! }
//! ```

pub mod analyzer;
pub mod config;
pub mod parser;
pub mod resolver;
pub mod runtime;
pub mod sfc;

#[cfg(test)]
mod tests;

pub use analyzer::DependencyAnalyzer;
pub use config::{ResolveResult, ResolverConfig};
pub use parser::{FileParser, parse_file};
pub use resolver::PathResolver;
pub use runtime::{FileMetadata, NativeRuntime, Runtime, RuntimeError, RuntimeResult};

pub use vuedeps_graph::{
    CycleDetector, DependencyEdge, DependencyGraph, DependencyNode, EdgeKind, ExportInfo, FileKind,
    GraphDocument, GraphStatistics, ImportCycle, ImportSpecifier, ImportStatement, ParseResult,
    ScriptLang, ScriptType,
};
