//! # vuedeps-graph
//!
//! Pure data structures for Vue/JavaScript/TypeScript dependency graphs.
//!
//! This crate holds the model shared by the analysis engine and its
//! consumers: per-file [`ParseResult`]s, graph [`DependencyNode`]s and
//! [`DependencyEdge`]s, the [`DependencyGraph`] container, its JSON/DOT
//! serialization, and the [`CycleDetector`]. It performs no I/O.
//!
//! ## Architecture
//!
//! ```text
//! ParseResult ──▶ DependencyNode ──┐
//!                                  ├──▶ DependencyGraph ──▶ { nodes: [], edges: [] }
//!                  DependencyEdge ─┘          │
//!                                             ▼
//!                                       CycleDetector
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use std::path::Path;
//! use vuedeps_graph::{DependencyGraph, DependencyNode, FileKind, ParseResult, ScriptLang};
//!
//! let root = Path::new("/project");
//! let mut graph = DependencyGraph::new();
//!
//! let app = ParseResult::new("/project/src/App.vue", FileKind::Vue, ScriptLang::Ts);
//! let header = ParseResult::new("/project/src/Header.vue", FileKind::Vue, ScriptLang::Ts);
//! graph.insert_node(DependencyNode::from_parse_result(app, root));
//! graph.insert_node(DependencyNode::from_parse_result(header, root));
//!
//! assert!(graph.add_edge(Path::new("/project/src/App.vue"), Path::new("/project/src/Header.vue")));
//! assert_eq!(graph.edge_count(), 1);
//! ```

pub mod cycles;
pub mod graph;
pub mod kind;
pub mod node;
pub mod parse_result;


pub use cycles::{CycleDetector, ImportCycle};
pub use graph::{DependencyGraph, GraphDocument, GraphStatistics};
pub use kind::{EdgeKind, FileKind, ScriptLang, ScriptType};
pub use node::{DependencyEdge, DependencyNode, NodeDependencies, relative_path};
pub use parse_result::{ExportInfo, ImportSpecifier, ImportStatement, ParseResult};

/// Errors produced by graph operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Serializing the graph document failed
    #[error("failed to serialize graph: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for graph operations.
pub type Result<T> = std::result::Result<T, Error>;
