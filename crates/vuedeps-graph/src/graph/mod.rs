//! The dependency graph container.
//!
//! Nodes are keyed by absolute path and keep first-insertion order. Edges are
//! a value-deduplicated set. Every edge `(A, B)` has `A` in
//! `B.dependencies.imported_by` and vice versa; the link is written in the
//! same call that inserts the edge.

mod construction;
mod serialization;
mod statistics;

use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};

use crate::node::{DependencyEdge, DependencyNode};

pub use serialization::GraphDocument;
pub use statistics::GraphStatistics;

/// Directed import graph over parsed files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    nodes: IndexMap<PathBuf, DependencyNode>,
    edges: IndexSet<DependencyEdge>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node map keyed by absolute path.
    pub fn nodes(&self) -> &IndexMap<PathBuf, DependencyNode> {
        &self.nodes
    }

    pub fn edges(&self) -> &IndexSet<DependencyEdge> {
        &self.edges
    }

    pub fn node(&self, id: &Path) -> Option<&DependencyNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &Path) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
