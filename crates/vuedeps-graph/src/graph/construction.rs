//! Construction methods for DependencyGraph.

use std::path::Path;

use super::DependencyGraph;
use crate::node::{DependencyEdge, DependencyNode};

impl DependencyGraph {
    /// Insert a node. A node with the same id is replaced.
    pub fn insert_node(&mut self, node: DependencyNode) {
        self.nodes.insert(node.id.clone(), node);
    }

    /// Add an import edge and link `from` into the target's `imported_by`.
    ///
    /// Both endpoints must already be nodes. Returns `true` when the edge was
    /// newly inserted; a duplicate edge changes nothing.
    pub fn add_edge(&mut self, from: &Path, to: &Path) -> bool {
        if !self.nodes.contains_key(from) {
            return false;
        }
        let Some(target) = self.nodes.get_mut(to) else {
            return false;
        };

        let inserted = self.edges.insert(DependencyEdge::import(from, to));
        if inserted {
            target.dependencies.imported_by.push(from.to_path_buf());
        }
        inserted
    }
}
