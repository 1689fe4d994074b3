//! Serialization methods for DependencyGraph.

use serde::{Deserialize, Serialize};

use super::DependencyGraph;
use crate::Result;
use crate::node::{DependencyEdge, DependencyNode};

/// Flat document consumed by the `--json` output and static report pages.
///
/// `nodes` is an array; consumers rebuild lookups by `id` or `relativePath`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<DependencyNode>,
    pub edges: Vec<DependencyEdge>,
}

/// Helper to escape labels for DOT format.
fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

impl DependencyGraph {
    /// Flatten the graph into its document form.
    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            nodes: self.nodes.values().cloned().collect(),
            edges: self.edges.iter().cloned().collect(),
        }
    }

    /// Export the graph as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    /// Export the graph as DOT format for visualization.
    ///
    /// Nodes are labelled with their relative paths.
    pub fn to_dot(&self) -> String {
        let mut output = String::from("digraph Dependencies {\n");

        for node in self.nodes.values() {
            output.push_str("    \"");
            output.push_str(&escape_label(&node.relative_path));
            output.push('"');
            if let Some(script_type) = node.script_type {
                output.push_str(" [tooltip=\"");
                output.push_str(script_type.as_str());
                output.push_str("\"]");
            }
            output.push_str(";\n");
        }

        for edge in &self.edges {
            let (Some(from), Some(to)) = (self.nodes.get(&edge.from), self.nodes.get(&edge.to))
            else {
                continue;
            };
            output.push_str("    \"");
            output.push_str(&escape_label(&from.relative_path));
            output.push_str("\" -> \"");
            output.push_str(&escape_label(&to.relative_path));
            output.push_str("\";\n");
        }

        output.push_str("}\n");
        output
    }
}

impl From<&DependencyGraph> for GraphDocument {
    fn from(graph: &DependencyGraph) -> Self {
        graph.to_document()
    }
}
