//! Statistics snapshot for summaries.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::DependencyGraph;
use crate::kind::{FileKind, ScriptType};

/// Aggregate counts over a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    pub by_file_kind: IndexMap<FileKind, usize>,
    /// Vue components only
    pub by_script_type: IndexMap<ScriptType, usize>,
    /// Nodes with no edges in either direction
    pub orphan_count: usize,
    pub self_import_count: usize,
}

impl DependencyGraph {
    /// Compute a statistics snapshot.
    pub fn statistics(&self) -> GraphStatistics {
        let mut stats = GraphStatistics {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            ..Default::default()
        };

        for node in self.nodes.values() {
            *stats.by_file_kind.entry(node.kind).or_default() += 1;
            if let Some(script_type) = node.script_type {
                *stats.by_script_type.entry(script_type).or_default() += 1;
            }
        }
        stats.by_script_type.sort_keys();

        let mut linked = rustc_hash::FxHashSet::default();
        for edge in &self.edges {
            linked.insert(edge.from.as_path());
            linked.insert(edge.to.as_path());
            if edge.from == edge.to {
                stats.self_import_count += 1;
            }
        }
        stats.orphan_count = self
            .nodes
            .keys()
            .filter(|id| !linked.contains(&id.as_path()))
            .count();

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ScriptLang;
    use crate::node::DependencyNode;
    use crate::parse_result::ParseResult;
    use std::path::Path;

    #[test]
    fn counts_kinds_orphans_and_self_imports() {
        let root = Path::new("/p");
        let mut graph = DependencyGraph::new();

        let mut app = ParseResult::new("/p/App.vue", FileKind::Vue, ScriptLang::Js);
        app.script_type = Some(ScriptType::Options);
        let mut card = ParseResult::new("/p/Card.vue", FileKind::Vue, ScriptLang::Ts);
        card.script_type = Some(ScriptType::Composition);
        for result in [
            app,
            card,
            ParseResult::new("/p/env.d.ts", FileKind::Definition, ScriptLang::Ts),
            ParseResult::new("/p/loop.ts", FileKind::Script, ScriptLang::Ts),
        ] {
            graph.insert_node(DependencyNode::from_parse_result(result, root));
        }
        graph.add_edge(Path::new("/p/App.vue"), Path::new("/p/Card.vue"));
        graph.add_edge(Path::new("/p/loop.ts"), Path::new("/p/loop.ts"));

        let stats = graph.statistics();
        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.edge_count, 2);
        assert_eq!(stats.by_file_kind[&FileKind::Vue], 2);
        assert_eq!(stats.by_file_kind[&FileKind::Definition], 1);
        assert_eq!(stats.by_script_type[&ScriptType::Composition], 1);
        assert_eq!(stats.by_script_type[&ScriptType::Options], 1);
        assert_eq!(stats.orphan_count, 1);
        assert_eq!(stats.self_import_count, 1);
    }
}
