//! Dependency graph builder.
//!
//! [`DependencyAnalyzer::analyze`] parses a file set, resolves every import
//! and replaces the held [`DependencyGraph`]. Parsing runs in parallel;
//! edges and `importedBy` lists are written in input order, so repeated runs
//! over the same files produce the same graph.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexSet;
use rayon::prelude::*;
use tracing::{debug, info};
use vuedeps_graph::{CycleDetector, DependencyGraph, DependencyNode, ImportCycle};

use crate::config::{ResolveResult, ResolverConfig};
use crate::parser::FileParser;
use crate::resolver::PathResolver;
use crate::runtime::{NativeRuntime, Runtime};

/// Builds and holds the dependency graph for a project.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::PathBuf;
/// use vuedeps_analysis::{DependencyAnalyzer, ResolverConfig};
///
/// let config = ResolverConfig::new("/project").with_alias("@/*", ["src/*"]);
/// let mut analyzer = DependencyAnalyzer::new(config);
///
/// let graph = analyzer.analyze(&[
///     PathBuf::from("/project/src/App.vue"),
///     PathBuf::from("/project/src/components/Header.vue"),
/// ]);
/// println!("{} nodes, {} edges", graph.node_count(), graph.edge_count());
/// ```
#[derive(Debug)]
pub struct DependencyAnalyzer {
    parser: FileParser,
    resolver: PathResolver,
    graph: DependencyGraph,
}

impl DependencyAnalyzer {
    /// Create an analyzer over the native filesystem.
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_runtime(config, Arc::new(NativeRuntime))
    }

    /// Create an analyzer that reads through `runtime`.
    pub fn with_runtime(config: ResolverConfig, runtime: Arc<dyn Runtime>) -> Self {
        Self {
            parser: FileParser::new(Arc::clone(&runtime)),
            resolver: PathResolver::with_runtime(config, runtime),
            graph: DependencyGraph::new(),
        }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn root(&self) -> PathBuf {
        self.resolver.config().root_dir()
    }

    /// The graph from the last [`analyze`](Self::analyze) call.
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Analyze `files` and replace the held graph.
    ///
    /// Relative inputs are taken from the project root; duplicates collapse
    /// onto the first occurrence. Files that are missing or fail to parse are
    /// left out, as are imports that do not resolve to another input file.
    pub fn analyze(&mut self, files: &[PathBuf]) -> &DependencyGraph {
        let root = self.root();
        let files: Vec<PathBuf> = files
            .iter()
            .map(|file| normalize_input(file, &root))
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect();

        // Step 1: parse every file; keep the ones that parsed cleanly.
        let parsed: Vec<_> = files
            .par_iter()
            .map(|file| self.parser.parse(file))
            .collect();

        let mut graph = DependencyGraph::new();
        let mut skipped = 0usize;
        for result in parsed {
            if let Some(error) = &result.error {
                debug!(path = %result.file_path.display(), error = %error, "excluding file from graph");
                skipped += 1;
                continue;
            }
            graph.insert_node(DependencyNode::from_parse_result(result, &root));
        }

        // Step 2: resolve every import of every node.
        let pending: Vec<(&Path, &str)> = graph
            .nodes()
            .values()
            .flat_map(|node| node.imports().iter().map(|spec| (node.id.as_path(), spec.as_str())))
            .collect();

        let links: Vec<(PathBuf, PathBuf)> = pending
            .par_iter()
            .filter_map(|(from, spec)| match self.resolver.resolve(spec, from) {
                ResolveResult::Resolved(to) if graph.contains(&to) => {
                    Some((from.to_path_buf(), to))
                }
                ResolveResult::Resolved(to) => {
                    debug!(from = %from.display(), to = %to.display(), "import target is outside the file set");
                    None
                }
                ResolveResult::Failed(_) => None,
            })
            .collect();

        for (from, to) in &links {
            graph.add_edge(from, to);
        }

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            skipped,
            "dependency graph built"
        );

        self.graph = graph;
        &self.graph
    }

    /// Report import cycles in the current graph.
    ///
    /// Configured alias prefixes are used to match aliased specifiers.
    pub fn find_cycles(&self) -> Vec<ImportCycle> {
        let prefixes = self.resolver.config().alias_prefixes();
        let detector = if prefixes.is_empty() {
            CycleDetector::new()
        } else {
            CycleDetector::new().with_alias_prefixes(prefixes)
        };
        detector.detect(self.graph.nodes())
    }
}

fn normalize_input(file: &Path, root: &Path) -> PathBuf {
    if file.is_absolute() {
        path_clean::clean(file)
    } else {
        path_clean::clean(root.join(file))
    }
}
