//! Circular import detection for diagnostic output.
//!
//! The detector walks raw import specifiers, not resolved edges: each
//! specifier is matched against node relative paths by exact or suffix match.
//! A cycle reported here can therefore differ from what the resolved edge
//! set would show.

use std::path::PathBuf;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::graph::DependencyGraph;
use crate::node::DependencyNode;

/// Alias prefixes recognised when no resolver configuration is supplied.
pub const DEFAULT_ALIAS_PREFIXES: [&str; 2] = ["@/", "~/"];

/// Extensions stripped when matching extension-less specifiers.
const MATCH_EXTENSIONS: [&str; 6] = [".vue", ".ts", ".tsx", ".js", ".jsx", ".json"];

/// One circular chain; the first node is repeated at the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportCycle {
    /// Absolute node ids, closing node included
    pub path: Vec<PathBuf>,
    /// Relative paths matching `path`
    pub relative_paths: Vec<String>,
}

impl ImportCycle {
    /// Number of distinct files in the cycle.
    pub fn len(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the cycle is a file importing itself.
    pub fn is_self_import(&self) -> bool {
        self.len() == 1
    }

    /// Format the chain as a human-readable string.
    ///
    /// Example: "src/A.vue -> src/B.vue -> src/A.vue"
    pub fn format_chain(&self) -> String {
        self.relative_paths.join(" -> ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    OnStack,
    Done,
}

/// DFS frame: node index, its successors and the next successor to visit.
struct Frame {
    node: usize,
    successors: Vec<usize>,
    next: usize,
}

/// Finds elementary import cycles over a node map.
#[derive(Debug, Clone)]
pub struct CycleDetector {
    alias_prefixes: Vec<String>,
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self {
            alias_prefixes: DEFAULT_ALIAS_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl CycleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use alias prefixes such as `@/` instead of the defaults.
    ///
    /// Prefixes are tried longest first.
    pub fn with_alias_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alias_prefixes = prefixes
            .into_iter()
            .map(Into::into)
            .filter(|p: &String| !p.is_empty())
            .collect();
        self.alias_prefixes.sort_by(|a, b| b.len().cmp(&a.len()));
        self
    }

    pub fn alias_prefixes(&self) -> &[String] {
        &self.alias_prefixes
    }

    /// Find all cycles reachable by depth-first search from every node.
    ///
    /// Nodes finished under an earlier root are not expanded again.
    pub fn detect(&self, nodes: &IndexMap<PathBuf, DependencyNode>) -> Vec<ImportCycle> {
        let count = nodes.len();
        let matcher = PathMatcher::new(nodes);
        let mut state = vec![VisitState::Unvisited; count];
        let mut position: Vec<Option<usize>> = vec![None; count];
        let mut path: Vec<usize> = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();
        let mut cycles = Vec::new();

        for root in 0..count {
            if state[root] != VisitState::Unvisited {
                continue;
            }
            self.enter(root, nodes, &matcher, &mut state, &mut position, &mut path, &mut stack);

            while let Some(frame) = stack.last_mut() {
                if frame.next < frame.successors.len() {
                    let succ = frame.successors[frame.next];
                    frame.next += 1;

                    match state[succ] {
                        VisitState::Unvisited => {
                            self.enter(
                                succ,
                                nodes,
                                &matcher,
                                &mut state,
                                &mut position,
                                &mut path,
                                &mut stack,
                            );
                        }
                        VisitState::OnStack => {
                            if let Some(start) = position[succ] {
                                cycles.push(build_cycle(nodes, &path[start..], succ));
                            }
                        }
                        VisitState::Done => {}
                    }
                } else {
                    let node = frame.node;
                    stack.pop();
                    path.pop();
                    position[node] = None;
                    state[node] = VisitState::Done;
                }
            }
        }

        cycles
    }

    #[allow(clippy::too_many_arguments)]
    fn enter(
        &self,
        node: usize,
        nodes: &IndexMap<PathBuf, DependencyNode>,
        matcher: &PathMatcher,
        state: &mut [VisitState],
        position: &mut [Option<usize>],
        path: &mut Vec<usize>,
        stack: &mut Vec<Frame>,
    ) {
        state[node] = VisitState::OnStack;
        position[node] = Some(path.len());
        path.push(node);

        let successors = nodes
            .get_index(node)
            .map(|(_, n)| self.successors(n, matcher))
            .unwrap_or_default();
        stack.push(Frame {
            node,
            successors,
            next: 0,
        });
    }

    /// Node indices matched by a node's specifiers, deduplicated in order.
    fn successors(&self, node: &DependencyNode, matcher: &PathMatcher) -> Vec<usize> {
        let mut seen = FxHashSet::default();
        node.imports()
            .iter()
            .filter_map(|spec| self.normalize_specifier(spec))
            .filter_map(|spec| matcher.find(&spec))
            .filter(|idx| seen.insert(*idx))
            .collect()
    }

    /// Strip relative and alias prefixes from a project-local specifier.
    ///
    /// Bare package specifiers yield `None`.
    fn normalize_specifier(&self, specifier: &str) -> Option<String> {
        let mut rest = if let Some(prefix) = self
            .alias_prefixes
            .iter()
            .find(|p| specifier.starts_with(p.as_str()))
        {
            &specifier[prefix.len()..]
        } else if specifier.starts_with('.') || specifier.starts_with('/') {
            specifier
        } else {
            return None;
        };

        loop {
            if let Some(r) = rest.strip_prefix("./") {
                rest = r;
            } else if let Some(r) = rest.strip_prefix("../") {
                rest = r;
            } else if let Some(r) = rest.strip_prefix('/') {
                rest = r;
            } else {
                break;
            }
        }

        let rest = rest.trim_end_matches('/');
        if rest.is_empty() || rest == "." || rest == ".." {
            return None;
        }
        Some(rest.to_string())
    }
}

/// Precomputed relative-path keys for suffix matching.
struct PathMatcher {
    /// (relative path, without extension, without `/index.<ext>`)
    keys: Vec<(String, String, Option<String>)>,
}

impl PathMatcher {
    fn new(nodes: &IndexMap<PathBuf, DependencyNode>) -> Self {
        let keys = nodes
            .values()
            .map(|node| {
                let full = node.relative_path.clone();
                let stem = strip_known_extension(&full).to_string();
                let dir = stem
                    .strip_suffix("/index")
                    .or_else(|| (stem == "index").then_some(""))
                    .map(str::to_string);
                (full, stem, dir)
            })
            .collect();
        Self { keys }
    }

    /// First node, in map order, matching the cleaned specifier.
    fn find(&self, spec: &str) -> Option<usize> {
        let spec_stem = strip_known_extension(spec);
        self.keys.iter().position(|(full, stem, dir)| {
            ends_with_segment(full, spec)
                || ends_with_segment(stem, spec)
                || ends_with_segment(stem, spec_stem)
                || dir.as_deref().is_some_and(|d| ends_with_segment(d, spec))
        })
    }
}

/// `haystack == needle` or `haystack` ends with `/needle`.
fn ends_with_segment(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack == needle
        || (haystack.len() > needle.len()
            && haystack.ends_with(needle)
            && haystack.as_bytes()[haystack.len() - needle.len() - 1] == b'/')
}

fn strip_known_extension(path: &str) -> &str {
    MATCH_EXTENSIONS
        .iter()
        .find_map(|ext| path.strip_suffix(ext))
        .unwrap_or(path)
}

fn build_cycle(
    nodes: &IndexMap<PathBuf, DependencyNode>,
    slice: &[usize],
    closing: usize,
) -> ImportCycle {
    let mut path = Vec::with_capacity(slice.len() + 1);
    let mut relative_paths = Vec::with_capacity(slice.len() + 1);
    for &idx in slice.iter().chain(std::iter::once(&closing)) {
        if let Some((id, node)) = nodes.get_index(idx) {
            path.push(id.clone());
            relative_paths.push(node.relative_path.clone());
        }
    }
    ImportCycle {
        path,
        relative_paths,
    }
}

impl DependencyGraph {
    /// Run the default [`CycleDetector`] over this graph's nodes.
    pub fn find_cycles(&self) -> Vec<ImportCycle> {
        CycleDetector::default().detect(self.nodes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{FileKind, ScriptLang};
    use crate::parse_result::{ImportStatement, ParseResult};
    use std::path::Path;

    fn nodes(files: &[(&str, &[&str])]) -> IndexMap<PathBuf, DependencyNode> {
        let root = Path::new("/p");
        files
            .iter()
            .map(|(path, imports)| {
                let mut result =
                    ParseResult::new(format!("/p/{path}"), FileKind::from_path(Path::new(path)), ScriptLang::Ts);
                result.imports = imports.iter().map(|s| ImportStatement::side_effect(*s)).collect();
                let node = DependencyNode::from_parse_result(result, root);
                (node.id.clone(), node)
            })
            .collect()
    }

    #[test]
    fn mutual_imports_form_one_cycle() {
        let nodes = nodes(&[("A.vue", &["./B.vue"]), ("B.vue", &["./A.vue"])]);
        let cycles = CycleDetector::new().detect(&nodes);

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].relative_paths, vec!["A.vue", "B.vue", "A.vue"]);
        assert_eq!(cycles[0].format_chain(), "A.vue -> B.vue -> A.vue");
        assert_eq!(cycles[0].len(), 2);
    }

    #[test]
    fn acyclic_graph_has_no_cycles() {
        let nodes = nodes(&[
            ("src/main.ts", &["./App.vue", "vue"]),
            ("src/App.vue", &["@/components/Card.vue"]),
            ("src/components/Card.vue", &[]),
        ]);
        assert!(CycleDetector::new().detect(&nodes).is_empty());
    }

    #[test]
    fn self_import_is_a_cycle() {
        let nodes = nodes(&[("src/loop.ts", &["./loop"])]);
        let cycles = CycleDetector::new().detect(&nodes);
        assert_eq!(cycles.len(), 1);
        assert!(cycles[0].is_self_import());
        assert_eq!(cycles[0].relative_paths, vec!["src/loop.ts", "src/loop.ts"]);
    }

    #[test]
    fn matches_parent_relative_alias_and_index_specifiers() {
        let nodes = nodes(&[
            ("src/a/one.ts", &["../b"]),
            ("src/b/index.ts", &["@/c/three"]),
            ("src/c/three.ts", &["../a/one.ts"]),
        ]);
        let cycles = CycleDetector::new().detect(&nodes);
        assert_eq!(cycles.len(), 1);
        assert_eq!(
            cycles[0].relative_paths,
            vec!["src/a/one.ts", "src/b/index.ts", "src/c/three.ts", "src/a/one.ts"]
        );
    }

    #[test]
    fn finished_nodes_are_not_expanded_again() {
        // C is reached from A first; the second root B must not re-report A->C->A.
        let nodes = nodes(&[
            ("A.ts", &["./C"]),
            ("B.ts", &["./C"]),
            ("C.ts", &["./A"]),
        ]);
        let cycles = CycleDetector::new().detect(&nodes);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].relative_paths, vec!["A.ts", "C.ts", "A.ts"]);
    }

    #[test]
    fn suffix_match_requires_segment_boundary() {
        assert!(ends_with_segment("src/components/Button.vue", "components/Button.vue"));
        assert!(ends_with_segment("Button.vue", "Button.vue"));
        assert!(!ends_with_segment("src/BigButton.vue", "Button.vue"));
    }

    #[test]
    fn custom_alias_prefixes() {
        let nodes = nodes(&[("lib/x.ts", &["#lib/y"]), ("lib/y.ts", &["#lib/x"])]);
        assert!(CycleDetector::new().detect(&nodes).is_empty());

        let detector = CycleDetector::new().with_alias_prefixes(["#lib/"]);
        assert_eq!(detector.detect(&nodes).len(), 1);
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let count = 3_000;
        let files: Vec<(String, Vec<String>)> = (0..count)
            .map(|i| {
                let next = (i + 1) % count;
                (format!("m{i}.ts"), vec![format!("./m{next}")])
            })
            .collect();
        let root = Path::new("/p");
        let nodes: IndexMap<_, _> = files
            .iter()
            .map(|(path, imports)| {
                let mut result = ParseResult::new(format!("/p/{path}"), FileKind::Script, ScriptLang::Ts);
                result.imports = imports.iter().map(|s| ImportStatement::side_effect(s.clone())).collect();
                let node = DependencyNode::from_parse_result(result, root);
                (node.id.clone(), node)
            })
            .collect();

        let cycles = CycleDetector::new().detect(&nodes);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), count);
    }
}
