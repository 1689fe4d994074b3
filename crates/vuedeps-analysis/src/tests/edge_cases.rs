//! Edge cases: unusual files and inputs that must not break analysis.

use std::sync::Arc;

use super::test_helpers::*;
use crate::runtime::memory::MemoryRuntime;
use crate::{DependencyAnalyzer, ResolverConfig, ScriptType};
use tempfile::TempDir;

#[test]
fn test_empty_files() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let root = create_test_project(&temp, &[("src/index.ts", ""), ("src/Empty.vue", "")]);

    let mut analyzer = DependencyAnalyzer::new(ResolverConfig::new(&root));
    let graph = analyzer.analyze(&paths(&root, &["src/index.ts", "src/Empty.vue"]));

    assert_eq!(graph.node_count(), 2);
    let empty = graph.node(&root.join("src/Empty.vue")).unwrap();
    assert_eq!(empty.script_type, Some(ScriptType::Unknown));
    assert!(empty.exports.has_default);
}

#[test]
fn test_invalid_utf8_file_is_skipped() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let root = create_test_project(&temp, &[("src/ok.ts", "import './bad'")]);
    std::fs::write(root.join("src/bad.ts"), [0xc3, 0x28, 0xff]).expect("write bad file");

    let mut analyzer = DependencyAnalyzer::new(ResolverConfig::new(&root));
    let graph = analyzer.analyze(&paths(&root, &["src/ok.ts", "src/bad.ts"]));
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_empty_file_list() {
    let mut analyzer = DependencyAnalyzer::new(ResolverConfig::new("/nowhere"));
    let graph = analyzer.analyze(&[]);
    assert!(graph.is_empty());
    assert!(analyzer.find_cycles().is_empty());
}

#[test]
fn test_wide_barrel_file() {
    let mut runtime = MemoryRuntime::new();
    let mut barrel = String::new();
    let mut files = vec![std::path::PathBuf::from("/p/src/components/index.ts")];
    for i in 0..200 {
        barrel.push_str(&format!("export {{ default as C{i} }} from './C{i}.vue'\n"));
        barrel.push_str(&format!("import './C{i}.vue'\n"));
        let path = format!("/p/src/components/C{i}.vue");
        runtime.insert(path.clone(), "<template><div/></template>");
        files.push(path.into());
    }
    runtime.insert("/p/src/components/index.ts", barrel);

    let mut analyzer = DependencyAnalyzer::with_runtime(ResolverConfig::new("/p"), Arc::new(runtime));
    let graph = analyzer.analyze(&files);

    assert_eq!(graph.node_count(), 201);
    assert_eq!(graph.edge_count(), 200);
    let barrel_node = graph.node(&files[0]).unwrap();
    assert_eq!(barrel_node.exports.named.len(), 200);
    assert_eq!(barrel_node.imports().len(), 200);
}

#[test]
fn test_deep_import_chain() {
    let mut runtime = MemoryRuntime::new();
    let depth = 300;
    let mut files = Vec::new();
    for i in 0..depth {
        let content = if i + 1 < depth {
            format!("import {{ next }} from './m{}'\nexport const m{i} = 1", i + 1)
        } else {
            "export const last = 1".to_string()
        };
        let path = format!("/p/m{i}.ts");
        runtime.insert(path.clone(), content);
        files.push(path.into());
    }

    let mut analyzer = DependencyAnalyzer::with_runtime(ResolverConfig::new("/p"), Arc::new(runtime));
    let graph = analyzer.analyze(&files);
    assert_eq!(graph.edge_count(), depth - 1);
    assert!(analyzer.find_cycles().is_empty());
}

#[test]
fn test_specifier_with_query_or_unusual_text_does_not_panic() {
    let mut runtime = MemoryRuntime::new();
    runtime.insert(
        "/p/a.ts",
        "import x from './img.svg?url'\nimport y from '../../../../outside'\nimport z from 'ü-pkg'",
    );
    let mut analyzer = DependencyAnalyzer::with_runtime(ResolverConfig::new("/p"), Arc::new(runtime));
    let graph = analyzer.analyze(&["/p/a.ts".into()]);
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.node(std::path::Path::new("/p/a.ts")).unwrap().imports().len(), 3);
}
