//! `vuedeps analyze`.

use std::fs;
use std::path::{Path, PathBuf};

use console::Term;
use indexmap::IndexMap;
use tracing::info;
use vuedeps_analysis::{DependencyAnalyzer, NativeRuntime, Runtime};
use vuedeps_config::{ConfigLoader, ConfigOverrides};

use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result, ResultExt};
use crate::{ui, walk};

/// Run the analyze command.
pub fn analyze_execute(args: AnalyzeArgs) -> Result<()> {
    let dir = project_dir(&args.root)?;

    let mut loader = ConfigLoader::new(&dir).with_overrides(overrides(&args));
    if let Some(config_file) = &args.config {
        loader = loader.with_config_file(config_file);
    }
    let config = loader.load()?;

    let root = config.root_dir(&dir);
    if !NativeRuntime.is_dir(&root) {
        return Err(CliError::FileNotFound(root));
    }

    let files = walk::collect_files(&root, &config)?;
    info!(files = files.len(), root = %root.display(), "analyzing project");

    let mut analyzer = DependencyAnalyzer::new(config.to_resolver_config(&dir));
    let graph = analyzer.analyze(&files);

    // Keep stdout clean for the JSON document when it goes there.
    let json_to_stdout = matches!(args.json, Some(None));
    let term = if json_to_stdout { Term::stderr() } else { Term::stdout() };

    ui::print_summary(&term, &graph.statistics())?;

    match &args.json {
        Some(Some(path)) => {
            write_output(path, &graph.to_json()?)?;
            ui::print_written(&term, "graph JSON", path)?;
        }
        Some(None) => println!("{}", graph.to_json()?),
        None => {}
    }

    if let Some(path) = &args.dot {
        write_output(path, &graph.to_dot())?;
        ui::print_written(&term, "DOT graph", path)?;
    }

    if args.cycles {
        ui::print_cycles(&term, &analyzer.find_cycles())?;
    }

    Ok(())
}

/// Absolute, normalized project directory; it must exist.
fn project_dir(root: &Path) -> Result<PathBuf> {
    let dir = std::path::absolute(root).with_path(root)?;
    let dir = path_clean::clean(dir);
    if !NativeRuntime.is_dir(&dir) {
        return Err(CliError::FileNotFound(dir));
    }
    Ok(dir)
}

fn overrides(args: &AnalyzeArgs) -> ConfigOverrides {
    let mut paths: IndexMap<String, Vec<String>> = IndexMap::new();
    for (pattern, target) in &args.aliases {
        paths.entry(pattern.clone()).or_default().push(target.clone());
    }

    ConfigOverrides {
        base_url: args.base_url.clone(),
        paths,
        resolve_node_modules: args.no_node_modules.then_some(false),
        ignore: args.ignore.clone(),
        tsconfig: args.tsconfig.clone(),
        ..Default::default()
    }
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_path(parent)?;
    }
    fs::write(path, content).with_path(path)
}
