//! Command-line interface definition.
//!
//! - `vuedeps analyze [ROOT]` - build the dependency graph of a project

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// vuedeps - dependency graphs for Vue/JS/TS projects
#[derive(Parser, Debug)]
#[command(
    name = "vuedeps",
    version,
    about = "Dependency graphs and circular import reports for Vue projects"
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a project and build its dependency graph
    ///
    /// Enumerates .vue/.ts/.tsx/.js/.jsx files under ROOT, parses their
    /// imports and exports, resolves import specifiers and prints a summary.
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Project directory
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Config file to use instead of vuedeps.toml / package.json discovery
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// tsconfig/jsconfig providing baseUrl and paths
    #[arg(long, value_name = "FILE")]
    pub tsconfig: Option<PathBuf>,

    /// Base directory for non-relative imports, relative to the root
    #[arg(long, value_name = "DIR")]
    pub base_url: Option<PathBuf>,

    /// Path alias, repeatable
    ///
    /// Examples:
    ///   --alias '@/*=src/*'
    ///   --alias '~/*=src/*' --alias '~/*=lib/*'
    #[arg(long = "alias", value_name = "PATTERN=TARGET", value_parser = parse_alias)]
    pub aliases: Vec<(String, String)>,

    /// Do not resolve bare specifiers through node_modules
    #[arg(long)]
    pub no_node_modules: bool,

    /// Additional glob of files to skip, repeatable
    #[arg(long = "ignore", value_name = "GLOB")]
    pub ignore: Vec<String>,

    /// Write the graph as JSON to stdout, or to FILE with --json=FILE
    #[arg(long, value_name = "FILE", num_args = 0..=1, require_equals = true)]
    pub json: Option<Option<PathBuf>>,

    /// Write the graph in Graphviz DOT format
    #[arg(long, value_name = "FILE")]
    pub dot: Option<PathBuf>,

    /// Report circular imports
    #[arg(long)]
    pub cycles: bool,
}

/// Parse `PATTERN=TARGET`.
pub fn parse_alias(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((pattern, target)) if !pattern.is_empty() && !target.is_empty() => {
            Ok((pattern.to_string(), target.to_string()))
        }
        _ => Err(format!("expected PATTERN=TARGET, got '{value}'")),
    }
}
