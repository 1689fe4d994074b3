//! Terminal output for analysis results.

use std::io;

use console::{Term, style};
use vuedeps_graph::{GraphStatistics, ImportCycle};

/// Print the graph summary.
pub fn print_summary(term: &Term, stats: &GraphStatistics) -> io::Result<()> {
    term.write_line(&format!(
        "{} Analyzed {} files, {} imports",
        style("✔").green().bold(),
        style(stats.node_count).cyan(),
        style(stats.edge_count).cyan()
    ))?;

    for (kind, count) in &stats.by_file_kind {
        term.write_line(&format!("  {:<12} {count}", format!("{kind}:")))?;
    }
    if !stats.by_script_type.is_empty() {
        term.write_line(&format!("{}", style("Vue components by script style").bold()))?;
        for (script_type, count) in &stats.by_script_type {
            term.write_line(&format!("  {:<12} {count}", format!("{script_type}:")))?;
        }
    }
    if stats.orphan_count > 0 {
        term.write_line(&format!(
            "{} {} files have no resolved imports in either direction",
            style("ℹ").blue().bold(),
            stats.orphan_count
        ))?;
    }
    Ok(())
}

/// Print each cycle as a chain, or a note that there are none.
pub fn print_cycles(term: &Term, cycles: &[ImportCycle]) -> io::Result<()> {
    if cycles.is_empty() {
        return term.write_line(&format!(
            "{} No circular imports found",
            style("✔").green().bold()
        ));
    }

    term.write_line(&format!(
        "{} {} circular import chains",
        style("⚠").yellow().bold(),
        style(cycles.len()).yellow()
    ))?;
    for cycle in cycles {
        let marker = if cycle.is_self_import() { " (self-import)" } else { "" };
        term.write_line(&format!("  {}{marker}", cycle.format_chain()))?;
    }
    Ok(())
}

/// Confirmation after writing an output file.
pub fn print_written(term: &Term, what: &str, path: &std::path::Path) -> io::Result<()> {
    term.write_line(&format!(
        "{} Wrote {what} to {}",
        style("✔").green().bold(),
        style(path.display()).bold()
    ))
}
