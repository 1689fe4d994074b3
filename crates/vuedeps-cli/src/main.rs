//! vuedeps entry point: parse arguments, set up logging, dispatch.

use clap::Parser;
use miette::Result;
use vuedeps_cli::{cli, commands, error, logger};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    if args.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let result = match args.command {
        cli::Command::Analyze(analyze_args) => commands::analyze_execute(analyze_args),
    };

    result.map_err(error::cli_error_to_miette)
}
