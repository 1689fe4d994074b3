//! Logging setup for the vuedeps CLI.
//!
//! Library crates emit `tracing` events; this installs the subscriber that
//! prints them to stderr.
//!
//! - `--verbose`: debug level for vuedeps crates
//! - `--quiet`: errors only
//! - otherwise `RUST_LOG`, falling back to info level

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str =
    "vuedeps=debug,vuedeps_cli=debug,vuedeps_analysis=debug,vuedeps_config=debug,vuedeps_graph=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "warn,vuedeps_cli=info,vuedeps_analysis=info,vuedeps_config=info";

/// Filter directives for the given verbosity flags.
fn filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the global tracing subscriber. Call once, before logging.
///
/// ```rust,no_run
/// use vuedeps_cli::logger::init_logger;
///
/// init_logger(false, false, false);
/// tracing::info!("analysis started");
/// ```
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter(verbose, quiet))
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_filter_enables_debug() {
        let filter = filter(true, false).to_string();
        assert!(filter.contains("vuedeps_analysis=debug"));
    }

    #[test]
    fn quiet_filter_is_errors_only() {
        assert_eq!(filter(false, true).to_string(), "error");
    }
}
