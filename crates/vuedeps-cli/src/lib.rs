//! vuedeps CLI - dependency graphs and circular import reports for Vue
//! projects.
//!
//! - [`cli`] - argument definitions
//! - [`commands`] - command implementations
//! - [`error`] - error types and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`walk`] - project file enumeration
//! - [`ui`] - terminal output

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;
pub mod walk;

pub use error::{CliError, Result, ResultExt};
