//! CLI command implementations.

pub mod analyze;

pub use analyze::analyze_execute;
