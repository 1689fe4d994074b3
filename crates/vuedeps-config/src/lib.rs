//! Configuration for vuedeps.
//!
//! Settings come from several layers, lowest priority first:
//!
//! 1. built-in defaults
//! 2. `compilerOptions.baseUrl` and `compilerOptions.paths` of
//!    `tsconfig.json` / `jsconfig.json`, following `extends`
//! 3. `vuedeps.toml`, or the `vuedeps` field of `package.json`
//! 4. `VUEDEPS_*` environment variables
//! 5. explicit overrides (CLI flags)
//!
//! ```no_run
//! use std::path::Path;
//! use vuedeps_config::ConfigLoader;
//!
//! let config = ConfigLoader::new(".").load()?;
//! let resolver = config.to_resolver_config(Path::new("."));
//! # Ok::<(), vuedeps_config::ConfigError>(())
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod loading;
pub mod tsconfig;

pub use config::{ConfigOverrides, DEFAULT_EXTENSIONS, DEFAULT_IGNORE, VuedepsConfig};
pub use discovery::ConfigDiscovery;
pub use error::{ConfigError, Result};
pub use loading::{ConfigLoader, ENV_PREFIX};
pub use tsconfig::{TsConfigPaths, find_tsconfig, load_tsconfig};
