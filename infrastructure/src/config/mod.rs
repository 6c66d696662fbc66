//! Configuration file loading for qforge
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `QFORGE_`-prefixed environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./qforge.toml` or `./.qforge.toml`
//! 4. Global: `$XDG_CONFIG_HOME/qforge/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileCalibrationConfig, FileConfig, FileDispatchConfig,
    FileKernelsConfig, FileLoggingConfig, FileOracleConfig, FileSolveConfig,
};
pub use loader::ConfigLoader;
