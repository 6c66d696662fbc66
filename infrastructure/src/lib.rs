//! Infrastructure layer for qforge
//!
//! Adapters implementing the application ports: the HTTP synthesis oracle,
//! the kernel tree (schemas, examples, tool libraries, test harnesses),
//! calibration file editing, transcripts and configuration loading.

pub mod calibration;
pub mod config;
pub mod kernels;
pub mod logging;
pub mod oracle;

pub use calibration::FileCalibrationApplier;
pub use config::{
    ConfigLoader, ConfigValidationError, FileCalibrationConfig, FileConfig, FileDispatchConfig,
    FileKernelsConfig, FileLoggingConfig, FileOracleConfig, FileSolveConfig,
};
pub use kernels::{
    CommandScriptRunner, CommandVerifierLoader, FsExampleSource, FsSchemaStore, FsToolCatalog,
    KernelLayout,
};
pub use logging::JsonlConversationLogger;
pub use oracle::{HttpSynthesisOracle, OracleProvider, RetryPolicy};
