//! Kernel tree adapters: schemas, examples, tool libraries and test harnesses.

mod catalog;
mod layout;
mod process;
mod script_runner;
mod verifier;

pub use catalog::{FsExampleSource, FsSchemaStore, FsToolCatalog, example_size, parse_tool_description};
pub use layout::KernelLayout;
pub use script_runner::CommandScriptRunner;
pub use verifier::{CommandVerifier, CommandVerifierLoader, parse_verdict};
