//! Script runner port
//!
//! Executes a generated script with the kind's tool library loaded and
//! returns what it printed.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Tool library not found for kind '{0}'")]
    ToolsNotFound(String),

    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("{0}")]
    Failed(String),

    #[error("Failed to start script: {0}")]
    Spawn(String),
}

#[async_trait]
pub trait ScriptRunner: Send + Sync {
    /// Run `script` for `kind` and return its standard output.
    async fn run(&self, kind: &str, script: &str) -> Result<String, ScriptError>;
}
