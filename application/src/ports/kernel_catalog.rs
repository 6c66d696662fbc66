//! Per-kind reference material ports
//!
//! Each kind may ship a schema (used by plan enrichment), example artifacts
//! at several sizes (used by the guided advisor) and a tool library
//! description (used by the tools advisor).

use async_trait::async_trait;
use qforge_domain::ArtifactExample;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("No {what} available for kind '{kind}'")]
    NotFound { what: &'static str, kind: String },

    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid catalog entry {path}: {message}")]
    Invalid { path: String, message: String },
}

/// Schema text per kind.
#[async_trait]
pub trait SchemaStore: Send + Sync {
    /// Schema for `kind`, or an empty string when there is none.
    async fn lookup(&self, kind: &str) -> String;
}

/// Example artifacts per kind.
#[async_trait]
pub trait ExampleSource: Send + Sync {
    /// Examples for sizes `2..2 + shots`, in ascending size order.
    async fn examples(&self, kind: &str, shots: u32) -> Result<Vec<ArtifactExample>, CatalogError>;
}

/// Tool library descriptions per kind.
#[async_trait]
pub trait ToolCatalog: Send + Sync {
    /// Rendered description of every function in the kind's tool library.
    async fn describe(&self, kind: &str) -> Result<String, CatalogError>;
}
