//! Artifact verifier ports
//!
//! A verifier runs the per-kind functional test against a candidate artifact.
//! Verifiers are obtained per kind from a [`VerifierLoader`]; a missing test
//! harness makes the kind unsolvable.

use async_trait::async_trait;
use qforge_domain::Verification;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifierError {
    #[error("Verifier harness not found for kind '{kind}': {path}")]
    HarnessNotFound { kind: String, path: String },

    #[error("Verifier failed to run: {0}")]
    Execution(String),

    #[error("Verifier produced invalid output: {0}")]
    InvalidOutput(String),
}

/// Functional test for one kind.
#[async_trait]
pub trait ArtifactVerifier: Send + Sync {
    /// Test `artifact` at `size`. A failing test is `Ok` with `success = false`.
    async fn test(&self, artifact: &str, size: u32) -> Result<Verification, VerifierError>;
}

/// Resolves the verifier for a kind.
#[async_trait]
pub trait VerifierLoader: Send + Sync {
    async fn load(&self, kind: &str) -> Result<Arc<dyn ArtifactVerifier>, VerifierError>;
}
