//! Synthesis oracle port
//!
//! Defines the interface for the generative text service used for planning,
//! advice, code generation and reflection.

use async_trait::async_trait;
use qforge_domain::UsageCounter;
use thiserror::Error;

/// Errors that can occur during oracle calls
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty response")]
    EmptyResponse,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Generative text service.
///
/// Implementations own a [`UsageCounter`] and add the usage of every call to
/// it; callers read deltas with `usage().snapshot()` / `usage().since(..)`.
#[async_trait]
pub trait SynthesisOracle: Send + Sync {
    /// Generate text for `prompt` under `system` context, bounded by `max_output` units.
    async fn generate(&self, prompt: &str, system: &str, max_output: u32) -> Result<String, OracleError>;

    /// Usage accumulated by this client.
    fn usage(&self) -> &UsageCounter;
}

/// Output bounds per oracle call site.
pub mod max_output {
    pub const DECOMPOSE: u32 = 10_240;
    pub const ENRICH: u32 = 4_096;
    pub const ADVICE: u32 = 1_024;
    pub const CODE: u32 = 10_240;
    pub const REFLECTION: u32 = 512;
    pub const CALIBRATION: u32 = 10_240;
}
