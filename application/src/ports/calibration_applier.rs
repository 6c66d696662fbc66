//! Calibration applier port

use async_trait::async_trait;
use qforge_domain::CalibrationInstruction;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalibrationError {
    #[error("Parameter {name} not found in {file}")]
    ParameterNotFound { name: String, file: String },

    #[error("Failed to access {file}: {message}")]
    Io { file: String, message: String },
}

/// Writes calibration values into the backend description.
#[async_trait]
pub trait CalibrationApplier: Send + Sync {
    /// Apply every instruction; returns the number of constants rewritten.
    ///
    /// A batch is applied atomically: if any name is missing nothing is written.
    async fn apply(&self, instructions: &[CalibrationInstruction]) -> Result<usize, CalibrationError>;
}
