//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod artifact_verifier;
pub mod calibration_applier;
pub mod conversation_logger;
pub mod kernel_catalog;
pub mod progress;
pub mod script_runner;
pub mod synthesis_oracle;
