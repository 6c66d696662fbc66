//! Application-level configuration.
//!
//! - [`SolveParams`]: candidate loop control (candidates, rounds, history, watchdog)
//! - [`ForgeConfig`]: container handed to the orchestrator

pub mod forge_config;
pub mod solve_params;

pub use forge_config::{CalibrationParams, ForgeConfig};
pub use solve_params::SolveParams;
