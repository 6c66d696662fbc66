//! Candidate loop configuration from TOML (`[solve]` section)

use qforge_application::SolveParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Candidate loop configuration
///
/// # Example
///
/// ```toml
/// [solve]
/// candidate_count = 3
/// reflection_rounds = 3
/// history_capacity = 10
/// verify_timeout_seconds = 60
/// example_shots = 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSolveConfig {
    pub candidate_count: u32,
    pub reflection_rounds: u32,
    pub history_capacity: usize,
    pub verify_timeout_seconds: u64,
    pub example_shots: u32,
}

impl Default for FileSolveConfig {
    fn default() -> Self {
        let params = SolveParams::default();
        Self {
            candidate_count: params.candidate_count,
            reflection_rounds: params.reflection_rounds,
            history_capacity: params.history_capacity,
            verify_timeout_seconds: params.verify_timeout.as_secs(),
            example_shots: params.example_shots,
        }
    }
}

impl FileSolveConfig {
    pub fn to_solve_params(&self) -> SolveParams {
        SolveParams::default()
            .with_candidate_count(self.candidate_count)
            .with_reflection_rounds(self.reflection_rounds)
            .with_history_capacity(self.history_capacity)
            .with_verify_timeout(Duration::from_secs(self.verify_timeout_seconds))
            .with_example_shots(self.example_shots)
    }
}
