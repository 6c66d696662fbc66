//! Solve parameters: candidate loop control.
//!
//! [`SolveParams`] groups the static parameters that control the candidate
//! solve loop in [`SolveCandidateUseCase`](crate::use_cases::solve_candidate::SolveCandidateUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Candidate loop control parameters.
///
/// Raw values are kept as configured; the accessors apply the lower bounds
/// the loop relies on (at least one candidate, at least one history slot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveParams {
    /// Independent candidate lineages per node.
    pub candidate_count: u32,
    /// Reflect/regenerate rounds per lineage (verifications = rounds + 1).
    pub reflection_rounds: u32,
    /// Attempts kept in a lineage's reflection history.
    pub history_capacity: usize,
    /// Watchdog around one review (verification) call.
    pub verify_timeout: Duration,
    /// Example sizes fetched by the guided advisor.
    pub example_shots: u32,
}

impl Default for SolveParams {
    fn default() -> Self {
        Self {
            candidate_count: 3,
            reflection_rounds: 3,
            history_capacity: 10,
            verify_timeout: Duration::from_secs(60),
            example_shots: 3,
        }
    }
}

impl SolveParams {
    // ==================== Builder Methods ====================

    pub fn with_candidate_count(mut self, count: u32) -> Self {
        self.candidate_count = count;
        self
    }

    pub fn with_reflection_rounds(mut self, rounds: u32) -> Self {
        self.reflection_rounds = rounds;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_verify_timeout(mut self, timeout: Duration) -> Self {
        self.verify_timeout = timeout;
        self
    }

    pub fn with_example_shots(mut self, shots: u32) -> Self {
        self.example_shots = shots;
        self
    }

    // ==================== Effective Values ====================

    pub fn candidates(&self) -> u32 {
        self.candidate_count.max(1)
    }

    /// Verification rounds per lineage.
    pub fn rounds(&self) -> u32 {
        self.reflection_rounds.saturating_add(1)
    }

    pub fn capacity(&self) -> usize {
        self.history_capacity.max(1)
    }

    /// Upper bound on verification calls for one node.
    pub fn max_verifications(&self) -> u32 {
        self.candidates().saturating_mul(self.rounds())
    }
}
