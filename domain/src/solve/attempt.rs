//! Attempts and the record lines that summarize them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One verified artifact within a candidate lineage. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateAttempt {
    candidate_index: u32,
    round_index: u32,
    artifact: String,
    diagnostic: String,
    success: bool,
}

impl CandidateAttempt {
    pub fn new(
        candidate_index: u32,
        round_index: u32,
        artifact: impl Into<String>,
        diagnostic: impl Into<String>,
        success: bool,
    ) -> Self {
        Self {
            candidate_index,
            round_index,
            artifact: artifact.into(),
            diagnostic: diagnostic.into(),
            success,
        }
    }

    pub fn candidate_index(&self) -> u32 {
        self.candidate_index
    }

    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn diagnostic(&self) -> &str {
        &self.diagnostic
    }

    pub fn success(&self) -> bool {
        self.success
    }
}

/// Human-readable trail entry for one step of a node solve.
///
/// Displays as `candidate #i, trial #j, success|failed, reason is <text>`.
/// Index 0 (`candidate #0, trial #0`) marks node-level events such as an
/// advisor failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub candidate_index: u32,
    pub trial_index: u32,
    pub success: bool,
    pub reason: String,
}

/// Reason recorded for a passing verification.
pub const PASSED_ALL_TESTS: &str = "passed all tests";

impl AttemptRecord {
    pub fn new(candidate_index: u32, trial_index: u32, success: bool, reason: impl Into<String>) -> Self {
        Self {
            candidate_index,
            trial_index,
            success,
            reason: reason.into(),
        }
    }

    pub fn passed(candidate_index: u32, trial_index: u32) -> Self {
        Self::new(candidate_index, trial_index, true, PASSED_ALL_TESTS)
    }

    pub fn failed(candidate_index: u32, trial_index: u32, reason: impl Into<String>) -> Self {
        Self::new(candidate_index, trial_index, false, reason)
    }

    pub fn advisor_failed(error: impl fmt::Display) -> Self {
        Self::failed(0, 0, format!("advisor failed: {}", error))
    }

    pub fn generation_failed(candidate_index: u32, error: impl fmt::Display) -> Self {
        Self::failed(candidate_index, 1, format!("generation error: {}", error))
    }

    pub fn regeneration_failed(
        candidate_index: u32,
        trial_index: u32,
        error: impl fmt::Display,
    ) -> Self {
        Self::failed(
            candidate_index,
            trial_index,
            format!("regeneration error: {}", error),
        )
    }

    /// Record for a verified attempt.
    pub fn from_attempt(attempt: &CandidateAttempt) -> Self {
        if attempt.success() {
            Self::passed(attempt.candidate_index(), attempt.round_index())
        } else {
            Self::failed(
                attempt.candidate_index(),
                attempt.round_index(),
                attempt.diagnostic(),
            )
        }
    }
}

impl fmt::Display for AttemptRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "candidate #{}, trial #{}, {}, reason is {}",
            self.candidate_index,
            self.trial_index,
            if self.success { "success" } else { "failed" },
            self.reason
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_line_format() {
        assert_eq!(
            AttemptRecord::passed(2, 1).to_string(),
            "candidate #2, trial #1, success, reason is passed all tests"
        );
        assert_eq!(
            AttemptRecord::failed(1, 3, "QASM parsing failed").to_string(),
            "candidate #1, trial #3, failed, reason is QASM parsing failed"
        );
    }

    #[test]
    fn test_advisor_failure_is_node_level() {
        let record = AttemptRecord::advisor_failed("no examples");
        assert_eq!(
            record.to_string(),
            "candidate #0, trial #0, failed, reason is advisor failed: no examples"
        );
    }

    #[test]
    fn test_generation_and_regeneration_records() {
        assert_eq!(
            AttemptRecord::generation_failed(3, "timeout").to_string(),
            "candidate #3, trial #1, failed, reason is generation error: timeout"
        );
        assert_eq!(
            AttemptRecord::regeneration_failed(1, 2, "rate limited").to_string(),
            "candidate #1, trial #2, failed, reason is regeneration error: rate limited"
        );
    }

    #[test]
    fn test_from_attempt() {
        let failed = CandidateAttempt::new(1, 2, "OPENQASM 3.0;", "wrong counts", false);
        assert_eq!(
            AttemptRecord::from_attempt(&failed),
            AttemptRecord::failed(1, 2, "wrong counts")
        );

        let passed = CandidateAttempt::new(2, 1, "OPENQASM 3.0;", "ok", true);
        assert_eq!(AttemptRecord::from_attempt(&passed), AttemptRecord::passed(2, 1));
    }
}
