//! Workflow configuration container.
//!
//! [`ForgeConfig`] groups the configuration slices the orchestrator hands to
//! its use cases. Use cases receive only the slice they need.

use crate::config::SolveParams;
use qforge_domain::{ConfigIssue, ConfigIssueCode, DispatchPolicy};

/// Calibration loop parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalibrationParams {
    /// Oracle attempts before giving up.
    pub max_trials: u32,
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self { max_trials: 3 }
    }
}

/// Configuration container for a workflow run.
#[derive(Debug, Clone, Default)]
pub struct ForgeConfig {
    solve: SolveParams,
    dispatch: DispatchPolicy,
    calibration: CalibrationParams,
}

impl ForgeConfig {
    pub fn new(solve: SolveParams, dispatch: DispatchPolicy, calibration: CalibrationParams) -> Self {
        Self {
            solve,
            dispatch,
            calibration,
        }
    }

    // ==================== Accessors ====================

    pub fn solve(&self) -> &SolveParams {
        &self.solve
    }

    pub fn dispatch(&self) -> &DispatchPolicy {
        &self.dispatch
    }

    pub fn calibration(&self) -> &CalibrationParams {
        &self.calibration
    }

    // ==================== Validation ====================

    /// Issues in the assembled configuration (warnings only; every value has a usable fallback).
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for kind in self.dispatch.overlapping_kinds() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OverlappingKinds,
                format!(
                    "kind '{}' is listed for both guided and tools routes; tools will be used",
                    kind
                ),
            ));
        }

        if self.solve.candidate_count == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroCandidates,
                "solve.candidate_count is 0; one candidate will be used",
            ));
        }

        if self.solve.verify_timeout.is_zero() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroTimeout,
                "solve.verify_timeout_seconds is 0; every verification will time out",
            ));
        }

        issues
    }
}
