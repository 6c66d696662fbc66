//! Result of solving one node.

use super::attempt::AttemptRecord;
use serde::{Deserialize, Serialize};

/// Final artifact of a node solve plus the trail of records that led to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveOutcome {
    /// Verified artifact on success; otherwise the latest artifact of the last lineage
    pub artifact: String,
    pub records: Vec<AttemptRecord>,
    pub success: bool,
    /// Number of verification calls made
    pub verifications: u32,
}

impl SolveOutcome {
    /// Record lines joined with newlines.
    pub fn report(&self) -> String {
        self.records
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
