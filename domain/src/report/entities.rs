//! Run results

use crate::core::usage::TokenUsage;
use crate::plan::dispatch::{DispatchPlan, Route};
use crate::plan::entities::TaskGraph;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of solving one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub node_id: String,
    pub kind: String,
    pub route: Route,
    pub logical_parameter: u32,
    pub resource_parameter: u32,
    pub artifact: String,
    /// Record lines of the solve, or `Execution error: ...` when it aborted
    pub report: String,
    pub success: bool,
    /// Oracle usage consumed while solving this node
    #[serde(default)]
    pub usage: TokenUsage,
}

/// Outcome of the calibration step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationOutcome {
    pub description: String,
    pub report: String,
    pub success: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSummary {
    pub total_resource_parameter: u64,
}

/// Node id to result.
pub type ResultMap = BTreeMap<String, ResultRecord>;

/// Everything one orchestration run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunPayload {
    pub plan: TaskGraph,
    pub enriched_plan: TaskGraph,
    pub dispatch_plan: DispatchPlan,
    pub calibration: Option<CalibrationOutcome>,
    pub results: ResultMap,
    pub resource_summary: ResourceSummary,
    pub final_report: String,
    /// Oracle usage over the whole run
    #[serde(default)]
    pub usage: TokenUsage,
}

impl RunPayload {
    pub fn success(&self) -> bool {
        overall_success(&self.results, self.calibration.as_ref())
    }
}

/// All nodes succeeded and, when calibration ran, it succeeded too.
pub fn overall_success(results: &ResultMap, calibration: Option<&CalibrationOutcome>) -> bool {
    results.values().all(|r| r.success) && calibration.is_none_or(|c| c.success)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, success: bool) -> ResultRecord {
        ResultRecord {
            node_id: id.to_string(),
            kind: "bv".to_string(),
            route: Route::Guided,
            logical_parameter: 3,
            resource_parameter: 4,
            artifact: String::new(),
            report: String::new(),
            success,
            usage: TokenUsage::default(),
        }
    }

    #[test]
    fn test_overall_success_without_nodes() {
        assert!(overall_success(&ResultMap::new(), None));
    }

    #[test]
    fn test_overall_success_requires_all_nodes() {
        let mut results = ResultMap::new();
        results.insert("a".to_string(), record("a", true));
        assert!(overall_success(&results, None));

        results.insert("b".to_string(), record("b", false));
        assert!(!overall_success(&results, None));
    }

    #[test]
    fn test_overall_success_requires_calibration() {
        let mut results = ResultMap::new();
        results.insert("a".to_string(), record("a", true));
        let failed = CalibrationOutcome {
            description: "calibrate qubit-1".to_string(),
            report: "Failed to calibrate".to_string(),
            success: false,
        };
        assert!(!overall_success(&results, Some(&failed)));
    }

    #[test]
    fn test_result_record_serializes_route_lowercase() {
        let json = serde_json::to_value(record("a", true)).unwrap();
        assert_eq!(json["route"], "guided");
        assert_eq!(json["usage"]["total"], 0);
    }
}
