//! Progress notification port
//!
//! Defines the interface for reporting progress during a workflow run.

use qforge_domain::{AttemptRecord, Route, TaskGraph};

/// Workflow stage announced before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStage {
    Decompose,
    Enrich,
    Dispatch,
    Calibrate,
    Solve,
}

impl WorkflowStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStage::Decompose => "decompose",
            WorkflowStage::Enrich => "enrich",
            WorkflowStage::Dispatch => "dispatch",
            WorkflowStage::Calibrate => "calibrate",
            WorkflowStage::Solve => "solve",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WorkflowStage::Decompose => "Generating plan",
            WorkflowStage::Enrich => "Reviewing plan",
            WorkflowStage::Dispatch => "Assigning tasks",
            WorkflowStage::Calibrate => "Calibrating",
            WorkflowStage::Solve => "Solving nodes",
        }
    }
}

/// Callback for progress updates during a run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain log lines, ...).
pub trait SolveProgressNotifier: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: WorkflowStage);

    /// Called when a node solve starts (`index` is 1-based)
    fn on_node_start(&self, node_id: &str, kind: &str, route: Route, index: usize, total: usize);

    /// Called for every record produced while solving a node
    fn on_attempt(&self, _node_id: &str, _record: &AttemptRecord) {}

    /// Called when a node solve finishes
    fn on_node_complete(&self, node_id: &str, success: bool);

    /// Called once the enriched graph is known
    fn on_plan_ready(&self, _graph: &TaskGraph) {}

    /// Called when calibration finishes
    fn on_calibration_complete(&self, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl SolveProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: WorkflowStage) {}
    fn on_node_start(&self, _node_id: &str, _kind: &str, _route: Route, _index: usize, _total: usize) {}
    fn on_node_complete(&self, _node_id: &str, _success: bool) {}
}
