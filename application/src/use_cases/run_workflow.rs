//! Run Workflow use case (the orchestrator).
//!
//! decompose → enrich → dispatch → calibrate → solve per node → aggregate.
//!
//! Everything runs sequentially on the caller's task. Nodes are solved in the
//! enriched graph's order; edges are descriptive and never gate scheduling.
//! A [`SolveError`](super::solve_candidate::SolveError) is contained at the
//! node boundary: the node gets a failed record and the run continues.

use crate::config::ForgeConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{SolveProgressNotifier, WorkflowStage};
use crate::ports::synthesis_oracle::SynthesisOracle;
use crate::use_cases::calibrate::CalibrateUseCase;
use crate::use_cases::plan_task::PlanTaskUseCase;
use crate::use_cases::solve_candidate::{SolveCandidateUseCase, SolveRequest};
use crate::use_cases::strategy::Strategies;
use qforge_domain::{
    ResourceSummary, ResultMap, ResultRecord, RunPayload, TaskNode, render_final_report, truncate,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum RunWorkflowError {
    #[error("Request is empty")]
    EmptyRequest,
}

pub struct RunWorkflowUseCase {
    oracle: Arc<dyn SynthesisOracle>,
    planner: PlanTaskUseCase,
    solver: SolveCandidateUseCase,
    calibrator: CalibrateUseCase,
    strategies: Strategies,
    config: ForgeConfig,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl RunWorkflowUseCase {
    pub fn new(
        oracle: Arc<dyn SynthesisOracle>,
        planner: PlanTaskUseCase,
        solver: SolveCandidateUseCase,
        calibrator: CalibrateUseCase,
        strategies: Strategies,
        config: ForgeConfig,
    ) -> Self {
        Self {
            oracle,
            planner,
            solver,
            calibrator,
            strategies,
            config,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Set the transcript logger for this use case and every inner one.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.planner = self.planner.with_conversation_logger(logger.clone());
        self.solver = self.solver.with_conversation_logger(logger.clone());
        self.calibrator = self.calibrator.with_conversation_logger(logger.clone());
        self.conversation_logger = logger;
        self
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    pub async fn execute(
        &self,
        request: &str,
        progress: &dyn SolveProgressNotifier,
    ) -> Result<RunPayload, RunWorkflowError> {
        let request = request.trim();
        if request.is_empty() {
            return Err(RunWorkflowError::EmptyRequest);
        }
        info!("Starting workflow: {}", truncate(request, 100));
        let run_start = self.oracle.usage().snapshot();

        progress.on_stage_start(WorkflowStage::Decompose);
        let plan = self.planner.decompose(request).await;

        progress.on_stage_start(WorkflowStage::Enrich);
        let enriched_plan = self.planner.enrich(request, &plan).await;
        progress.on_plan_ready(&enriched_plan);

        progress.on_stage_start(WorkflowStage::Dispatch);
        let dispatch_plan = self.planner.dispatch(&enriched_plan, self.config.dispatch());

        let calibration = match plan.calibration_request() {
            Some(description) => {
                progress.on_stage_start(WorkflowStage::Calibrate);
                let outcome = self.calibrator.calibrate(description).await;
                progress.on_calibration_complete(outcome.success);
                Some(outcome)
            }
            None => None,
        };

        progress.on_stage_start(WorkflowStage::Solve);
        let nodes: Vec<&TaskNode> = enriched_plan
            .nodes
            .iter()
            .filter(|n| dispatch_plan.contains_key(&n.id))
            .collect();
        let total = nodes.len();
        let mut results = ResultMap::new();

        for (index, node) in nodes.into_iter().enumerate() {
            let Some(entry) = dispatch_plan.get(&node.id) else {
                continue;
            };
            progress.on_node_start(&node.id, &entry.kind, entry.route, index + 1, total);

            let before = self.oracle.usage().snapshot();
            let strategy = self.strategies.for_route(entry.route);
            let solve_request = SolveRequest::new(&node.id, &entry.kind, node.logical_parameter);

            let (artifact, report, success) =
                match self.solver.execute(strategy, &solve_request, progress).await {
                    Ok(outcome) => {
                        let report = outcome.report();
                        (outcome.artifact, report, outcome.success)
                    }
                    Err(e) => {
                        error!("Node {} aborted: {}", node.id, e);
                        (String::new(), format!("Execution error: {}", e), false)
                    }
                };

            let record = ResultRecord {
                node_id: node.id.clone(),
                kind: entry.kind.clone(),
                route: entry.route,
                logical_parameter: node.logical_parameter,
                resource_parameter: node.resource_parameter,
                artifact,
                report,
                success,
                usage: self.oracle.usage().since(&before),
            };

            self.conversation_logger.log(ConversationEvent::new(
                "node_solved",
                serde_json::json!({
                    "node_id": record.node_id,
                    "kind": record.kind,
                    "route": record.route,
                    "success": record.success,
                    "usage": record.usage,
                }),
            ));
            progress.on_node_complete(&node.id, success);
            results.insert(node.id.clone(), record);
        }

        let resource_summary = ResourceSummary {
            total_resource_parameter: enriched_plan.total_resource(),
        };
        let final_report = render_final_report(
            request,
            &enriched_plan,
            &results,
            &resource_summary,
            calibration.as_ref(),
        );

        let payload = RunPayload {
            plan,
            enriched_plan,
            dispatch_plan,
            calibration,
            results,
            resource_summary,
            final_report,
            usage: self.oracle.usage().since(&run_start),
        };

        info!(
            "Workflow finished: {} node(s), success = {}",
            payload.results.len(),
            payload.success()
        );
        Ok(payload)
    }
}
