//! Plan construction: decompose, enrich, dispatch.
//!
//! Decomposition and enrichment never fail: an oracle error or an unparsable
//! answer degrades to the empty graph (decompose) or the unchanged input
//! graph (enrich), logged at `warn`.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::kernel_catalog::SchemaStore;
use crate::ports::synthesis_oracle::{SynthesisOracle, max_output};
use qforge_domain::{
    DispatchPlan, DispatchPolicy, PlanPromptTemplate, TaskGraph, build_dispatch_plan,
    parse_task_graph, truncate,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct PlanTaskUseCase {
    oracle: Arc<dyn SynthesisOracle>,
    schemas: Arc<dyn SchemaStore>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl PlanTaskUseCase {
    pub fn new(oracle: Arc<dyn SynthesisOracle>, schemas: Arc<dyn SchemaStore>) -> Self {
        Self {
            oracle,
            schemas,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Decompose a request into a task graph; the empty graph on any failure.
    pub async fn decompose(&self, request: &str) -> TaskGraph {
        let graph = match self
            .oracle
            .generate(
                &PlanPromptTemplate::decompose_prompt(request),
                PlanPromptTemplate::decompose_system(),
                max_output::DECOMPOSE,
            )
            .await
        {
            Ok(text) => match parse_task_graph(&text) {
                Ok(graph) => graph,
                Err(e) => {
                    warn!("Could not parse decomposition: {}", e);
                    debug!("Decomposition response: {}", truncate(&text, 500));
                    TaskGraph::empty()
                }
            },
            Err(e) => {
                warn!("Decomposition failed: {}", e);
                TaskGraph::empty()
            }
        };

        info!(
            "Decomposed request into {} node(s), {} edge(s)",
            graph.nodes.len(),
            graph.edges.len()
        );
        self.log_graph("plan_decomposed", &graph);
        graph
    }

    /// Refine parameters and edge descriptions; the input graph on any failure.
    pub async fn enrich(&self, request: &str, graph: &TaskGraph) -> TaskGraph {
        if !graph.has_nodes() {
            debug!("Empty graph, skipping enrichment");
            self.log_graph("plan_enriched", graph);
            return graph.clone();
        }

        let mut schemas = Vec::new();
        for kind in graph.distinct_kinds() {
            let schema = self.schemas.lookup(&kind).await;
            if schema.trim().is_empty() {
                debug!("No schema for {}", kind);
            }
            schemas.push((kind, schema));
        }
        let appendix = PlanPromptTemplate::schema_appendix(&schemas);

        let graph_json = match serde_json::to_string_pretty(graph) {
            Ok(json) => json,
            Err(e) => {
                warn!("Could not serialize graph for enrichment: {}", e);
                return graph.clone();
            }
        };

        let enriched = match self
            .oracle
            .generate(
                &PlanPromptTemplate::enrich_prompt(request, &graph_json),
                &PlanPromptTemplate::enrich_system(&appendix),
                max_output::ENRICH,
            )
            .await
        {
            Ok(text) => match parse_task_graph(&text) {
                Ok(enriched) if enriched.has_nodes() => enriched,
                Ok(_) => {
                    warn!("Enrichment dropped every node, keeping the decomposed graph");
                    graph.clone()
                }
                Err(e) => {
                    warn!("Could not parse enrichment: {}", e);
                    graph.clone()
                }
            },
            Err(e) => {
                warn!("Enrichment failed: {}", e);
                graph.clone()
            }
        };

        self.log_graph("plan_enriched", &enriched);
        enriched
    }

    /// Route every node; warns about edges whose endpoints are unknown.
    pub fn dispatch(&self, graph: &TaskGraph, policy: &DispatchPolicy) -> DispatchPlan {
        for edge in graph.dangling_edges() {
            warn!(
                "Edge {} -> {} references an unknown node",
                edge.source, edge.target
            );
        }

        let plan = build_dispatch_plan(graph, policy);
        for entry in plan.values() {
            debug!("{} ({}) -> {}", entry.node_id, entry.kind, entry.route);
        }

        self.conversation_logger.log(ConversationEvent::new(
            "dispatch_built",
            serde_json::json!({ "dispatch": plan }),
        ));
        plan
    }

    fn log_graph(&self, event_type: &'static str, graph: &TaskGraph) {
        self.conversation_logger.log(ConversationEvent::new(
            event_type,
            serde_json::json!({ "graph": graph }),
        ));
    }
}
