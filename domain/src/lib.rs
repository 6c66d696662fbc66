//! Domain layer for qforge
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Task graph
//!
//! A request is decomposed into a [`TaskGraph`]: sub-tasks ([`TaskNode`])
//! sized by a logical and a resource parameter, connected by descriptive
//! transfers ([`TaskEdge`]). Every node is routed to a synthesis [`Route`]
//! by a [`DispatchPolicy`].
//!
//! ## Candidate repair
//!
//! Each node is solved by independent candidate lineages. Every verified
//! artifact becomes a [`CandidateAttempt`]; failures accumulate in a bounded
//! [`ReflectionHistory`] that drives the next repair prompt.

pub mod calibration;
pub mod config;
pub mod core;
pub mod plan;
pub mod prompt;
pub mod report;
pub mod solve;

// Re-export commonly used types
pub use calibration::{CalibrationInstruction, parse_calibration_instructions};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::DomainError,
    string::{normalize_kind, single_line, truncate},
    usage::{TokenUsage, UsageCounter, UsageSnapshot},
};
pub use plan::{
    dispatch::{DispatchEntry, DispatchPlan, DispatchPolicy, Route, build_dispatch_plan},
    entities::{NO_CALIBRATION, TaskEdge, TaskGraph, TaskNode},
    json_extract::{extract_first_array, extract_first_object},
    plan_parser::{PlanParseError, parse_task_graph, parse_task_graph_json},
};
pub use prompt::{
    CalibrationPromptTemplate, FALLBACK_REFLECTION, GuidedPromptTemplate, PlanPromptTemplate,
    ReflectionPromptTemplate, ToolsPromptTemplate,
};
pub use report::{
    entities::{
        CalibrationOutcome, ResourceSummary, ResultMap, ResultRecord, RunPayload, overall_success,
    },
    render::render_final_report,
};
pub use solve::{
    artifact::{clean_circuit_output, clean_script_output, is_circuit_artifact, looks_like_circuit},
    attempt::{AttemptRecord, CandidateAttempt, PASSED_ALL_TESTS},
    guidance::{
        ArtifactExample, Guidance, ToolFunction, Verification, render_examples,
        render_tool_functions,
    },
    outcome::SolveOutcome,
    reflection_history::ReflectionHistory,
};
