//! Application layer for qforge
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{CalibrationParams, ForgeConfig, SolveParams};
pub use ports::{
    artifact_verifier::{ArtifactVerifier, VerifierError, VerifierLoader},
    calibration_applier::{CalibrationApplier, CalibrationError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    kernel_catalog::{CatalogError, ExampleSource, SchemaStore, ToolCatalog},
    progress::{NoProgress, SolveProgressNotifier, WorkflowStage},
    script_runner::{ScriptError, ScriptRunner},
    synthesis_oracle::{OracleError, SynthesisOracle},
};
pub use use_cases::calibrate::CalibrateUseCase;
pub use use_cases::plan_task::PlanTaskUseCase;
pub use use_cases::run_workflow::{RunWorkflowError, RunWorkflowUseCase};
pub use use_cases::solve_candidate::{SolveCandidateUseCase, SolveError, SolveRequest};
pub use use_cases::strategy::{GuidedStrategy, SolverStrategy, Strategies, ToolsStrategy};
