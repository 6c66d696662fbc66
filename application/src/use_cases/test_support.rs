//! Scripted port implementations shared by use case tests.

use crate::ports::artifact_verifier::{ArtifactVerifier, VerifierError, VerifierLoader};
use crate::ports::calibration_applier::{CalibrationApplier, CalibrationError};
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::kernel_catalog::{CatalogError, ExampleSource, SchemaStore, ToolCatalog};
use crate::ports::progress::{SolveProgressNotifier, WorkflowStage};
use crate::ports::script_runner::{ScriptError, ScriptRunner};
use crate::ports::synthesis_oracle::{OracleError, SynthesisOracle};
use async_trait::async_trait;
use qforge_domain::{
    ArtifactExample, AttemptRecord, CalibrationInstruction, Route, TokenUsage, UsageCounter,
    Verification,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ==================== Oracle ====================

pub struct MockOracle {
    responses: Mutex<VecDeque<Result<String, OracleError>>>,
    prompts: Mutex<Vec<String>>,
    usage: UsageCounter,
}

impl MockOracle {
    pub fn new(responses: Vec<Result<String, OracleError>>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            prompts: Mutex::new(Vec::new()),
            usage: UsageCounter::new(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[async_trait]
impl SynthesisOracle for MockOracle {
    async fn generate(&self, prompt: &str, _system: &str, _max_output: u32) -> Result<String, OracleError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| OracleError::Other("No more responses".to_string()))?;
        if response.is_ok() {
            self.usage.record(TokenUsage::from_parts(10, 5));
        }
        response
    }

    fn usage(&self) -> &UsageCounter {
        &self.usage
    }
}

// ==================== Verifier ====================

pub struct MockVerifier {
    results: Mutex<VecDeque<Verification>>,
    calls: Mutex<Vec<(String, u32)>>,
    delay: Option<Duration>,
}

impl MockVerifier {
    pub fn new(results: Vec<Verification>) -> Self {
        Self {
            results: Mutex::new(VecDeque::from(results)),
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactVerifier for MockVerifier {
    async fn test(&self, artifact: &str, size: u32) -> Result<Verification, VerifierError> {
        self.calls.lock().unwrap().push((artifact.to_string(), size));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| VerifierError::Execution("No more results".to_string()))
    }
}

/// Loader with one verifier per kind; other kinds have no harness.
#[derive(Default)]
pub struct MockVerifierLoader {
    verifiers: HashMap<String, Arc<MockVerifier>>,
}

impl MockVerifierLoader {
    pub fn with(mut self, kind: &str, verifier: Arc<MockVerifier>) -> Self {
        self.verifiers.insert(kind.to_string(), verifier);
        self
    }
}

#[async_trait]
impl VerifierLoader for MockVerifierLoader {
    async fn load(&self, kind: &str) -> Result<Arc<dyn ArtifactVerifier>, VerifierError> {
        match self.verifiers.get(kind) {
            Some(verifier) => Ok(verifier.clone()),
            None => Err(VerifierError::HarnessNotFound {
                kind: kind.to_string(),
                path: format!("kernels/{}/universal_test.py", kind),
            }),
        }
    }
}

// ==================== Kernel catalog ====================

pub struct MockExamples {
    examples: Vec<ArtifactExample>,
    fail: bool,
}

impl MockExamples {
    pub fn new(examples: Vec<ArtifactExample>) -> Self {
        Self {
            examples,
            fail: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn failing() -> Self {
        Self {
            examples: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl ExampleSource for MockExamples {
    async fn examples(&self, kind: &str, shots: u32) -> Result<Vec<ArtifactExample>, CatalogError> {
        if self.fail {
            return Err(CatalogError::NotFound {
                what: "examples",
                kind: kind.to_string(),
            });
        }
        Ok(self.examples.iter().take(shots as usize).cloned().collect())
    }
}

pub struct MockToolCatalog {
    description: String,
}

impl MockToolCatalog {
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
        }
    }
}

#[async_trait]
impl ToolCatalog for MockToolCatalog {
    async fn describe(&self, _kind: &str) -> Result<String, CatalogError> {
        Ok(self.description.clone())
    }
}

#[derive(Default)]
pub struct MockSchemas {
    schemas: HashMap<String, String>,
}

impl MockSchemas {
    pub fn with(mut self, kind: &str, schema: &str) -> Self {
        self.schemas.insert(kind.to_string(), schema.to_string());
        self
    }
}

#[async_trait]
impl SchemaStore for MockSchemas {
    async fn lookup(&self, kind: &str) -> String {
        self.schemas.get(kind).cloned().unwrap_or_default()
    }
}

// ==================== Script runner ====================

pub struct MockRunner {
    outputs: Mutex<VecDeque<Result<String, ScriptError>>>,
}

impl MockRunner {
    pub fn new(outputs: Vec<Result<String, ScriptError>>) -> Self {
        Self {
            outputs: Mutex::new(VecDeque::from(outputs)),
        }
    }
}

#[async_trait]
impl ScriptRunner for MockRunner {
    async fn run(&self, _kind: &str, _script: &str) -> Result<String, ScriptError> {
        self.outputs
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ScriptError::Failed("No more outputs".to_string())))
    }
}

// ==================== Calibration ====================

pub struct MockApplier {
    known: Vec<String>,
    applied: Mutex<Vec<CalibrationInstruction>>,
}

impl MockApplier {
    pub fn new(known: &[&str]) -> Self {
        Self {
            known: known.iter().map(|k| k.to_string()).collect(),
            applied: Mutex::new(Vec::new()),
        }
    }

    pub fn applied(&self) -> Vec<CalibrationInstruction> {
        self.applied.lock().unwrap().clone()
    }
}

#[async_trait]
impl CalibrationApplier for MockApplier {
    async fn apply(&self, instructions: &[CalibrationInstruction]) -> Result<usize, CalibrationError> {
        if let Some(missing) = instructions
            .iter()
            .find(|i| !self.known.contains(&i.variable_name))
        {
            return Err(CalibrationError::ParameterNotFound {
                name: missing.variable_name.clone(),
                file: "backend.inc".to_string(),
            });
        }
        self.applied.lock().unwrap().extend_from_slice(instructions);
        Ok(instructions.len())
    }
}

// ==================== Observers ====================

#[derive(Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<ConversationEvent>>,
}

impl RecordingLogger {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|e| e.event_type).collect()
    }

    pub fn payloads(&self, event_type: &str) -> Vec<serde_json::Value> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.event_type == event_type)
            .map(|e| e.payload.clone())
            .collect()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[derive(Default)]
pub struct RecordingProgress {
    pub stages: Mutex<Vec<WorkflowStage>>,
    pub nodes: Mutex<Vec<(String, Route, bool)>>,
    pub attempts: Mutex<Vec<AttemptRecord>>,
}

impl SolveProgressNotifier for RecordingProgress {
    fn on_stage_start(&self, stage: WorkflowStage) {
        self.stages.lock().unwrap().push(stage);
    }

    fn on_node_start(&self, node_id: &str, _kind: &str, route: Route, _index: usize, _total: usize) {
        self.nodes
            .lock()
            .unwrap()
            .push((node_id.to_string(), route, false));
    }

    fn on_attempt(&self, _node_id: &str, record: &AttemptRecord) {
        self.attempts.lock().unwrap().push(record.clone());
    }

    fn on_node_complete(&self, node_id: &str, success: bool) {
        if let Some(entry) = self
            .nodes
            .lock()
            .unwrap()
            .iter_mut()
            .rev()
            .find(|(id, _, _)| id == node_id)
        {
            entry.2 = success;
        }
    }
}
