//! Tool-assisted synthesis.
//!
//! The coder writes a script against the kind's tool library; the reviewer
//! runs it and verifies whatever circuit it prints. On success the printed
//! circuit, not the script, is the node's artifact.

use super::{AdviceError, Review};
use crate::ports::artifact_verifier::{ArtifactVerifier, VerifierError};
use crate::ports::kernel_catalog::ToolCatalog;
use crate::ports::script_runner::ScriptRunner;
use crate::ports::synthesis_oracle::{OracleError, SynthesisOracle, max_output};
use qforge_domain::{
    Guidance, ToolsPromptTemplate, Verification, clean_script_output, looks_like_circuit,
};
use std::sync::Arc;
use tracing::debug;

pub struct ToolsStrategy {
    oracle: Arc<dyn SynthesisOracle>,
    catalog: Arc<dyn ToolCatalog>,
    runner: Arc<dyn ScriptRunner>,
}

impl ToolsStrategy {
    pub fn new(
        oracle: Arc<dyn SynthesisOracle>,
        catalog: Arc<dyn ToolCatalog>,
        runner: Arc<dyn ScriptRunner>,
    ) -> Self {
        Self {
            oracle,
            catalog,
            runner,
        }
    }

    pub(super) fn oracle(&self) -> &dyn SynthesisOracle {
        self.oracle.as_ref()
    }

    pub async fn advise(&self, kind: &str) -> Result<Guidance, AdviceError> {
        let tools = self.catalog.describe(kind).await?;
        let plan = self
            .oracle
            .generate(
                &ToolsPromptTemplate::advisor_prompt(kind, &tools),
                ToolsPromptTemplate::advisor_system(),
                max_output::ADVICE,
            )
            .await?;

        Ok(Guidance::new(tools, plan))
    }

    pub async fn generate(&self, kind: &str, size: u32, guidance: &Guidance) -> Result<String, OracleError> {
        let text = self
            .oracle
            .generate(
                &ToolsPromptTemplate::generate_prompt(kind, size, &guidance.context, &guidance.analysis),
                ToolsPromptTemplate::generate_system(),
                max_output::CODE,
            )
            .await?;
        Ok(clean_script_output(&text))
    }

    pub async fn regenerate(
        &self,
        kind: &str,
        size: u32,
        script: &str,
        diagnostic: &str,
        suggestion: &str,
    ) -> Result<String, OracleError> {
        let text = self
            .oracle
            .generate(
                &ToolsPromptTemplate::revise_prompt(kind, size, script, diagnostic, suggestion),
                ToolsPromptTemplate::revise_system(),
                max_output::CODE,
            )
            .await?;
        Ok(clean_script_output(&text))
    }

    /// Run the script and verify what it printed.
    ///
    /// Runner failures and empty output are failed verifications, not errors.
    pub async fn review(
        &self,
        verifier: &dyn ArtifactVerifier,
        kind: &str,
        script: &str,
        size: u32,
    ) -> Result<Review, VerifierError> {
        let output = match self.runner.run(kind, script).await {
            Ok(output) => output,
            Err(e) => {
                debug!("Script for {} failed: {}", kind, e);
                return Ok(Review::direct(Verification::failed(
                    ToolsPromptTemplate::execution_error_diagnostic(&e.to_string()),
                )));
            }
        };

        let circuit = output.trim();
        if circuit.is_empty() {
            return Ok(Review::direct(Verification::failed(
                ToolsPromptTemplate::empty_output_diagnostic(),
            )));
        }

        let result = verifier.test(circuit, size).await?;
        let report = ToolsPromptTemplate::verification_report(
            result.success,
            result.score,
            &result.diagnostic,
            !looks_like_circuit(circuit),
        );

        Ok(Review {
            verification: Verification::new(result.success, result.score, report),
            produced: Some(circuit.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::script_runner::ScriptError;
    use crate::use_cases::test_support::{MockOracle, MockRunner, MockToolCatalog, MockVerifier};

    fn strategy(runner: MockRunner) -> ToolsStrategy {
        ToolsStrategy::new(
            Arc::new(MockOracle::new(vec![])),
            Arc::new(MockToolCatalog::new("- adder(n)\n  builds an adder")),
            Arc::new(runner),
        )
    }

    #[tokio::test]
    async fn test_advise_combines_tools_and_plan() {
        let oracle = Arc::new(MockOracle::new(vec![Ok("step 1: call adder".into())]));
        let strategy = ToolsStrategy::new(
            oracle.clone(),
            Arc::new(MockToolCatalog::new("- adder(n)")),
            Arc::new(MockRunner::new(vec![])),
        );

        let guidance = strategy.advise("adder").await.unwrap();
        assert_eq!(guidance.context, "- adder(n)");
        assert_eq!(guidance.analysis, "step 1: call adder");
        assert!(oracle.prompts()[0].contains("- adder(n)"));
    }

    #[tokio::test]
    async fn test_review_runner_error_is_failed_verification() {
        let strategy = strategy(MockRunner::new(vec![Err(ScriptError::Failed(
            "NameError: name 'foo' is not defined".into(),
        ))]));
        let verifier = MockVerifier::new(vec![]);

        let review = strategy.review(&verifier, "adder", "foo()", 3).await.unwrap();
        assert!(!review.verification.success);
        assert!(review.verification.diagnostic.starts_with("Execution error."));
        assert!(review.verification.diagnostic.contains("NameError"));
        assert!(verifier.calls().is_empty());
    }

    #[tokio::test]
    async fn test_review_empty_output() {
        let strategy = strategy(MockRunner::new(vec![Ok("  \n".into())]));
        let verifier = MockVerifier::new(vec![]);

        let review = strategy.review(&verifier, "adder", "pass", 3).await.unwrap();
        assert!(!review.verification.success);
        assert_eq!(
            review.verification.diagnostic,
            ToolsPromptTemplate::empty_output_diagnostic()
        );
    }

    #[tokio::test]
    async fn test_review_returns_printed_circuit() {
        let strategy = strategy(MockRunner::new(vec![Ok("OPENQASM 3.0;\nqubit[3] q;\n".into())]));
        let verifier = MockVerifier::new(vec![Verification::new(true, 1.0, "all good")]);

        let review = strategy.review(&verifier, "adder", "print(qasm)", 3).await.unwrap();
        assert!(review.verification.success);
        assert_eq!(review.produced.as_deref(), Some("OPENQASM 3.0;\nqubit[3] q;"));
        assert!(review.verification.diagnostic.starts_with("success=true, success_rate=1"));
    }

    #[tokio::test]
    async fn test_review_warns_when_output_is_not_circuit() {
        let strategy = strategy(MockRunner::new(vec![Ok("hello".into())]));
        let verifier = MockVerifier::new(vec![Verification::new(false, 0.0, "parse error")]);

        let review = strategy.review(&verifier, "adder", "print('hello')", 3).await.unwrap();
        assert!(!review.verification.success);
        assert!(
            review
                .verification
                .diagnostic
                .starts_with(ToolsPromptTemplate::not_circuit_warning())
        );
    }
}
