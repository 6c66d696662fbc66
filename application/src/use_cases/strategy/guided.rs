//! Example-guided synthesis.
//!
//! The advisor shows the oracle reference circuits of the same kind at small
//! sizes and asks for an analysis of the pattern; the coder then writes the
//! circuit for the requested size directly.

use super::{AdviceError, Review};
use crate::ports::artifact_verifier::{ArtifactVerifier, VerifierError};
use crate::ports::kernel_catalog::ExampleSource;
use crate::ports::synthesis_oracle::{OracleError, SynthesisOracle, max_output};
use qforge_domain::{Guidance, GuidedPromptTemplate, clean_circuit_output, render_examples};
use std::sync::Arc;
use tracing::debug;

pub struct GuidedStrategy {
    oracle: Arc<dyn SynthesisOracle>,
    examples: Arc<dyn ExampleSource>,
    shots: u32,
}

impl GuidedStrategy {
    pub fn new(oracle: Arc<dyn SynthesisOracle>, examples: Arc<dyn ExampleSource>, shots: u32) -> Self {
        Self {
            oracle,
            examples,
            shots,
        }
    }

    pub(super) fn oracle(&self) -> &dyn SynthesisOracle {
        self.oracle.as_ref()
    }

    pub async fn advise(&self, kind: &str) -> Result<Guidance, AdviceError> {
        let examples = self.examples.examples(kind, self.shots).await?;
        debug!("Guided advisor: {} example(s) for {}", examples.len(), kind);

        let rendered = render_examples(&examples);
        let analysis = self
            .oracle
            .generate(
                &GuidedPromptTemplate::advisor_prompt(kind, &rendered),
                GuidedPromptTemplate::advisor_system(),
                max_output::ADVICE,
            )
            .await?;

        Ok(Guidance::new(rendered, analysis))
    }

    pub async fn generate(&self, kind: &str, size: u32, guidance: &Guidance) -> Result<String, OracleError> {
        let text = self
            .oracle
            .generate(
                &GuidedPromptTemplate::generate_prompt(kind, size, &guidance.context, &guidance.analysis),
                GuidedPromptTemplate::generate_system(),
                max_output::CODE,
            )
            .await?;
        Ok(clean_circuit_output(&text))
    }

    pub async fn regenerate(
        &self,
        kind: &str,
        size: u32,
        artifact: &str,
        diagnostic: &str,
        suggestion: &str,
    ) -> Result<String, OracleError> {
        let text = self
            .oracle
            .generate(
                &GuidedPromptTemplate::revise_prompt(kind, size, artifact, diagnostic, suggestion),
                GuidedPromptTemplate::revise_system(),
                max_output::CODE,
            )
            .await?;
        Ok(clean_circuit_output(&text))
    }

    pub async fn review(
        &self,
        verifier: &dyn ArtifactVerifier,
        artifact: &str,
        size: u32,
    ) -> Result<Review, VerifierError> {
        let verification = verifier.test(artifact, size).await?;
        Ok(Review::direct(verification))
    }
}
