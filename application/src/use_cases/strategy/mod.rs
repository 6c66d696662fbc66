//! Synthesis strategies.
//!
//! A strategy pairs an advisor (guidance computed once per node), a coder
//! (initial generation and repair) and a reviewer (how an artifact is turned
//! into a [`Verification`]). The set is closed: [`SolverStrategy`] is selected
//! by the node's [`Route`].

pub mod guided;
pub mod tools;

pub use guided::GuidedStrategy;
pub use tools::ToolsStrategy;

use crate::ports::artifact_verifier::{ArtifactVerifier, VerifierError};
use crate::ports::kernel_catalog::CatalogError;
use crate::ports::synthesis_oracle::{OracleError, SynthesisOracle, max_output};
use qforge_domain::{
    CandidateAttempt, Guidance, GuidedPromptTemplate, ReflectionPromptTemplate, Route,
    ToolsPromptTemplate, Verification,
};
use thiserror::Error;
use tracing::warn;

/// Errors from an advisor.
#[derive(Error, Debug)]
pub enum AdviceError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Outcome of reviewing one artifact.
#[derive(Debug, Clone)]
pub struct Review {
    pub verification: Verification,
    /// Artifact that was actually verified, when it differs from the reviewed input
    pub produced: Option<String>,
}

impl Review {
    pub fn direct(verification: Verification) -> Self {
        Self {
            verification,
            produced: None,
        }
    }
}

/// Closed set of synthesis strategies.
pub enum SolverStrategy {
    Guided(GuidedStrategy),
    Tools(ToolsStrategy),
}

impl SolverStrategy {
    pub fn route(&self) -> Route {
        match self {
            SolverStrategy::Guided(_) => Route::Guided,
            SolverStrategy::Tools(_) => Route::Tools,
        }
    }

    pub async fn advise(&self, kind: &str) -> Result<Guidance, AdviceError> {
        match self {
            SolverStrategy::Guided(s) => s.advise(kind).await,
            SolverStrategy::Tools(s) => s.advise(kind).await,
        }
    }

    pub async fn generate(
        &self,
        kind: &str,
        size: u32,
        guidance: &Guidance,
    ) -> Result<String, OracleError> {
        match self {
            SolverStrategy::Guided(s) => s.generate(kind, size, guidance).await,
            SolverStrategy::Tools(s) => s.generate(kind, size, guidance).await,
        }
    }

    pub async fn regenerate(
        &self,
        kind: &str,
        size: u32,
        artifact: &str,
        diagnostic: &str,
        suggestion: &str,
    ) -> Result<String, OracleError> {
        match self {
            SolverStrategy::Guided(s) => {
                s.regenerate(kind, size, artifact, diagnostic, suggestion)
                    .await
            }
            SolverStrategy::Tools(s) => {
                s.regenerate(kind, size, artifact, diagnostic, suggestion)
                    .await
            }
        }
    }

    pub async fn review(
        &self,
        verifier: &dyn ArtifactVerifier,
        kind: &str,
        artifact: &str,
        size: u32,
    ) -> Result<Review, VerifierError> {
        match self {
            SolverStrategy::Guided(s) => s.review(verifier, artifact, size).await,
            SolverStrategy::Tools(s) => s.review(verifier, kind, artifact, size).await,
        }
    }

    /// Repair suggestion for `current`, given earlier failures of the lineage.
    ///
    /// Never fails: an oracle error or an empty answer yields the fallback text.
    pub async fn reflect(&self, prior_failures: &[&CandidateAttempt], current: &CandidateAttempt) -> String {
        let (oracle, system) = match self {
            SolverStrategy::Guided(s) => (s.oracle(), GuidedPromptTemplate::reflection_system()),
            SolverStrategy::Tools(s) => (s.oracle(), ToolsPromptTemplate::reflection_system()),
        };

        let prompt = ReflectionPromptTemplate::reflection_prompt(prior_failures, current);
        match oracle.generate(&prompt, system, max_output::REFLECTION).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => ReflectionPromptTemplate::fallback("empty response"),
            Err(e) => {
                warn!("Reflection failed: {}", e);
                ReflectionPromptTemplate::fallback(&e.to_string())
            }
        }
    }
}

/// One strategy per route.
pub struct Strategies {
    guided: SolverStrategy,
    tools: SolverStrategy,
}

impl Strategies {
    pub fn new(guided: GuidedStrategy, tools: ToolsStrategy) -> Self {
        Self {
            guided: SolverStrategy::Guided(guided),
            tools: SolverStrategy::Tools(tools),
        }
    }

    pub fn for_route(&self, route: Route) -> &SolverStrategy {
        match route {
            Route::Guided => &self.guided,
            Route::Tools => &self.tools,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MockExamples, MockOracle, MockRunner, MockToolCatalog};
    use qforge_domain::FALLBACK_REFLECTION;
    use std::sync::Arc;

    fn strategies(oracle: Arc<MockOracle>) -> Strategies {
        Strategies::new(
            GuidedStrategy::new(oracle.clone(), Arc::new(MockExamples::empty()), 3),
            ToolsStrategy::new(
                oracle,
                Arc::new(MockToolCatalog::new("- make()")),
                Arc::new(MockRunner::new(vec![])),
            ),
        )
    }

    #[test]
    fn test_for_route() {
        let set = strategies(Arc::new(MockOracle::new(vec![])));
        assert_eq!(set.for_route(Route::Guided).route(), Route::Guided);
        assert_eq!(set.for_route(Route::Tools).route(), Route::Tools);
    }

    #[tokio::test]
    async fn test_reflect_uses_oracle_text() {
        let oracle = Arc::new(MockOracle::new(vec![Ok("Analysis:\nadd a measure".into())]));
        let set = strategies(oracle);
        let current = CandidateAttempt::new(1, 1, "OPENQASM 3.0;", "no measure", false);

        let suggestion = set.for_route(Route::Guided).reflect(&[], &current).await;
        assert_eq!(suggestion, "Analysis:\nadd a measure");
    }

    #[tokio::test]
    async fn test_reflect_falls_back_on_oracle_error() {
        let oracle = Arc::new(MockOracle::new(vec![Err(OracleError::Timeout)]));
        let set = strategies(oracle);
        let current = CandidateAttempt::new(1, 1, "x", "bad", false);

        let suggestion = set.for_route(Route::Tools).reflect(&[], &current).await;
        assert!(suggestion.contains(FALLBACK_REFLECTION));
        assert!(suggestion.contains("Timeout"));
    }

    #[tokio::test]
    async fn test_reflect_falls_back_on_empty_answer() {
        let oracle = Arc::new(MockOracle::new(vec![Ok("   ".into())]));
        let set = strategies(oracle);
        let current = CandidateAttempt::new(1, 1, "x", "bad", false);

        let suggestion = set.for_route(Route::Guided).reflect(&[], &current).await;
        assert!(suggestion.contains(FALLBACK_REFLECTION));
    }
}
