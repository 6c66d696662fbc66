//! Candidate solve loop.
//!
//! Solves one node: load the kind's verifier, advise once, then run up to
//! `C` candidate lineages of `R + 1` verification rounds each, reflecting on
//! failures and regenerating between rounds. The first passing verification
//! ends the node.
//!
//! Lineages run strictly in order and each starts with an empty
//! [`ReflectionHistory`], so a candidate never sees another's failures.

use crate::config::SolveParams;
use crate::ports::artifact_verifier::{VerifierError, VerifierLoader};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::SolveProgressNotifier;
use crate::use_cases::strategy::SolverStrategy;
use qforge_domain::{
    AttemptRecord, CandidateAttempt, Guidance, ReflectionHistory, SolveOutcome, Verification,
    truncate,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a node solve.
#[derive(Error, Debug)]
pub enum SolveError {
    #[error("Verifier unavailable: {0}")]
    VerifierUnavailable(#[from] VerifierError),
}

/// One node to solve.
#[derive(Debug, Clone)]
pub struct SolveRequest {
    pub node_id: String,
    /// Normalized kind
    pub kind: String,
    pub size: u32,
}

impl SolveRequest {
    pub fn new(node_id: impl Into<String>, kind: impl Into<String>, size: u32) -> Self {
        Self {
            node_id: node_id.into(),
            kind: kind.into(),
            size,
        }
    }
}

/// Trail of one node solve, forwarded to progress and the transcript as it grows.
struct Trail<'a> {
    node_id: &'a str,
    records: Vec<AttemptRecord>,
    progress: &'a dyn SolveProgressNotifier,
    logger: &'a dyn ConversationLogger,
}

impl Trail<'_> {
    fn push(&mut self, record: AttemptRecord) {
        debug!("[{}] {}", self.node_id, record);
        self.progress.on_attempt(self.node_id, &record);
        self.logger.log(ConversationEvent::new(
            "candidate_attempt",
            serde_json::json!({
                "node_id": self.node_id,
                "candidate": record.candidate_index,
                "trial": record.trial_index,
                "success": record.success,
                "reason": truncate(&record.reason, 500),
            }),
        ));
        self.records.push(record);
    }
}

/// Use case running the candidate/reflection loop for one node.
pub struct SolveCandidateUseCase {
    verifiers: Arc<dyn VerifierLoader>,
    params: SolveParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl SolveCandidateUseCase {
    pub fn new(verifiers: Arc<dyn VerifierLoader>, params: SolveParams) -> Self {
        Self {
            verifiers,
            params,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn params(&self) -> &SolveParams {
        &self.params
    }

    pub async fn execute(
        &self,
        strategy: &SolverStrategy,
        request: &SolveRequest,
        progress: &dyn SolveProgressNotifier,
    ) -> Result<SolveOutcome, SolveError> {
        let kind = request.kind.as_str();
        let size = request.size;
        let verifier = self.verifiers.load(kind).await?;

        info!(
            "Solving {} ({}, size {}) via {}",
            request.node_id,
            kind,
            size,
            strategy.route()
        );

        let mut trail = Trail {
            node_id: &request.node_id,
            records: Vec::new(),
            progress,
            logger: self.conversation_logger.as_ref(),
        };

        let guidance = match strategy.advise(kind).await {
            Ok(guidance) => guidance,
            Err(e) => {
                warn!("Advisor failed for {}: {}", request.node_id, e);
                trail.push(AttemptRecord::advisor_failed(&e));
                Guidance::empty()
            }
        };

        let rounds = self.params.rounds();
        let mut history = ReflectionHistory::new(self.params.capacity());
        let mut verifications = 0u32;
        let mut last_artifact = String::new();

        for candidate in 1..=self.params.candidates() {
            history.clear();

            let mut artifact = match strategy.generate(kind, size, &guidance).await {
                Ok(artifact) => artifact,
                Err(e) => {
                    trail.push(AttemptRecord::generation_failed(candidate, &e));
                    String::new()
                }
            };

            for round in 1..=rounds {
                verifications += 1;
                let review = tokio::time::timeout(
                    self.params.verify_timeout,
                    strategy.review(verifier.as_ref(), kind, &artifact, size),
                )
                .await;

                let (verification, produced) = match review {
                    Ok(Ok(review)) => (review.verification, review.produced),
                    Ok(Err(e)) => (
                        Verification::failed(format!("verifier error: {}", e)),
                        None,
                    ),
                    Err(_) => (
                        Verification::failed(format!(
                            "verification timed out after {}s",
                            self.params.verify_timeout.as_secs()
                        )),
                        None,
                    ),
                };

                let attempt = CandidateAttempt::new(
                    candidate,
                    round,
                    artifact.clone(),
                    verification.diagnostic,
                    verification.success,
                );
                trail.push(AttemptRecord::from_attempt(&attempt));

                if attempt.success() {
                    info!(
                        "{} solved by candidate #{} at trial #{}",
                        request.node_id, candidate, round
                    );
                    return Ok(SolveOutcome {
                        artifact: produced.unwrap_or(artifact),
                        records: trail.records,
                        success: true,
                        verifications,
                    });
                }

                history.push(attempt);
                if round == rounds {
                    break;
                }

                let Some(current) = history.latest() else {
                    break;
                };
                let suggestion = strategy.reflect(&history.prior_failures(), current).await;
                let diagnostic = current.diagnostic().to_string();

                match strategy
                    .regenerate(kind, size, &artifact, &diagnostic, &suggestion)
                    .await
                {
                    Ok(revised) => artifact = revised,
                    Err(e) => {
                        trail.push(AttemptRecord::regeneration_failed(candidate, round + 1, &e));
                    }
                }
            }

            last_artifact = artifact;
        }

        info!(
            "{} unsolved after {} verification(s)",
            request.node_id, verifications
        );
        Ok(SolveOutcome {
            artifact: last_artifact,
            records: trail.records,
            success: false,
            verifications,
        })
    }
}
