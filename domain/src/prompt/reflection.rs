//! Repair prompts built from a lineage's failure history.

use crate::solve::attempt::CandidateAttempt;

/// Suggestion used when the oracle cannot produce a reflection.
pub const FALLBACK_REFLECTION: &str = "The tester reported a failure. Check that the gates implement the expected algorithm, \
that register sizes equal the requested qubit count, and that measurement order matches what the tester expects. \
Address every error in the report above and emit a complete, valid program.";

/// Templates for the reflect step of the solve loop.
pub struct ReflectionPromptTemplate;

impl ReflectionPromptTemplate {
    /// Build the reflection prompt: prior failures (most recent last), then the current attempt.
    pub fn reflection_prompt(prior_failures: &[&CandidateAttempt], current: &CandidateAttempt) -> String {
        let mut prompt = String::new();

        if !prior_failures.is_empty() {
            prompt.push_str("Previous failed attempts (most recent last):\n");
            for (i, attempt) in prior_failures.iter().enumerate() {
                prompt.push_str(&format!(
                    "Attempt {}:\nCode:\n{}\nError/Report:\n{}\n\n",
                    i + 1,
                    attempt.artifact(),
                    attempt.diagnostic()
                ));
            }
        }

        prompt.push_str(&format!(
            "Current attempt:\nCode:\n{}\nError/Report:\n{}\n\n",
            current.artifact(),
            current.diagnostic()
        ));

        prompt.push_str(
            "Now analyze the error context and propose a fix.\n\
             Provide ONLY:\n\
             Analysis:\n\
             Do not show code; only the suggestion is needed.",
        );

        prompt
    }

    /// Fallback suggestion that names the oracle error.
    pub fn fallback(error: &str) -> String {
        format!(
            "Analysis:\nReflection was unavailable ({}).\n{}",
            error, FALLBACK_REFLECTION
        )
    }
}
