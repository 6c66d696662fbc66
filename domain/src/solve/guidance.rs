//! Advisor output and verifier results.

use serde::{Deserialize, Serialize};

/// Reference artifact for a kind at a given size, used as a few-shot example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactExample {
    pub size: u32,
    pub content: String,
}

impl ArtifactExample {
    pub fn new(size: u32, content: impl Into<String>) -> Self {
        Self {
            size,
            content: content.into(),
        }
    }
}

/// Render examples as the block shown to the coder and the advisor.
pub fn render_examples(examples: &[ArtifactExample]) -> String {
    examples
        .iter()
        .enumerate()
        .map(|(i, ex)| {
            format!(
                "### Example {}, when qubit_number = {}: the qasm code is\n{}\n",
                i + 1,
                ex.size,
                ex.content.trim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One callable function of a per-kind tool library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolFunction {
    pub name: String,
    pub signature: String,
    pub description: String,
}

/// Render a tool library as `- name(signature)` lines with indented descriptions.
pub fn render_tool_functions(functions: &[ToolFunction]) -> String {
    functions
        .iter()
        .map(|f| format!("- {}{}\n  {}\n", f.name, f.signature, f.description.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Advice computed once per node and reused by every candidate.
///
/// `context` is reference material (rendered examples or tool descriptions);
/// `analysis` is the oracle's reasoning over it (chain of thought or plan).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Guidance {
    pub context: String,
    pub analysis: String,
}

impl Guidance {
    pub fn new(context: impl Into<String>, analysis: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            analysis: analysis.into(),
        }
    }

    /// Guidance used when the advisor fails.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.context.is_empty() && self.analysis.is_empty()
    }
}

/// Result of one functional test of an artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    pub success: bool,
    /// Fraction of sub-tests passed, in `[0, 1]`
    pub score: f64,
    pub diagnostic: String,
}

impl Verification {
    pub fn new(success: bool, score: f64, diagnostic: impl Into<String>) -> Self {
        let score = if score.is_finite() {
            score.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            success,
            score,
            diagnostic: diagnostic.into(),
        }
    }

    pub fn failed(diagnostic: impl Into<String>) -> Self {
        Self::new(false, 0.0, diagnostic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_examples() {
        let block = render_examples(&[
            ArtifactExample::new(2, "OPENQASM 3.0;\nqubit[2] q;\n"),
            ArtifactExample::new(3, "OPENQASM 3.0;\nqubit[3] q;"),
        ]);
        assert!(block.starts_with("### Example 1, when qubit_number = 2"));
        assert!(block.contains("### Example 2, when qubit_number = 3"));
        assert!(block.contains("qubit[3] q;"));
    }

    #[test]
    fn test_render_examples_empty() {
        assert_eq!(render_examples(&[]), "");
    }

    #[test]
    fn test_render_tool_functions() {
        let text = render_tool_functions(&[ToolFunction {
            name: "build_adder".to_string(),
            signature: "(n: int) -> QuantumCircuit".to_string(),
            description: "Ripple-carry adder on two n-bit registers.".to_string(),
        }]);
        assert_eq!(
            text,
            "- build_adder(n: int) -> QuantumCircuit\n  Ripple-carry adder on two n-bit registers.\n"
        );
    }

    #[test]
    fn test_verification_score_clamped() {
        assert_eq!(Verification::new(true, 1.7, "").score, 1.0);
        assert_eq!(Verification::new(false, -0.2, "").score, 0.0);
        assert_eq!(Verification::new(false, f64::NAN, "").score, 0.0);
        assert_eq!(Verification::new(false, 0.5, "").score, 0.5);
    }

    #[test]
    fn test_empty_guidance() {
        assert!(Guidance::empty().is_empty());
        assert!(!Guidance::new("", "plan").is_empty());
    }
}
