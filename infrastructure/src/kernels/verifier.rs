//! Per-kind functional test harnesses run through the interpreter.
//!
//! Each kind ships `<kind>/universal_test.py` defining
//! `universal_check(qasm, n) -> (success, score, report)`. The driver loads
//! the harness, feeds it the artifact from stdin and prints one JSON verdict
//! line.

use super::layout::KernelLayout;
use super::process::run_driver;
use async_trait::async_trait;
use qforge_application::{ArtifactVerifier, VerifierError, VerifierLoader};
use qforge_domain::Verification;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

const HARNESS_DRIVER: &str = r#"
import importlib.util, json, os, sys
path = sys.argv[1]
sys.path.insert(0, os.path.dirname(os.path.abspath(path)))
spec = importlib.util.spec_from_file_location("_qforge_harness", path)
module = importlib.util.module_from_spec(spec)
spec.loader.exec_module(module)
artifact = sys.stdin.read()
success, score, report = module.universal_check(artifact, int(sys.argv[2]))
print(json.dumps({"success": bool(success), "score": float(score), "report": str(report)}))
"#;

#[derive(Debug, Deserialize)]
struct Verdict {
    success: bool,
    score: f64,
    #[serde(default)]
    report: String,
}

/// Read the verdict from the last non-empty stdout line.
///
/// Harnesses may print their own output before the verdict.
pub fn parse_verdict(stdout: &str) -> Result<Verification, VerifierError> {
    let line = stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| VerifierError::InvalidOutput("no verdict printed".to_string()))?;
    let verdict: Verdict = serde_json::from_str(line)
        .map_err(|e| VerifierError::InvalidOutput(format!("{}: {}", e, line)))?;
    Ok(Verification::new(
        verdict.success,
        verdict.score,
        verdict.report,
    ))
}

/// Harness for one kind.
pub struct CommandVerifier {
    interpreter: String,
    harness: PathBuf,
}

#[async_trait]
impl ArtifactVerifier for CommandVerifier {
    async fn test(&self, artifact: &str, size: u32) -> Result<Verification, VerifierError> {
        let size = size.to_string();
        let output = run_driver(
            &self.interpreter,
            HARNESS_DRIVER,
            &[self.harness.as_path()],
            &[size.as_str()],
            artifact,
        )
        .await
        .map_err(|e| VerifierError::Execution(e.to_string()))?;

        if !output.success() {
            return Err(VerifierError::Execution(output.error_tail()));
        }
        let verification = parse_verdict(&output.stdout)?;
        debug!(
            "Harness {} at n={}: success={} score={:.2}",
            self.harness.display(),
            size,
            verification.success,
            verification.score
        );
        Ok(verification)
    }
}

/// Resolves `<root>/<kind>/universal_test.py`.
pub struct CommandVerifierLoader {
    layout: KernelLayout,
    interpreter: String,
}

impl CommandVerifierLoader {
    pub fn new(layout: KernelLayout, interpreter: impl Into<String>) -> Self {
        Self {
            layout,
            interpreter: interpreter.into(),
        }
    }
}

#[async_trait]
impl VerifierLoader for CommandVerifierLoader {
    async fn load(&self, kind: &str) -> Result<Arc<dyn ArtifactVerifier>, VerifierError> {
        let Some(harness) = self.layout.harness(kind) else {
            return Err(VerifierError::HarnessNotFound {
                kind: kind.to_string(),
                path: "kind must be a plain name".to_string(),
            });
        };
        if !harness.is_file() {
            return Err(VerifierError::HarnessNotFound {
                kind: kind.to_string(),
                path: harness.display().to_string(),
            });
        }
        Ok(Arc::new(CommandVerifier {
            interpreter: self.interpreter.clone(),
            harness,
        }))
    }
}
