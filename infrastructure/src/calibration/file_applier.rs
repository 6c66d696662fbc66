//! Rewrites `const float <name> = <number>;` lines in a backend include file.

use async_trait::async_trait;
use qforge_application::{CalibrationApplier, CalibrationError};
use qforge_domain::CalibrationInstruction;
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct FileCalibrationApplier {
    file: PathBuf,
}

impl FileCalibrationApplier {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    fn io_error(&self, e: impl std::fmt::Display) -> CalibrationError {
        CalibrationError::Io {
            file: self.file.display().to_string(),
            message: e.to_string(),
        }
    }
}

fn constant_pattern(name: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(const\s+float\s+{}\s*=\s*)([0-9.+\-eE]+)(\s*;)",
        regex::escape(name)
    ))
}

/// Apply every instruction to `source`; fails on the first unknown name.
pub fn rewrite_constants(
    source: &str,
    instructions: &[CalibrationInstruction],
    file: &str,
) -> Result<(String, usize), CalibrationError> {
    let mut text = source.to_string();
    let mut rewritten = 0;

    for instruction in instructions {
        let pattern = constant_pattern(&instruction.variable_name).map_err(|e| {
            CalibrationError::Io {
                file: file.to_string(),
                message: e.to_string(),
            }
        })?;
        let hits = pattern.find_iter(&text).count();
        if hits == 0 {
            return Err(CalibrationError::ParameterNotFound {
                name: instruction.variable_name.clone(),
                file: file.to_string(),
            });
        }
        text = pattern
            .replace_all(&text, |caps: &Captures| {
                format!("{}{:.3}{}", &caps[1], instruction.value, &caps[3])
            })
            .into_owned();
        rewritten += hits;
    }

    Ok((text, rewritten))
}

/// Write `text` beside `target` and rename it over the target, so readers
/// never see a partial file. The staging file is removed if either step fails.
async fn replace_file(target: &Path, text: &str) -> std::io::Result<()> {
    let staging = target.with_extension("inc.tmp");
    let result = match tokio::fs::write(&staging, text).await {
        Ok(()) => tokio::fs::rename(&staging, target).await,
        Err(e) => Err(e),
    };
    if result.is_err() {
        let _ = tokio::fs::remove_file(&staging).await;
    }
    result
}

#[async_trait]
impl CalibrationApplier for FileCalibrationApplier {
    async fn apply(&self, instructions: &[CalibrationInstruction]) -> Result<usize, CalibrationError> {
        let source = tokio::fs::read_to_string(&self.file)
            .await
            .map_err(|e| self.io_error(e))?;
        let (text, rewritten) =
            rewrite_constants(&source, instructions, &self.file.display().to_string())?;

        replace_file(&self.file, &text)
            .await
            .map_err(|e| self.io_error(e))?;

        info!(
            "Calibrated {} constant(s) in {}",
            rewritten,
            self.file.display()
        );
        Ok(rewritten)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKEND: &str = "\
// backend
const float t1_q0 = 100.0;
const float t2_q0 =   85.25 ;
const float readout_error = 1e-2;
";

    #[test]
    fn test_rewrite_formats_three_decimals() {
        let (text, n) = rewrite_constants(
            BACKEND,
            &[CalibrationInstruction::new("t1_q0", 120.12345)],
            "backend.inc",
        )
        .unwrap();
        assert_eq!(n, 1);
        assert!(text.contains("const float t1_q0 = 120.123;"));
        assert!(text.contains("const float t2_q0 =   85.25 ;"));
    }

    #[test]
    fn test_rewrite_keeps_spacing_and_exponents() {
        let (text, _) = rewrite_constants(
            BACKEND,
            &[
                CalibrationInstruction::new("t2_q0", 90.0),
                CalibrationInstruction::new("readout_error", 0.02),
            ],
            "backend.inc",
        )
        .unwrap();
        assert!(text.contains("const float t2_q0 =   90.000 ;"));
        assert!(text.contains("const float readout_error = 0.020;"));
    }

    #[test]
    fn test_name_is_not_a_pattern() {
        let err = rewrite_constants(
            BACKEND,
            &[CalibrationInstruction::new("t1_q.", 1.0)],
            "backend.inc",
        )
        .unwrap_err();
        assert!(matches!(err, CalibrationError::ParameterNotFound { .. }));
    }

    #[tokio::test]
    async fn test_apply_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backend_27q.inc");
        std::fs::write(&path, BACKEND).unwrap();
        let applier = FileCalibrationApplier::new(&path);

        let n = applier
            .apply(&[CalibrationInstruction::new("t1_q0", 99.5)])
            .await
            .unwrap();

        assert_eq!(n, 1);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("const float t1_q0 = 99.500;"));
        assert!(!path.with_extension("inc.tmp").exists());
    }

    #[tokio::test]
    async fn test_apply_batch_is_atomic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backend_27q.inc");
        std::fs::write(&path, BACKEND).unwrap();
        let applier = FileCalibrationApplier::new(&path);

        let err = applier
            .apply(&[
                CalibrationInstruction::new("t1_q0", 1.0),
                CalibrationInstruction::new("missing", 2.0),
            ])
            .await
            .unwrap_err();

        assert!(matches!(err, CalibrationError::ParameterNotFound { name, .. } if name == "missing"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), BACKEND);
    }

    #[tokio::test]
    async fn test_failed_replace_removes_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("backend_27q.inc");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), "").unwrap();

        assert!(replace_file(&target, BACKEND).await.is_err());
        assert!(!dir.path().join("backend_27q.inc.tmp").exists());
        assert!(target.join("keep").exists());
    }

    #[tokio::test]
    async fn test_apply_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let applier = FileCalibrationApplier::new(dir.path().join("none.inc"));

        let err = applier
            .apply(&[CalibrationInstruction::new("t1_q0", 1.0)])
            .await
            .unwrap_err();
        assert!(matches!(err, CalibrationError::Io { .. }));
    }
}
