//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! (`SolveParams`, `DispatchPolicy`, `ForgeConfig`) after validation.

mod dispatch;
mod oracle;
mod paths;
mod solve;

pub use dispatch::FileDispatchConfig;
pub use oracle::FileOracleConfig;
pub use paths::{FileCalibrationConfig, FileKernelsConfig, FileLoggingConfig};
pub use solve::FileSolveConfig;

use qforge_application::{CalibrationParams, ForgeConfig};
use qforge_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration that cannot be used to start a run
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("invalid configuration: {}", format_issues(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub oracle: FileOracleConfig,
    pub solve: FileSolveConfig,
    pub dispatch: FileDispatchConfig,
    pub calibration: FileCalibrationConfig,
    pub kernels: FileKernelsConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.oracle.validate();
        issues.extend(self.dispatch.to_policy().1);

        if self.solve.verify_timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                "solve.verify_timeout_seconds cannot be 0",
            ));
        }
        if self.solve.candidate_count == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroCandidates,
                "solve.candidate_count is 0; one candidate will be used",
            ));
        }

        issues
    }

    /// Warnings when usable; every error otherwise.
    pub fn ensure_valid(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.validate().into_iter().partition(ConfigIssue::is_error);
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError::Invalid(errors))
        }
    }

    pub fn to_forge_config(&self) -> ForgeConfig {
        ForgeConfig::new(
            self.solve.to_solve_params(),
            self.dispatch.to_policy().0,
            CalibrationParams {
                max_trials: self.calibration.max_trials,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qforge_domain::Route;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[oracle]
provider = "nscale"
model = "Qwen/Qwen2.5-Coder-32B-Instruct"
temperature = 1.0

[solve]
candidate_count = 2
reflection_rounds = 1

[dispatch]
guided = ["ghz"]
tools = ["adder", "qft"]
default_route = "tools"

[calibration]
file = "backend.inc"

[kernels]
root = "/opt/kernels"
interpreter = "python3.11"

[logging]
conversation_log = "run.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.oracle.provider, "nscale");
        assert_eq!(config.oracle.temperature, Some(1.0));
        assert_eq!(config.solve.candidate_count, 2);
        assert_eq!(config.solve.history_capacity, 10);
        assert_eq!(config.calibration.file, PathBuf::from("backend.inc"));
        assert_eq!(config.calibration.max_trials, 3);
        assert_eq!(config.kernels.interpreter, "python3.11");
        assert_eq!(
            config.logging.conversation_log,
            Some(PathBuf::from("run.jsonl"))
        );

        let forge = config.to_forge_config();
        assert_eq!(forge.dispatch().route_for("qft"), Route::Tools);
        assert_eq!(forge.dispatch().route_for("unknown"), Route::Tools);
        assert_eq!(forge.solve().rounds(), 2);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert!(config.ensure_valid().unwrap().is_empty());
    }

    #[test]
    fn test_ensure_valid_separates_errors() {
        let mut config = FileConfig::default();
        config.solve.candidate_count = 0;
        assert_eq!(config.ensure_valid().unwrap().len(), 1);

        config.oracle.model = String::new();
        config.solve.verify_timeout_seconds = 0;
        let err = config.ensure_valid().unwrap_err();
        let ConfigValidationError::Invalid(errors) = &err;
        assert_eq!(errors.len(), 2);
        assert!(err.to_string().contains("oracle.model"));
    }
}
