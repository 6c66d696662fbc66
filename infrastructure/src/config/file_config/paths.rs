//! Filesystem locations from TOML (`[calibration]`, `[kernels]`, `[logging]` sections)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Backend calibration settings
///
/// ```toml
/// [calibration]
/// file = "./backend_27q.inc"
/// max_trials = 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCalibrationConfig {
    pub file: PathBuf,
    pub max_trials: u32,
}

impl Default for FileCalibrationConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("./backend_27q.inc"),
            max_trials: 3,
        }
    }
}

/// Per-kind reference material and test harnesses
///
/// ```toml
/// [kernels]
/// root = "./kernels"
/// interpreter = "python3"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileKernelsConfig {
    pub root: PathBuf,
    /// Interpreter that runs harnesses and generated scripts
    pub interpreter: String,
}

impl Default for FileKernelsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./kernels"),
            interpreter: "python3".to_string(),
        }
    }
}

/// Log destinations (both optional)
///
/// ```toml
/// [logging]
/// conversation_log = "./logs/run.conversation.jsonl"
/// log_dir = "./logs"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of workflow events
    pub conversation_log: Option<PathBuf>,
    /// Directory for the daily rotating diagnostic log
    pub log_dir: Option<PathBuf>,
}
