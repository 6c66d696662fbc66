//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished run is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The Markdown final report (default)
    #[default]
    Report,
    /// Per-node status lines only
    Summary,
    /// The full run payload as JSON
    Json,
}
