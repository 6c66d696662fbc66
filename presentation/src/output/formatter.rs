//! Output formatter trait

use qforge_domain::{OutputFormat, RunPayload};

/// Trait for formatting run payloads
pub trait OutputFormatter {
    /// The Markdown final report
    fn format_report(&self, payload: &RunPayload) -> String;

    /// One status line per node
    fn format_summary(&self, payload: &RunPayload) -> String;

    /// The payload as pretty JSON
    fn format_json(&self, payload: &RunPayload) -> String;

    fn render(&self, format: OutputFormat, payload: &RunPayload) -> String {
        match format {
            OutputFormat::Report => self.format_report(payload),
            OutputFormat::Summary => self.format_summary(payload),
            OutputFormat::Json => self.format_json(payload),
        }
    }
}
