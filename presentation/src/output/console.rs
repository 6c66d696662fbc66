//! Console output formatter for run payloads

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use qforge_domain::{ResultRecord, RunPayload};

/// Formats run payloads for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// The Markdown report as rendered by the run
    pub fn format_report(payload: &RunPayload) -> String {
        let mut output = payload.final_report.trim_end().to_string();
        output.push('\n');
        output
    }

    /// Format as JSON
    pub fn format_json(payload: &RunPayload) -> String {
        serde_json::to_string_pretty(payload).unwrap_or_else(|_| "{}".to_string())
    }

    /// Overall status, one line per node, calibration and totals
    pub fn format_summary(payload: &RunPayload) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(payload.success()));
        output.push('\n');

        if payload.results.is_empty() {
            output.push_str(&format!("  {}\n", "No tasks were planned.".dimmed()));
        }
        for record in payload.results.values() {
            output.push_str(&Self::node_line(record));
            output.push('\n');
        }

        if let Some(calibration) = &payload.calibration {
            let mark = Self::mark(calibration.success);
            output.push_str(&format!(
                "\n{} {} {}\n",
                "Calibration:".cyan().bold(),
                mark,
                calibration.report.lines().next().unwrap_or_default()
            ));
        }

        output.push_str(&format!(
            "\n{} {}\n",
            "Total resource parameter:".cyan().bold(),
            payload.resource_summary.total_resource_parameter
        ));
        output.push_str(&format!(
            "{} {} prompt + {} completion = {}\n",
            "Tokens:".cyan().bold(),
            payload.usage.prompt,
            payload.usage.completion,
            payload.usage.total
        ));

        output
    }

    fn node_line(record: &ResultRecord) -> String {
        format!(
            "  {} {} {} ({}) n={} resource={} tokens={}",
            Self::mark(record.success),
            record.node_id.bold(),
            record.kind,
            record.route,
            record.logical_parameter,
            record.resource_parameter,
            record.usage.total
        )
    }

    fn mark(success: bool) -> String {
        if success {
            "v".green().to_string()
        } else {
            "x".red().to_string()
        }
    }

    fn header(success: bool) -> String {
        let status = if success {
            "SUCCESS".green().bold()
        } else {
            "FAILED".red().bold()
        };
        format!("{} {}", "=== qforge run:".cyan().bold(), status)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, payload: &RunPayload) -> String {
        Self::format_report(payload)
    }

    fn format_summary(&self, payload: &RunPayload) -> String {
        Self::format_summary(payload)
    }

    fn format_json(&self, payload: &RunPayload) -> String {
        Self::format_json(payload)
    }
}
