//! Markdown rendering of a run.

use super::entities::{CalibrationOutcome, ResourceSummary, ResultMap, overall_success};
use crate::plan::entities::TaskGraph;
use crate::solve::artifact::is_circuit_artifact;

fn status(success: bool) -> &'static str {
    if success { "Success" } else { "Failed" }
}

/// Render the final Markdown report of a run.
///
/// Sections: overall status, quoted request, calibration (when it ran),
/// per-node resource usage and total, edges, then one artifact block per node.
pub fn render_final_report(
    request: &str,
    enriched: &TaskGraph,
    results: &ResultMap,
    resources: &ResourceSummary,
    calibration: Option<&CalibrationOutcome>,
) -> String {
    let mut lines: Vec<String> = vec![
        "# Quantum Workflow Report".to_string(),
        format!(
            "**Overall Status:** {}",
            status(overall_success(results, calibration))
        ),
        String::new(),
        "## User Request".to_string(),
        format!("> {}", request.replace('\n', "\n> ")),
        String::new(),
    ];

    if let Some(calibration) = calibration {
        lines.push("## Calibration".to_string());
        lines.push(format!("- Request: {}", calibration.description));
        lines.push(format!("- Status: {}", status(calibration.success)));
        if !calibration.report.trim().is_empty() {
            lines.push(format!("```text\n{}\n```", calibration.report.trim()));
        }
        lines.push(String::new());
    }

    lines.push("## Resource Usage".to_string());
    if enriched.nodes.is_empty() {
        lines.push("(no nodes)".to_string());
    }
    for node in &enriched.nodes {
        let mut line = format!(
            "- **{}** ({}): logical={}, resource={}",
            node.id, node.kind, node.logical_parameter, node.resource_parameter
        );
        if let Some(reason) = node.parameter_reason.as_deref().filter(|r| !r.is_empty()) {
            line.push_str(&format!(" - _{}_", reason));
        }
        lines.push(line);
    }
    lines.push(String::new());
    lines.push(format!(
        "**Total resource parameter:** {}",
        resources.total_resource_parameter
    ));
    lines.push(String::new());

    lines.push("## Data Transfers (Edges)".to_string());
    if enriched.edges.is_empty() {
        lines.push("(no edges)".to_string());
    }
    for edge in &enriched.edges {
        let sizes: Vec<String> = [("in", &edge.in_size), ("out", &edge.out_size)]
            .into_iter()
            .filter_map(|(label, size)| size.as_ref().map(|s| format!("{}={}", label, s)))
            .collect();
        let sizes = if sizes.is_empty() {
            String::new()
        } else {
            format!(" ({})", sizes.join(", "))
        };
        lines.push(format!(
            "- {} → {}{}: {}",
            edge.source, edge.target, sizes, edge.description
        ));
    }
    lines.push(String::new());

    lines.push("## Artifacts".to_string());
    if enriched.nodes.is_empty() {
        lines.push("(no artifacts)".to_string());
    }
    for node in &enriched.nodes {
        let (artifact, report) = results
            .get(&node.id)
            .map(|r| (r.artifact.as_str(), r.report.as_str()))
            .unwrap_or(("", ""));

        lines.push(format!("### Node {} ({})", node.id, node.kind));
        if is_circuit_artifact(artifact) {
            lines.push(format!("```qasm\n{}\n```", artifact.trim()));
        } else {
            lines.push(
                "_No OpenQASM detected in artifact; showing raw output for debugging._".to_string(),
            );
            lines.push(String::new());
            lines.push(format!("```text\n{}\n```", artifact.trim()));
            if !report.is_empty() {
                lines.push(format!("> Report note: {}", report.replace('\n', "\n> ")));
            }
        }
        lines.push(String::new());
    }

    lines.join("\n").trim_end().to_string()
}
