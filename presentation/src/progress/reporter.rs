//! Progress reporting for workflow runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use qforge_application::{SolveProgressNotifier, WorkflowStage};
use qforge_domain::{AttemptRecord, Route, TaskGraph, truncate};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a stage spinner and a per-node bar
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<(WorkflowStage, ProgressBar)>>,
    node_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
            node_bar: Mutex::new(None),
        }
    }

    fn node_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn finish_stage(&self) {
        if let Ok(mut guard) = self.stage_bar.lock()
            && let Some((stage, pb)) = guard.take()
        {
            pb.finish_with_message(format!("{} done", stage.as_str().green()));
        }
    }

    /// Close every bar still open.
    pub fn finish(&self) {
        self.finish_stage();
        if let Ok(mut guard) = self.node_bar.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_with_message("complete".green().to_string());
        }
    }

    fn println(&self, line: String) {
        if self.multi.println(&line).is_err() {
            eprintln!("{}", line);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SolveProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: WorkflowStage) {
        self.finish_stage();

        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(stage.display_name().to_string());
        pb.set_message("...");
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut guard) = self.stage_bar.lock() {
            *guard = Some((stage, pb));
        }
    }

    fn on_plan_ready(&self, graph: &TaskGraph) {
        if !graph.has_nodes() {
            return;
        }
        let pb = self.multi.add(ProgressBar::new(graph.nodes.len() as u64));
        pb.set_style(Self::node_style());
        pb.set_prefix("Nodes");
        pb.set_message("waiting...");
        if let Ok(mut guard) = self.node_bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_node_start(&self, node_id: &str, kind: &str, route: Route, _index: usize, _total: usize) {
        if let Ok(guard) = self.node_bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            pb.set_message(format!("{} {} via {}", node_id.bold(), kind, route));
        }
    }

    fn on_attempt(&self, node_id: &str, record: &AttemptRecord) {
        if let Ok(guard) = self.node_bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            pb.set_message(format!(
                "{} #{}.{} {}",
                node_id.bold(),
                record.candidate_index,
                record.trial_index,
                truncate(&record.reason, 60)
            ));
        }
    }

    fn on_node_complete(&self, node_id: &str, success: bool) {
        let status = if success {
            format!("{} {}", "v".green(), node_id)
        } else {
            format!("{} {} (failed)", "x".red(), node_id)
        };
        self.println(format!("  {}", status));
        if let Ok(guard) = self.node_bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            pb.inc(1);
        }
    }

    fn on_calibration_complete(&self, success: bool) {
        let status = if success {
            "calibrated".green()
        } else {
            "calibration failed".red()
        };
        self.println(format!("  {}", status));
    }
}

/// Plain line-based progress for non-interactive stderr
pub struct SimpleProgress;

impl SolveProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: WorkflowStage) {
        eprintln!("{} {}", "->".cyan(), stage.display_name().bold());
    }

    fn on_node_start(&self, node_id: &str, kind: &str, route: Route, index: usize, total: usize) {
        eprintln!("  [{}/{}] {} {} via {}", index, total, node_id, kind, route);
    }

    fn on_attempt(&self, _node_id: &str, record: &AttemptRecord) {
        if !record.success {
            eprintln!("    {}", truncate(&record.to_string(), 160).dimmed());
        }
    }

    fn on_node_complete(&self, node_id: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), node_id);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), node_id);
        }
    }

    fn on_calibration_complete(&self, success: bool) {
        eprintln!(
            "  {}",
            if success { "calibrated".green() } else { "calibration failed".red() }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::ProgressDrawTarget;
    use qforge_domain::TaskNode;

    fn hidden_reporter() -> ProgressReporter {
        let reporter = ProgressReporter::new();
        reporter.multi.set_draw_target(ProgressDrawTarget::hidden());
        reporter
    }

    #[test]
    fn test_reporter_tracks_nodes() {
        let reporter = hidden_reporter();
        let mut graph = TaskGraph::empty();
        graph.nodes = vec![TaskNode::new("n1", "ghz", 3), TaskNode::new("n2", "bv", 4)];

        reporter.on_stage_start(WorkflowStage::Decompose);
        reporter.on_plan_ready(&graph);
        reporter.on_stage_start(WorkflowStage::Solve);
        reporter.on_node_start("n1", "ghz", Route::Guided, 1, 2);
        reporter.on_attempt("n1", &AttemptRecord::passed(1, 0));
        reporter.on_node_complete("n1", true);

        let position = reporter
            .node_bar
            .lock()
            .unwrap()
            .as_ref()
            .map(|pb| (pb.position(), pb.length()));
        assert_eq!(position, Some((1, Some(2))));
        let stage = reporter.stage_bar.lock().unwrap().as_ref().map(|(s, _)| *s);
        assert_eq!(stage, Some(WorkflowStage::Solve));

        reporter.finish();
        assert!(reporter.node_bar.lock().unwrap().is_none());
        assert!(reporter.stage_bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_reporter_without_nodes() {
        let reporter = hidden_reporter();
        reporter.on_plan_ready(&TaskGraph::empty());
        reporter.on_node_complete("n1", false);
        assert!(reporter.node_bar.lock().unwrap().is_none());
    }
}
