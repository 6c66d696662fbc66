//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The Markdown final report
    Report,
    /// One status line per node
    Summary,
    /// The full run payload as JSON
    Json,
}

impl From<OutputFormat> for qforge_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Report => qforge_domain::OutputFormat::Report,
            OutputFormat::Summary => qforge_domain::OutputFormat::Summary,
            OutputFormat::Json => qforge_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for qforge
#[derive(Parser, Debug)]
#[command(name = "qforge")]
#[command(author, version, about = "Plan, synthesize and verify quantum circuits from a natural-language request")]
#[command(long_about = r#"
qforge turns a natural-language request into verified OpenQASM circuits.

The run has five stages:
1. Decompose: the request becomes a task graph of circuit kinds
2. Enrich: per-kind schemas refine the graph's parameters
3. Dispatch: each node is routed to the guided or tools strategy
4. Calibrate: backend constants are rewritten when the request asks for it
5. Solve: candidates are generated, tested and repaired until one passes

Configuration files are loaded from (in priority order):
1. QFORGE_* environment variables (QFORGE_ORACLE__MODEL=...)
2. --config <path>       Explicit config file
3. ./qforge.toml         Project-level config
4. ~/.config/qforge/config.toml   Global config

Example:
  qforge "Prepare a 4-qubit GHZ state and run Bernstein-Vazirani on 5 qubits"
  qforge -o json --report-dir reports "Build a 3-qubit ripple-carry adder"
"#)]
pub struct Cli {
    /// The request to solve (not required with --show-config)
    pub request: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "report")]
    pub output: OutputFormat,

    /// Directory receiving report_<timestamp>.md and .json
    #[arg(long, value_name = "DIR")]
    pub report_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["qforge", "make a ghz state"]).unwrap();
        assert_eq!(cli.request.as_deref(), Some("make a ghz state"));
        assert_eq!(cli.output, OutputFormat::Report);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert!(cli.report_dir.is_none());
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "qforge",
            "-vv",
            "-q",
            "-o",
            "json",
            "--report-dir",
            "out",
            "--config",
            "q.toml",
            "req",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.report_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.config, Some(PathBuf::from("q.toml")));
    }

    #[test]
    fn test_show_config_without_request() {
        let cli = Cli::try_parse_from(["qforge", "--show-config"]).unwrap();
        assert!(cli.show_config);
        assert!(cli.request.is_none());
    }

    #[test]
    fn test_output_maps_to_domain() {
        assert_eq!(
            qforge_domain::OutputFormat::from(OutputFormat::Summary),
            qforge_domain::OutputFormat::Summary
        );
    }
}
