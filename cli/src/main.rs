//! CLI entrypoint for qforge
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use qforge_application::{
    CalibrateUseCase, ConversationLogger, GuidedStrategy, NoProgress, PlanTaskUseCase,
    RunWorkflowUseCase, SolveCandidateUseCase, SolveProgressNotifier, Strategies,
    SynthesisOracle, ToolsStrategy,
};
use qforge_domain::RunPayload;
use qforge_infrastructure::{
    CommandScriptRunner, CommandVerifierLoader, ConfigLoader, FileCalibrationApplier, FileConfig,
    FsExampleSource, FsSchemaStore, FsToolCatalog, HttpSynthesisOracle, JsonlConversationLogger,
    KernelLayout,
};
use qforge_presentation::{
    Cli, ConsoleFormatter, OutputFormatter, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let config = ConfigLoader::load(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    let _log_guard = init_tracing(cli.verbose, config.logging.log_dir.as_deref());
    info!("Starting qforge");

    for issue in config.ensure_valid()? {
        warn!("{}", issue);
    }

    let Some(request) = cli.request.as_deref() else {
        bail!("A request is required. Run `qforge --help` for usage.");
    };

    let use_case = build_workflow(&config)?;

    let reporter = (!cli.quiet && std::io::stderr().is_terminal()).then(ProgressReporter::new);
    let progress: &dyn SolveProgressNotifier = match (&reporter, cli.quiet) {
        (Some(reporter), _) => reporter,
        (None, true) => &NoProgress,
        (None, false) => &SimpleProgress,
    };

    let payload = use_case.execute(request, progress).await;
    if let Some(reporter) = &reporter {
        reporter.finish();
    }
    let payload = payload?;

    if let Some(dir) = &cli.report_dir {
        let (markdown, json) = write_reports(dir, &payload)?;
        info!("Reports written to {} and {}", markdown.display(), json.display());
    }

    println!("{}", ConsoleFormatter.render(cli.output.into(), &payload));

    Ok(if payload.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Console logging at the `-v` level, plus a daily file log when configured.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = verbosity_level(verbose);

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(level));

    let (file, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "qforge.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(EnvFilter::new(file_level(verbose)));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(console).with(file).init();
    guard
}

/// Filter directive for a `-v` count.
fn verbosity_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    }
}

/// The file log keeps at least `info`.
fn file_level(verbose: u8) -> &'static str {
    verbosity_level(verbose.max(1))
}

fn build_workflow(config: &FileConfig) -> Result<RunWorkflowUseCase> {
    let forge = config.to_forge_config();
    let layout = KernelLayout::new(&config.kernels.root);
    let interpreter = config.kernels.interpreter.as_str();

    let oracle: Arc<dyn SynthesisOracle> = Arc::new(
        HttpSynthesisOracle::from_config(&config.oracle).context("Failed to create oracle client")?,
    );

    let strategies = Strategies::new(
        GuidedStrategy::new(
            oracle.clone(),
            Arc::new(FsExampleSource::new(layout.clone())),
            forge.solve().example_shots,
        ),
        ToolsStrategy::new(
            oracle.clone(),
            Arc::new(FsToolCatalog::new(layout.clone(), interpreter)),
            Arc::new(CommandScriptRunner::new(layout.clone(), interpreter)),
        ),
    );

    let planner = PlanTaskUseCase::new(oracle.clone(), Arc::new(FsSchemaStore::new(layout.clone())));
    let solver = SolveCandidateUseCase::new(
        Arc::new(CommandVerifierLoader::new(layout, interpreter)),
        forge.solve().clone(),
    );
    let calibrator = CalibrateUseCase::new(
        oracle.clone(),
        Arc::new(FileCalibrationApplier::new(&config.calibration.file)),
        forge.calibration().max_trials,
    );

    let mut use_case =
        RunWorkflowUseCase::new(oracle, planner, solver, calibrator, strategies, forge);

    if let Some(path) = &config.logging.conversation_log
        && let Some(logger) = JsonlConversationLogger::new(path)
    {
        info!("Writing transcript to {}", logger.path().display());
        let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
        use_case = use_case.with_conversation_logger(logger);
    }

    Ok(use_case)
}

/// Write `report_<timestamp>.md` and `report_<timestamp>.json` into `dir`.
fn write_reports(dir: &Path, payload: &RunPayload) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory {}", dir.display()))?;

    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let markdown = dir.join(format!("report_{}.md", stamp));
    let json = dir.join(format!("report_{}.json", stamp));

    std::fs::write(&markdown, &payload.final_report)
        .with_context(|| format!("Failed to write {}", markdown.display()))?;
    std::fs::write(&json, ConsoleFormatter::format_json(payload))
        .with_context(|| format!("Failed to write {}", json.display()))?;

    Ok((markdown, json))
}
