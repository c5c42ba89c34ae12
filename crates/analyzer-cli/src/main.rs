use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};

use analyzer_core::host::{Logger, NullProgressSink, ProgressSink, Stage, TracingLogger};
use analyzer_core::{Advisory, AnalysisOutcome, ProjectAnalyzer};
use analyzer_report::{json, text};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "project-analyzer")]
#[command(about = "Scan a polyglot workspace and report its dependency graph and architecture")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a workspace and print the full project structure
    Analyze {
        /// Path to the workspace root
        path: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Compact output (single-line JSON, no colors for text)
        #[arg(long)]
        compact: bool,
        /// Log progress milestones to stderr
        #[arg(short, long)]
        verbose: bool,
    },
    /// Analyze and exit 0 if no circular dependencies were found, 1 otherwise
    Check {
        /// Path to the workspace root
        path: PathBuf,
    },
}

struct StderrProgressSink;

impl ProgressSink for StderrProgressSink {
    fn on_stage(&self, stage: Stage, count: usize) {
        eprintln!("[project-analyzer] {} ({count})", stage.as_str());
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            path,
            format,
            compact,
            verbose,
        } => {
            init_tracing(verbose);
            cmd_analyze(&path, format, compact, verbose)
        }
        Commands::Check { path } => {
            init_tracing(false);
            cmd_check(&path)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(2);
    }
}

fn validate_path(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("path '{}' does not exist", path.display());
    }
    if !path.is_dir() {
        bail!("path '{}' is not a directory", path.display());
    }
    Ok(())
}

fn cmd_analyze(path: &Path, format: OutputFormat, compact: bool, verbose: bool) -> Result<()> {
    validate_path(path)?;

    let logger = TracingLogger;
    let null_sink = NullProgressSink;
    let stderr_sink = StderrProgressSink;
    let progress: &dyn ProgressSink = if verbose { &stderr_sink } else { &null_sink };

    let mut analyzer = ProjectAnalyzer::new(&logger, progress);
    match analyzer.analyze(path) {
        AnalysisOutcome::Structure(structure) => {
            let report = match format {
                OutputFormat::Text => text::format_report(&structure),
                OutputFormat::Json => json::format_report(&structure, compact),
            };
            println!("{report}");
            Ok(())
        }
        AnalysisOutcome::Cancelled => bail!("analysis was cancelled"),
        AnalysisOutcome::Error(e) => bail!("{e}"),
    }
}

fn cmd_check(path: &Path) -> Result<()> {
    validate_path(path)?;

    let logger = TracingLogger;
    let sink = NullProgressSink;
    let mut analyzer = ProjectAnalyzer::new(&logger, &sink);

    match analyzer.analyze(path) {
        AnalysisOutcome::Structure(structure) => {
            let cycles = analyzer_core::graph::find_cycles(&structure.dependencies);
            if cycles.is_empty() {
                println!("No circular dependencies found.");
                Ok(())
            } else {
                println!("Found {} circular dependenc{}:", cycles.len(), if cycles.len() == 1 { "y" } else { "ies" });
                for cycle in &cycles {
                    let advisory = Advisory::CircularDependency {
                        cycle: cycle.clone(),
                    };
                    logger.warn(&advisory.to_string());
                    println!("  {}", cycle.join(" -> "));
                }
                process::exit(1);
            }
        }
        AnalysisOutcome::Cancelled => bail!("analysis was cancelled"),
        AnalysisOutcome::Error(e) => bail!("{e}"),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
